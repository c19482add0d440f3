// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767ZI devboard.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Input, Output, PullDown, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub led: LedPins,
    pub motor: MotorPins,
    pub inputs: InputPins,
    pub usart3: Usart3Pins,
}

pub struct LedPins {
    pub pwm: gpioe::PE9<Alternate<1>>, // TIM1_CH1
}

/// H-bridge control pins
pub struct MotorPins {
    pub in1: gpioc::PC7<Alternate<3>>, // TIM8_CH2 (PWM)
    pub in2: gpioc::PC8<Alternate<3>>, // TIM8_CH3 (PWM)
    pub enable: gpiob::PB1<Output<PushPull>>,
}

/// Sampled inputs, pulled down. Pin 0 of either port can feed EXTI line 0.
pub struct InputPins {
    pub a0: gpioa::PA0<Input<PullDown>>,
    pub b0: gpiob::PB0<Input<PullDown>>,
}

/// USART3 TX/RX (ST-LINK virtual COM port)
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            led: LedPins {
                pwm: gpioe.pe9.into_alternate::<1>(),
            },

            motor: MotorPins {
                in1: gpioc.pc7.into_alternate::<3>(),
                in2: gpioc.pc8.into_alternate::<3>(),
                enable: gpiob.pb1.into_push_pull_output(),
            },

            inputs: InputPins {
                a0: gpioa.pa0.into_pull_down_input(),
                b0: gpiob.pb0.into_pull_down_input(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },
        }
    }
}
