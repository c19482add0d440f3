// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! One-time peripheral bring-up.
//!
//! Brings the clock tree to 72 MHz, assigns pin modes, configures the three timers and the EXTI
//! line, and assembles the handler state for the two interrupts. Interrupts are armed separately
//! with [`arm_interrupts`] once that state has been installed in its [`IrqSlot`].
//!
//! | Timer | Role | Prescaler / period | Frame |
//! | ----- | ---- | ------------------ | ----- |
//! | TIM1  | LED PWM on PE9 | 599 / 2399 | 20 ms |
//! | TIM8  | H-bridge IN1/IN2 on PC7/PC8 | 599 / 2399 | 20 ms |
//! | TIM3  | direction alternation tick | 60000 / 1199 | ≈1 s |
//!
//! [`IrqSlot`]: crate::irq::IrqSlot

use cortex_m::peripheral::NVIC;
use embedded_hal::pwm::SetDutyCycle;
use stm32f7xx_hal::{
    gpio::{Input, PullDown},
    pac,
    prelude::*,
    serial::{Config, Serial},
};

use crate::config;
use crate::control::{Alternator, EdgeSampler, InputSnapshot};
use crate::drivers::{Direction, HBridge};
use crate::hw::exti::Edge;
use crate::hw::pins::BoardPins;
use crate::hw::{EnableLine, ExtiLine, OutputLine, PortBit, PwmChannel, PwmTimer, TickTimer, TraceUart};

/// H-bridge on TIM8 CH2/CH3 with its enable line on PB1.
pub type MotorBridge = HBridge<PwmChannel<pac::TIM8, 2>, PwmChannel<pac::TIM8, 3>, OutputLine<'B', 1>>;

/// State serviced by the TIM3 vector.
pub type Motor =
    Alternator<TickTimer<pac::TIM3>, PwmChannel<pac::TIM8, 2>, PwmChannel<pac::TIM8, 3>, OutputLine<'B', 1>>;

#[cfg(not(feature = "edge-pb0"))]
pub type EdgeInput = PortBit<'A', 0, Input<PullDown>>;

#[cfg(feature = "edge-pb0")]
pub type EdgeInput = PortBit<'B', 0, Input<PullDown>>;

/// State serviced by the EXTI0 vector.
pub type Sampler = EdgeSampler<ExtiLine, EdgeInput, TraceUart<pac::USART3>>;

/// Handler state produced by bring-up.
pub struct Board {
    pub motor: Motor,
    pub sampler: Sampler,
}

/// Configure every peripheral the handlers depend on.
///
/// Leaves all three timers running and the EXTI line unmasked at the peripheral, but the NVIC
/// lines still masked.
pub fn bring_up(dp: pac::Peripherals) -> Board {
    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(config::SYSCLK_HZ.Hz()).freeze();
    defmt::info!("sysclk {} Hz", clocks.sysclk().raw());

    // Timer and SYSCFG kernel clocks (GPIO clocks are enabled by `split`)
    let rcc_regs = unsafe { &*pac::RCC::ptr() };
    rcc_regs
        .apb2enr
        .modify(|_, w| w.tim1en().set_bit().tim8en().set_bit().syscfgen().set_bit());
    rcc_regs.apb1enr.modify(|_, w| w.tim3en().set_bit());

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART3 (trace)
    let usart_cfg = Config {
        baud_rate: config::TRACE_BAUD.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, usart_cfg);
    let trace = TraceUart::new(serial);

    // TIM1: LED
    let mut led_timer = PwmTimer::new(dp.TIM1, config::LED_PWM);
    let mut led = led_timer.channel::<1>();
    led.set_duty_cycle(config::LED_DUTY).ok();
    led_timer.start();
    defmt::info!("TIM1 LED PWM running, duty {}", config::LED_DUTY);

    // TIM8: H-bridge
    let mut motor_timer = PwmTimer::new(dp.TIM8, config::MOTOR_PWM);
    let in1 = motor_timer.channel::<2>();
    let in2 = motor_timer.channel::<3>();
    let enable = EnableLine::active_high(OutputLine::new(pins.motor.enable))
        .unwrap_or_else(|e| match e {});

    let mut bridge: MotorBridge = HBridge::new(in1, in2, enable, config::MOTOR_DRIVE_DUTY);
    bridge.drive(Direction::Forward).ok();
    motor_timer.start();
    bridge.enable().ok();
    defmt::info!("TIM8 H-bridge PWM running, enable asserted");

    // Inputs: one-time snapshot of both levels
    let mut a0 = PortBit::new(pins.inputs.a0);
    let mut b0 = PortBit::new(pins.inputs.b0);
    let initial = InputSnapshot::capture(&mut a0, &mut b0).unwrap_or_default();
    defmt::info!("initial inputs a0={} b0={}", initial.a0, initial.b0);

    #[cfg(not(feature = "edge-pb0"))]
    let edge_pin = a0;
    #[cfg(feature = "edge-pb0")]
    let edge_pin = b0;

    // EXTI line 0, both edges
    let line = ExtiLine::new(
        dp.EXTI,
        &dp.SYSCFG,
        config::EDGE_LINE,
        config::EDGE_SOURCE,
        Edge::Both,
    );

    // TIM3: alternation tick
    let mut tick = TickTimer::tim3(dp.TIM3, config::ALTERNATION);
    tick.listen();
    tick.start();
    defmt::info!(
        "TIM3 tick every {} us",
        config::ALTERNATION.frame_us(config::TIMER_CLOCK_HZ)
    );

    Board {
        motor: Alternator::new(tick, bridge),
        sampler: EdgeSampler::new(line, edge_pin, trace, initial),
    }
}

/// Set both handler priorities and unmask their NVIC lines.
pub fn arm_interrupts(nvic: &mut NVIC) {
    unsafe {
        nvic.set_priority(pac::Interrupt::TIM3, config::IRQ_PRIORITY);
        nvic.set_priority(pac::Interrupt::EXTI0, config::IRQ_PRIORITY);
        NVIC::unmask(pac::Interrupt::TIM3);
        NVIC::unmask(pac::Interrupt::EXTI0);
    }
    defmt::info!("TIM3 and EXTI0 armed");
}
