// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time timing and wiring parameters.
//!
//! All timer arithmetic assumes a 72 MHz timer kernel clock:
//!
//! ```text
//! tick_hz  = TIMER_CLOCK_HZ / (prescaler + 1)
//! frame_hz = tick_hz / (period + 1)
//! ```
//!
//! A hobby servo / H-bridge frame of 20 ms is `600 * 2400 / 72 MHz`.

/// System clock requested from the RCC at bring-up.
pub const SYSCLK_HZ: u32 = 72_000_000;

/// Kernel clock seen by TIM1/TIM8 (APB2) and TIM3 (APB1 x2).
pub const TIMER_CLOCK_HZ: u32 = 72_000_000;

/// Prescaler/period pair for one timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimerConfig {
    /// Value written to PSC; the counter clock is divided by `prescaler + 1`.
    pub prescaler: u16,
    /// Value written to ARR; one frame is `period + 1` counter ticks.
    pub period: u16,
}

impl TimerConfig {
    pub const fn new(prescaler: u16, period: u16) -> Self {
        Self { prescaler, period }
    }

    /// Counter tick rate in Hz (truncated).
    #[inline]
    pub const fn tick_hz(&self, clock_hz: u32) -> u32 {
        clock_hz / (self.prescaler as u32 + 1)
    }

    /// Length of one counter frame (update period) in microseconds (truncated).
    pub const fn frame_us(&self, clock_hz: u32) -> u64 {
        let ticks = (self.prescaler as u64 + 1) * (self.period as u64 + 1);
        ticks * 1_000_000 / clock_hz as u64
    }

    /// Number of counter ticks in one frame.
    #[inline]
    pub const fn frame_ticks(&self) -> u32 {
        self.period as u32 + 1
    }
}

/// TIM1: LED PWM, 20 ms frame.
pub const LED_PWM: TimerConfig = TimerConfig::new(599, 2399);

/// LED compare value (50 % of the LED frame).
pub const LED_DUTY: u16 = 1200;

/// TIM8: H-bridge IN1/IN2 PWM, 20 ms frame.
pub const MOTOR_PWM: TimerConfig = TimerConfig::new(599, 2399);

/// Compare value written to whichever H-bridge input is currently driven.
pub const MOTOR_DRIVE_DUTY: u16 = 1200;

/// TIM3: direction alternation tick, roughly once per second.
pub const ALTERNATION: TimerConfig = TimerConfig::new(60_000, 1199);

/// NVIC priority byte shared by both handlers (logical level 1, 4 implemented bits).
pub const IRQ_PRIORITY: u8 = 1 << 4;

/// Diagnostic trace baud rate.
pub const TRACE_BAUD: u32 = 115_200;

/// EXTI line monitored by the edge sampler (pin 0 of the selected port).
pub const EDGE_LINE: u8 = 0;

/// GPIO port routed onto [`EDGE_LINE`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EdgeSource {
    PortA,
    PortB,
}

impl EdgeSource {
    /// Port selector value for the SYSCFG EXTICRx field.
    #[inline]
    pub const fn exticr_bits(self) -> u32 {
        match self {
            EdgeSource::PortA => 0b0000,
            EdgeSource::PortB => 0b0001,
        }
    }
}

#[cfg(not(feature = "edge-pb0"))]
pub const EDGE_SOURCE: EdgeSource = EdgeSource::PortA;

#[cfg(feature = "edge-pb0")]
pub const EDGE_SOURCE: EdgeSource = EdgeSource::PortB;

const _: () = assert!(LED_DUTY <= LED_PWM.period);
const _: () = assert!(MOTOR_DRIVE_DUTY > 0 && MOTOR_DRIVE_DUTY <= MOTOR_PWM.period);
const _: () = assert!(EDGE_LINE < 16);
