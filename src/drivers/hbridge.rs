// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-input H-bridge motor driver (IN1/IN2 PWM plus an enable line).
//!
//! Direction is selected by which input carries the PWM signal; the other input is held at zero
//! duty. Works with any `embedded-hal` PWM channel and output pin, so the same driver runs on the
//! TIM8 channels on hardware and on recording mocks in tests.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::hw::EnableLine;

/// Logical drive direction for the motor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Direction {
    /// IN1 driven, IN2 at zero.
    Forward,
    /// IN2 driven, IN1 at zero.
    Reverse,
}

pub struct HBridge<IN1, IN2, EN>
where
    EN: OutputPin,
{
    in1: IN1,
    in2: IN2,
    enable: EnableLine<EN>,
    drive_duty: u16,
    direction: Option<Direction>,
}

impl<IN1, IN2, EN> HBridge<IN1, IN2, EN>
where
    IN1: SetDutyCycle,
    IN2: SetDutyCycle<Error = IN1::Error>,
    EN: OutputPin,
{
    /// Create a driver from its two PWM inputs and enable line.
    ///
    /// `drive_duty` is the compare value written to the active input; it is clamped to the
    /// channel maximum. Outputs are not touched until [`drive`](Self::drive) is called.
    pub fn new(in1: IN1, in2: IN2, enable: EnableLine<EN>, drive_duty: u16) -> Self {
        let drive_duty = drive_duty
            .min(in1.max_duty_cycle())
            .min(in2.max_duty_cycle());
        Self {
            in1,
            in2,
            enable,
            drive_duty,
            direction: None,
        }
    }

    /// Assert the driver's enable input.
    pub fn enable(&mut self) -> Result<(), EN::Error> {
        self.enable.assert()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enable.is_asserted()
    }

    /// `(IN1, IN2)` compare values for a direction.
    #[inline]
    pub fn duties(&self, direction: Direction) -> (u16, u16) {
        match direction {
            Direction::Forward => (self.drive_duty, 0),
            Direction::Reverse => (0, self.drive_duty),
        }
    }

    /// Write both inputs for `direction`. IN1 is written first.
    pub fn drive(&mut self, direction: Direction) -> Result<(), IN1::Error> {
        let (in1, in2) = self.duties(direction);
        self.in1.set_duty_cycle(in1)?;
        self.in2.set_duty_cycle(in2)?;
        self.direction = Some(direction);
        Ok(())
    }

    /// Last direction successfully written, `None` before the first drive.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[inline]
    pub fn drive_duty(&self) -> u16 {
        self.drive_duty
    }

    pub fn free(self) -> (IN1, IN2, EnableLine<EN>) {
        (self.in1, self.in2, self.enable)
    }
}
