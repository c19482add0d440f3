//! Digital output line that remembers its active level and last driven state.
//!
//! Used for the H-bridge enable input. Boards that invert the enable (e.g. an nSLEEP pin) use
//! [`EnableLine::active_low`].

use embedded_hal::digital::OutputPin;

/// Whether the line is asserted by driving it high or low.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

pub struct EnableLine<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    asserted: bool,
}

impl<PIN: OutputPin> EnableLine<PIN> {
    /// Wrap a pin and drive it to the inactive level.
    pub fn new(mut pin: PIN, active: ActiveLevel) -> Result<Self, PIN::Error> {
        match active {
            ActiveLevel::High => pin.set_low()?,
            ActiveLevel::Low => pin.set_high()?,
        }
        Ok(Self {
            pin,
            active,
            asserted: false,
        })
    }

    pub fn active_high(pin: PIN) -> Result<Self, PIN::Error> {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: PIN) -> Result<Self, PIN::Error> {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Drive the line logically asserted (true) or released (false).
    pub fn set(&mut self, asserted: bool) -> Result<(), PIN::Error> {
        match (self.active, asserted) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high()?,
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low()?,
        }
        self.asserted = asserted;
        Ok(())
    }

    #[inline]
    pub fn assert(&mut self) -> Result<(), PIN::Error> {
        self.set(true)
    }

    #[inline]
    pub fn release(&mut self) -> Result<(), PIN::Error> {
        self.set(false)
    }

    #[inline]
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}
