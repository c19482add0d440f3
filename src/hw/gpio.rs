//! `embedded-hal` 1.0 views of HAL GPIO pins.
//!
//! - [`PortBit`] reads a pin by masking its bit out of the port's input data register.
//! - [`OutputLine`] drives a push-pull output.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use stm32f7xx_hal::{
    gpio::{self, Output, PinState, PushPull},
    pac,
};

/// Read the whole input data register of port `port` ('A'..='E').
fn port_idr(port: char) -> u32 {
    // Read-only access to IDR, no other state touched.
    unsafe {
        match port {
            'A' => (*pac::GPIOA::ptr()).idr.read().bits(),
            'B' => (*pac::GPIOB::ptr()).idr.read().bits(),
            'C' => (*pac::GPIOC::ptr()).idr.read().bits(),
            'D' => (*pac::GPIOD::ptr()).idr.read().bits(),
            'E' => (*pac::GPIOE::ptr()).idr.read().bits(),
            _ => 0,
        }
    }
}

/// Input pin sampled through its port's IDR.
///
/// Holds the configured HAL pin so nothing else can reconfigure it.
pub struct PortBit<const P: char, const N: u8, MODE> {
    pin: gpio::Pin<P, N, MODE>,
}

impl<const P: char, const N: u8, MODE> PortBit<P, N, MODE> {
    pub fn new(pin: gpio::Pin<P, N, MODE>) -> Self {
        Self { pin }
    }

    /// The pin's bit of the port, masked to 0 or 1.
    #[inline]
    pub fn raw(&self) -> u16 {
        ((port_idr(P) >> N) & 0x0001) as u16
    }

    pub fn free(self) -> gpio::Pin<P, N, MODE> {
        self.pin
    }
}

impl<const P: char, const N: u8, MODE> ErrorType for PortBit<P, N, MODE> {
    type Error = Infallible;
}

impl<const P: char, const N: u8, MODE> InputPin for PortBit<P, N, MODE> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.raw() != 0)
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.raw() == 0)
    }
}

/// Push-pull output line.
pub struct OutputLine<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> OutputLine<P, N> {
    pub fn new(pin: gpio::Pin<P, N, Output<PushPull>>) -> Self {
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for OutputLine<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for OutputLine<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_state(PinState::Low);
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_state(PinState::High);
        Ok(())
    }
}
