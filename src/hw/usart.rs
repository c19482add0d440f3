// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Diagnostic trace channel on a USART transmitter.
//!
//! The edge sampler formats its reports through `core::fmt::Write`; [`TraceUart`] forwards the
//! bytes to the HAL transmitter, blocking per byte. Transmit errors are counted, never reported
//! back to the caller.
//!
//! On the Nucleo-F767ZI, USART3 (PD8/PD9) is wired to the ST-LINK virtual COM port:
//! ```text
//! $ screen /dev/ttyACM0 115200
//! ```
//!
//! To close the terminal, press `Ctrl+A` then `\` then `y`.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct TraceUart<U: Instance> {
    tx: Tx<U>,
    dropped: u32,
}

impl<U: Instance> TraceUart<U> {
    /// Take the transmit half; the receive half is discarded.
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self {
            tx,
            dropped: 0,
        }
    }

    pub fn send(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if block!(self.tx.write(b)).is_err() {
                self.dropped = self.dropped.wrapping_add(1);
            }
        }
    }

    /// Bytes the transmitter rejected.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<U: Instance> fmt::Write for TraceUart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send(s.as_bytes());
        Ok(())
    }
}
