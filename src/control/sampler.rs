// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Edge-triggered input sampler.
//!
//! Serviced from the EXTI line interrupt (both edges). On a pending edge it reads the monitored
//! pin, keeps the single-bit value and reports it on the trace sink as two CRLF-terminated
//! lines: the numeral (`0`/`1`) and its classification (`LOW`/`HIGH`).
//!
//! A spurious entry (line not pending) performs no read and no emission.

use core::fmt::Write;

use embedded_hal::digital::InputPin;

use crate::irq::IrqFlag;

/// Sampled logic level.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The level as a masked port bit.
    #[inline]
    pub fn bit(self) -> u16 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "LOW",
            Level::High => "HIGH",
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Levels of both sampled inputs captured once at bring-up.
///
/// Kept for inspection only; nothing consumes it after capture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct InputSnapshot {
    pub a0: bool,
    pub b0: bool,
}

impl InputSnapshot {
    /// Read both inputs once.
    pub fn capture<A, B>(a0: &mut A, b0: &mut B) -> Result<Self, A::Error>
    where
        A: InputPin,
        B: InputPin<Error = A::Error>,
    {
        Ok(Self {
            a0: a0.is_high()?,
            b0: b0.is_high()?,
        })
    }
}

pub struct EdgeSampler<F, P, W> {
    line: F,
    pin: P,
    trace: W,
    last: u16,
    initial: InputSnapshot,
    reports: u32,
}

impl<F, P, W> EdgeSampler<F, P, W>
where
    F: IrqFlag,
    P: InputPin,
    W: Write,
{
    pub fn new(line: F, pin: P, trace: W, initial: InputSnapshot) -> Self {
        Self {
            line,
            pin,
            trace,
            last: 0,
            initial,
            reports: 0,
        }
    }

    /// Service one EXTI interrupt.
    ///
    /// Returns the sampled level, or `None` on a spurious entry. The pending flag is cleared
    /// after the report, and also when the pin read fails.
    pub fn on_edge(&mut self) -> Result<Option<Level>, P::Error> {
        if !self.line.is_pending() {
            return Ok(None);
        }

        let level = match self.pin.is_high() {
            Ok(high) => Level::from(high),
            Err(e) => {
                self.line.clear_pending();
                return Err(e);
            }
        };

        self.last = level.bit();
        self.report(level);
        self.line.clear_pending();

        Ok(Some(level))
    }

    fn report(&mut self, level: Level) {
        // Trace output has no delivery contract.
        let _ = write!(self.trace, "{}\r\n", self.last);
        let _ = write!(self.trace, "{}\r\n", level.as_str());
        self.reports = self.reports.wrapping_add(1);
    }

    /// Last sampled pin value (0 or 1); 0 before the first edge.
    #[inline]
    pub fn last(&self) -> u16 {
        self.last
    }

    #[inline]
    pub fn initial(&self) -> InputSnapshot {
        self.initial
    }

    /// Number of reports emitted (wrapping).
    #[inline]
    pub fn reports(&self) -> u32 {
        self.reports
    }

    #[inline]
    pub fn trace(&self) -> &W {
        &self.trace
    }

    pub fn free(self) -> (F, P, W) {
        (self.line, self.pin, self.trace)
    }
}
