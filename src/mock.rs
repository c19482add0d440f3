//! Recording stand-ins for the peripheral traits, used by the host tests.
//!
//! Every mock is `Clone` and shares its state between clones, so a test can keep one handle
//! while the code under test owns the other.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use core::convert::Infallible;

use embedded_hal::digital::{self, ErrorKind, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::irq::IrqFlag;

// ── Event log ─────────────────────────────────────────────────

/// Peripheral access observed by a logged mock.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Clear,
    Duty(&'static str, u16),
}

/// Ordered record shared by several mocks.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

// ── Interrupt flag ────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockFlag {
    pending: Arc<AtomicBool>,
    clears: Arc<AtomicUsize>,
    log: Option<EventLog>,
}

impl MockFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag that also records each acknowledge in `log`.
    pub fn logged(log: &EventLog) -> Self {
        Self {
            log: Some(log.clone()),
            ..Self::default()
        }
    }

    /// Latch an event, as the hardware would.
    pub fn raise(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl IrqFlag for MockFlag {
    fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    fn clear_pending(&mut self) {
        self.pending.store(false, Ordering::SeqCst);
        self.clears.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.push(Event::Clear);
        }
    }
}

// ── PWM channel ───────────────────────────────────────────────

#[derive(Clone)]
pub struct MockPwm {
    max: u16,
    writes: Arc<Mutex<Vec<u16>>>,
    log: Option<(EventLog, &'static str)>,
}

impl MockPwm {
    pub fn new(max: u16) -> Self {
        Self {
            max,
            writes: Arc::new(Mutex::new(Vec::new())),
            log: None,
        }
    }

    /// A channel that also records each write in `log` under `name`.
    pub fn logged(max: u16, name: &'static str, log: &EventLog) -> Self {
        Self {
            log: Some((log.clone(), name)),
            ..Self::new(max)
        }
    }

    pub fn writes(&self) -> Vec<u16> {
        self.writes.lock().unwrap().clone()
    }

    /// Last duty written, 0 if never written.
    pub fn duty(&self) -> u16 {
        self.writes.lock().unwrap().last().copied().unwrap_or(0)
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.writes.lock().unwrap().push(duty);
        if let Some((log, name)) = &self.log {
            log.push(Event::Duty(name, duty));
        }
        Ok(())
    }
}

// ── Output pin ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOutput {
    history: Arc<Mutex<Vec<bool>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.lock().unwrap().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.history.lock().unwrap().last().copied()
    }
}

impl digital::ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.history.lock().unwrap().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.history.lock().unwrap().push(true);
        Ok(())
    }
}

// ── Input pin ─────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Clone, Default)]
pub struct MockPin {
    high: Arc<AtomicBool>,
    broken: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&self, high: bool) {
        self.high.store(high, Ordering::SeqCst);
    }

    /// Make every following read fail.
    pub fn break_reads(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockPinError;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.broken.load(Ordering::SeqCst) {
            return Err(MockPinError);
        }
        Ok(self.high.load(Ordering::SeqCst))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ── Trace sink ────────────────────────────────────────────────

/// Text sink that notes, for every write, whether `line` was still pending.
pub struct WatchedTrace {
    line: MockFlag,
    writes: Vec<(String, bool)>,
}

impl WatchedTrace {
    pub fn new(line: &MockFlag) -> Self {
        Self {
            line: line.clone(),
            writes: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.writes.iter().map(|(s, _)| s.as_str()).collect()
    }

    /// Whether the line was pending during every write so far.
    pub fn written_while_pending(&self) -> bool {
        self.writes.iter().all(|&(_, pending)| pending)
    }
}

impl fmt::Write for WatchedTrace {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writes.push((s.to_owned(), self.line.is_pending()));
        Ok(())
    }
}
