// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt sources and handler slots.
//!
//! - [`IrqFlag`] is the check-and-clear capability of a hardware interrupt source (timer update
//!   flag, EXTI pending bit, ...).
//! - [`IrqSlot`] holds the state a vector function works on. `main` installs the handler state
//!   once bring-up is done and the vector borrows it inside a critical section:
//!
//! ```ignore
//! static MOTOR: IrqSlot<Motor> = IrqSlot::new();
//!
//! #[interrupt]
//! fn TIM3() {
//!     MOTOR.with(|motor| motor.on_update().ok());
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

/// Pending flag of an interrupt source.
pub trait IrqFlag {
    /// Whether the source has latched an event that has not been acknowledged yet.
    fn is_pending(&self) -> bool;

    /// Acknowledge the latched event.
    fn clear_pending(&mut self);
}

/// Value to write to a 16-bit rc_w0 status register to clear only `flags`.
///
/// Every other bit is written as 1, which the hardware ignores, so flags that latch between the
/// handler's check and its acknowledge are kept.
#[inline]
pub const fn rc_w0_clear(flags: u32) -> u32 {
    0xFFFF & !flags
}

/// Critical-section protected storage for one handler's state.
pub struct IrqSlot<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> IrqSlot<T> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store handler state, returning whatever was installed before.
    pub fn install(&self, handler: T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(handler))
    }

    /// Remove the handler state. Later invocations become no-ops.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the installed state with interrupts masked.
    ///
    /// Returns `None` if nothing is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<T> Default for IrqSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
