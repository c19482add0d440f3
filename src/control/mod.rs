// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Interrupt-Driven Control
//!
//! The two reactive pieces of the firmware. Both are hardware-independent and are driven by the
//! vector functions in `main.rs` through [`crate::irq::IrqSlot`].
//!
//! ## Modules
//!
//! - [`alternator`] - Swaps H-bridge direction on every alternation timer update.
//! - [`sampler`] - Reads and reports the monitored input on every EXTI edge.

pub mod alternator;
pub mod sampler;

pub use alternator::Alternator;
pub use sampler::{EdgeSampler, InputSnapshot, Level};
