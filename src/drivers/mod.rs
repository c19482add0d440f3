// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-level drivers that sit above the raw `hw/` layer and below the
//! interrupt-driven control logic.
//!
//! ## Existing drivers
//!
//! - [`hbridge`] – Two-input PWM H-bridge with an enable line

pub mod hbridge;

pub use hbridge::{Direction, HBridge};
