// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # H-Bridge PWM Firmware
//!
//! Firmware for an STM32F767ZI that drives an LED and a DC/servo motor (through a two-input
//! H-bridge) with timer PWM, alternates the motor direction from a slow timer interrupt, and
//! reports the level of an input pin on every edge.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Timer prescaler/period pairs, duties, priorities, EXTI routing |
//! | [`irq`] | Interrupt flag capability and critical-section handler slots |
//! | [`hw`] | MCU-level wrappers around timers, EXTI, GPIO and USART |
//! | [`drivers`] | Device-level drivers (two-input H-bridge) |
//! | [`control`] | Interrupt-driven direction alternator and edge sampler |
//! | `board` | One-time peripheral bring-up (MCU target only) |
//!
//! Everything except `board` and the register-level `hw` modules builds on the host, so the
//! control logic is tested with `cargo test`.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
pub mod hw;
pub mod irq;

#[cfg(target_os = "none")]
pub mod board;

#[cfg(test)]
mod mock;
