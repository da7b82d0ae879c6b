//! Game core for a two-player chess clock.
//!
//! # Overview
//!
//! Each player owns a minutes/seconds countdown. Pressing your button hands the
//! move to the opponent and starts their clock. The core covers:
//! - The five-state game lifecycle (idle, running, blanking pause, result display, finished)
//! - The once-per-second decrement with minute borrow, driven by a 2 Hz tick
//! - The low-time blink warning and the end-of-game alarm countdown
//! - Persistence of *elapsed* time per player so it survives a power cycle
//! - The serial report of elapsed time
//!
//! The board-specific pieces (GPIO, EXTI buttons, data EEPROM, UART) live in
//! the firmware binary and talk to the core through `embedded-storage`,
//! `embedded-io`, `embedded-hal` and the [`display::SegmentSink`] trait.
//!
//! # Building
//!
//! Host (tests): `cargo test`
//!
//! Firmware: `cargo build --release --target thumbv6m-none-eabi --features hardware`
//!
//! # Module Organization
//!
//! - [`game`] - The [`GameContext`] state machine and its event/tick handlers
//! - [`clock`] - Per-player countdown and elapsed-time arithmetic
//! - [`time_control`] - Selectable game budgets and the selector mapping
//! - [`persist`] - Elapsed-time records in byte-addressable storage
//! - [`display`] - Digit patterns, frames and the multiplex cursor
//! - [`alarm`] - Square-wave tone synthesis on an output pin
//! - [`report`] - Serial text report of elapsed time
//! - [`config`] - Compile-time game tunables

#![cfg_attr(not(test), no_std)]

pub mod alarm;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod persist;
pub mod report;
pub mod time_control;

pub use clock::{Countdown, Elapsed, PlayerClock};
pub use config::GameConfig;
pub use error::Error;
pub use game::{Event, GameContext, GameState, Player};
pub use time_control::{SelectorLevel, TimeControl};
