#![no_std]
#![deny(missing_docs)]
//! # embedded-onewire
//! A no-std implementation of the 1-Wire protocol.
//!
//! This crate provides a trait-based interface for 1-Wire communication, allowing you to implement the protocol on various platforms.
//! [OneWire] trait defines the basic operations required for 1-Wire communication, such as resetting the bus, writing and reading bytes, and writing and reading bits.
//!
//! The bus is addressed in single-drop mode only: every transaction starts with a reset followed by
//! either [Read ROM](consts::ONEWIRE_READ_ROM_CMD) or [Skip ROM](consts::ONEWIRE_SKIP_ROM_CMD).
//! Transfers are validated with the Dallas/Maxim CRC-8 in [OneWireCrc].

pub mod consts;
mod error;
mod traits;
mod utils;
pub use error::OneWireError;
pub use traits::{OneWire, OneWireStatus};
pub use utils::OneWireCrc;

/// Error type for 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;
