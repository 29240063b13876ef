#![no_std]
#![deny(missing_docs)]

/*! # UART 1-Wire bridge
 *
 * Drives a 1-Wire bus through a plain UART, the way USB-serial temperature
 * probes do: the TX and RX lines are tied to the bus through an open-drain
 * stage, and every 1-Wire time slot is a single UART character.
 *
 * | Slot | Baud rate | Sent | Sampled |
 * |------|-----------|------|---------|
 * | Reset | 9600 | `0xf0` | `0xf0`: no device, `0x00`: short, `0x10..=0xe0`: presence |
 * | Write 1 / read | 115200 | `0xff` | `0xff`: 1, anything else: 0 |
 * | Write 0 | 115200 | `0x00` | `0x00` |
 *
 * The slot timing comes entirely from the character duration at the
 * selected baud rate; the driver never sleeps.
 */

pub use embedded_onewire::{OneWire, OneWireError, OneWireResult};
mod error;
mod onewire;
mod status;
mod traits;

pub use error::UartError;
pub use status::PresenceResponse;
pub use traits::Transport;

/// Results of UART-specific function calls.
pub type UartResult<T, E> = Result<T, UartError<E>>;

/// Baud rate of the reset slot. One `0xf0` character lasts long enough
/// to form the reset pulse and cover the presence window.
pub const RESET_BAUD_RATE: u32 = 9600;

/// Baud rate of the data slots. One character spans one 1-Wire time slot.
pub const DATA_BAUD_RATE: u32 = 115200;

/// The two baud rates the bridge switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaudRates {
    /// Rate used for the reset and presence slot.
    pub reset: u32,
    /// Rate used for every bit slot.
    pub data: u32,
}

impl Default for BaudRates {
    fn default() -> Self {
        Self {
            reset: RESET_BAUD_RATE,
            data: DATA_BAUD_RATE,
        }
    }
}

/// A 1-Wire bus master bit-banged over a UART.
///
/// Takes ownership of a byte [`Transport`] with a settable baud rate.
#[derive(Debug)]
pub struct UartOneWire<T> {
    pub(crate) port: T,
    pub(crate) rates: BaudRates,
    // set once a reset has left the transport at the data rate
    pub(crate) ready: bool,
}

/// Builder for creating a [`UartOneWire`] instance with custom configuration.
#[derive(Debug, Default)]
pub struct UartOneWireBuilder {
    pub(crate) rates: BaudRates,
}

impl UartOneWireBuilder {
    /// Sets the baud rates used for the reset and data slots.
    pub fn with_baud_rates(mut self, rates: BaudRates) -> Self {
        self.rates = rates;
        self
    }

    /// Builds a new `UartOneWire` instance.
    ///
    /// The transport is left at the reset baud rate, ready for the first
    /// [`reset`](OneWire::reset). Data slots are refused until then.
    pub fn build<T: Transport>(self, mut port: T) -> UartResult<UartOneWire<T>, T::Error> {
        port.set_baud_rate(self.rates.reset)?;
        Ok(UartOneWire {
            port,
            rates: self.rates,
            ready: false,
        })
    }
}

impl<T> UartOneWire<T> {
    /// Baud rates in use.
    pub fn baud_rates(&self) -> BaudRates {
        self.rates
    }

    /// Gives the transport back, ending the session.
    pub fn release(self) -> T {
        self.port
    }
}
