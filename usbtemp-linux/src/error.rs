use std::io;

use embedded_onewire::OneWireError;
use thiserror::Error;
use uart_onewire::UartError;

/// Everything that can go wrong while talking to a probe.
///
/// Every error aborts the command in flight. Nothing is retried.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("enumerating error: {0}")]
    PortEnumeration(#[source] serialport::Error),
    #[error("no valid ports found")]
    NoPorts,
    #[error("{0}: no such port")]
    PortNotFound(String),
    #[error("{0} is not USB")]
    NotUsb(String),
    #[error("failed to open port: {0}")]
    Open(#[source] serialport::Error),
    #[error("transport: {0}")]
    Transport(#[from] io::Error),
    #[error("# of bytes written incorrect: {written} of {expected}")]
    ShortWrite { expected: usize, written: usize },
    #[error("invalid reply length: {received} of {expected}")]
    ReadLength { expected: usize, received: usize },
    #[error("bus not reset yet")]
    BusUninitialized,
    #[error("reset failed: no device present")]
    NoDevicePresent,
    #[error("reset failed: short circuit")]
    ShortCircuit,
    #[error("reset failed, presence error: {0:#04x}")]
    PresenceError(u8),
    #[error("read byte does not match write: sent {sent:#04x}, got {echoed:#04x}")]
    WriteMismatch { sent: u8, echoed: u8 },
    #[error("CRC validation failed")]
    CrcValidation,
    #[error("probe is closed")]
    Closed,
}

impl ProbeError {
    /// The port could not be selected, as opposed to failing once in use.
    pub fn is_port_resolution(&self) -> bool {
        matches!(
            self,
            Self::PortEnumeration(_) | Self::NoPorts | Self::PortNotFound(_) | Self::NotUsb(_)
        )
    }
}

impl From<UartError<io::Error>> for ProbeError {
    fn from(value: UartError<io::Error>) -> Self {
        match value {
            UartError::Io(e) => Self::Transport(e),
            UartError::ShortWrite { expected, written } => Self::ShortWrite { expected, written },
            UartError::ReadLength { expected, received } => Self::ReadLength { expected, received },
            UartError::Uninitialized => Self::BusUninitialized,
        }
    }
}

impl From<OneWireError<UartError<io::Error>>> for ProbeError {
    fn from(value: OneWireError<UartError<io::Error>>) -> Self {
        match value {
            OneWireError::Other(e) => e.into(),
            OneWireError::NoDevicePresent => Self::NoDevicePresent,
            OneWireError::ShortCircuit => Self::ShortCircuit,
            OneWireError::PresenceError(v) => Self::PresenceError(v),
            OneWireError::WriteMismatch { sent, echoed } => Self::WriteMismatch { sent, echoed },
            OneWireError::InvalidCrc => Self::CrcValidation,
        }
    }
}
