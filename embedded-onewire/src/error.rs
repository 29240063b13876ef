/// One wire communication error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying hardware.
    Other(E),
    /// Indicates that no device is present on the bus.
    NoDevicePresent,
    /// Indicates that a short circuit was detected on the bus.
    ShortCircuit,
    /// The presence response could not be classified. Carries the sampled value.
    PresenceError(u8),
    /// The value sampled back from the bus during a write differs from the value sent.
    WriteMismatch {
        /// Value put on the bus.
        sent: u8,
        /// Value read back while sending.
        echoed: u8,
    },
    /// Computed CRC of the received data is invalid.
    InvalidCrc,
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Other(other)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for OneWireError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Other(e) => write!(f, "bus error: {e}"),
            Self::NoDevicePresent => f.write_str("no device present"),
            Self::ShortCircuit => f.write_str("short circuit"),
            Self::PresenceError(v) => write!(f, "presence error: {v:#04x}"),
            Self::WriteMismatch { sent, echoed } => {
                write!(f, "read byte does not match write: sent {sent:#04x}, got {echoed:#04x}")
            }
            Self::InvalidCrc => f.write_str("CRC validation failed"),
        }
    }
}
