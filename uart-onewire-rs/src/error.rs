#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// UART bridge errors
pub enum UartError<E> {
    /// Transport errors.
    Io(E),
    /// The transport accepted fewer bytes than requested.
    ShortWrite {
        /// Bytes handed to the transport.
        expected: usize,
        /// Bytes the transport reported as written.
        written: usize,
    },
    /// The transport stopped delivering bytes before the reply was complete.
    ReadLength {
        /// Bytes the reply should contain.
        expected: usize,
        /// Bytes received before the transport returned nothing.
        received: usize,
    },
    /// A data slot was requested before the first reset put the transport
    /// at the data rate.
    Uninitialized,
}

impl<E> From<E> for UartError<E> {
    fn from(value: E) -> Self {
        Self::Io(value)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for UartError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::ShortWrite { expected, written } => {
                write!(f, "# of bytes written incorrect: {written} of {expected}")
            }
            Self::ReadLength { expected, received } => {
                write!(f, "invalid reply length: {received} of {expected}")
            }
            Self::Uninitialized => write!(f, "bus not reset yet"),
        }
    }
}
