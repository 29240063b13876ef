/// Duplex byte channel with a settable baud rate.
///
/// The TX line drives the 1-Wire bus and the RX line samples it, so every
/// byte written comes back on the read side once it has been clocked out.
pub trait Transport {
    /// Error reported by the underlying port.
    type Error;

    /// Switch the line speed. Takes effect for the next byte written.
    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error>;

    /// Write bytes, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;

    /// Read available bytes into `buf`, returning how many were stored.
    ///
    /// Blocks until at least one byte arrives or the transport gives up.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Discard any bytes received but not yet read.
    fn drain(&mut self) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        T::set_baud_rate(self, baud_rate)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        T::write(self, buf)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read(self, buf)
    }

    fn drain(&mut self) -> Result<(), Self::Error> {
        T::drain(self)
    }
}
