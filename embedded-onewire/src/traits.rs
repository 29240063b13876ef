use crate::{OneWireResult, consts::ONEWIRE_SKIP_ROM_CMD};

/// Result of a bus reset.
pub trait OneWireStatus {
    /// A presence pulse was detected during the reset.
    fn presence(&self) -> bool;
    /// The bus was held low during the reset.
    fn shortcircuit(&self) -> bool;
}

/// Trait for 1-Wire communication.
/// This trait defines the basic operations required for 1-Wire communication, such as resetting the bus,
/// writing and reading bytes, and writing and reading bits.
pub trait OneWire {
    /// The status type returned by the reset operation.
    /// This type must implement the [OneWireStatus] trait.
    type Status: OneWireStatus;
    /// The error type returned by the operations of this trait.
    /// This type is used to indicate errors in the underlying hardware or communication.
    type BusError;

    /// Resets the 1-Wire bus and returns the status of the bus.
    ///
    /// # Returns
    /// A result containing the status of the bus after the reset operation.
    ///
    /// # Errors
    /// This method returns [NoDevicePresent](crate::OneWireError::NoDevicePresent),
    /// [ShortCircuit](crate::OneWireError::ShortCircuit) or
    /// [PresenceError](crate::OneWireError::PresenceError) when no valid presence
    /// pulse follows the reset, and [Other](crate::OneWireError::Other) when the
    /// underlying hardware fails.
    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Writes a byte to the 1-Wire bus.
    /// # Arguments
    /// * `byte` - The byte to write to the bus.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails, or
    /// [WriteMismatch](crate::OneWireError::WriteMismatch) if the implementation
    /// samples the bus while writing and reads back a different value.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError>;

    /// Reads a byte from the 1-Wire bus.
    /// # Returns
    /// Byte read from the bus.
    ///
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError>;

    /// Writes a single bit to the 1-Wire bus.
    /// # Arguments
    ///
    /// * `bit` - The bit to write.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Reads a single bit from the 1-Wire bus.
    /// # Returns
    /// The bit read from the bus.
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Fills `buf` with bytes read from the bus, in order.
    ///
    /// Stops at the first failed read.
    fn read_bytes(&mut self, buf: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        for b in buf.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(())
    }

    /// Addresses the only device on the bus.
    ///
    /// Resets the bus and sends the Skip ROM command. The next
    /// [`OneWire::write_byte`] is interpreted by the device as a function command.
    fn skip_rom(&mut self) -> OneWireResult<(), Self::BusError> {
        self.reset()?; // Reset the bus before addressing
        self.write_byte(ONEWIRE_SKIP_ROM_CMD)
    }
}
