//! Command constants for 1-Wire communication.

/// Command to read the 64-bit ROM code of the only device on the bus.
///
/// The device answers with 8 bytes: family code, 48-bit serial number
/// and the CRC-8 of the previous 7 bytes. The command yields garbage
/// when more than one device is attached.
pub const ONEWIRE_READ_ROM_CMD: u8 = 0x33;

/// Command to skip ROM address in 1-Wire communication (non-overdrive mode)
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;
