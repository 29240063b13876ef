#![no_std]
//! Driver for a single DS18B20 temperature sensor.
//!
//! The sensor is always addressed with Skip ROM, so it must be the only
//! device on the bus.
use core::fmt;
use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireCrc, OneWireError, OneWireResult, consts::ONEWIRE_READ_ROM_CMD};
use fixed::types::U12F4;

/// Worst-case conversion time the driver waits for, in microseconds.
pub const DEFAULT_CONVERSION_TIME_US: u32 = 1_000_000;

const DS18B20_START_CONV: u8 = 0x44;
const DS18B20_READ_SCRATCH: u8 = 0xbe;

/// Temperature register with 1/16 °C resolution.
pub type Temperature = U12F4;

#[derive(Debug, Clone, Copy)]
pub struct Ds18b20 {
    conversion_time_us: u32,
}

impl Default for Ds18b20 {
    fn default() -> Self {
        Self::new()
    }
}

impl Ds18b20 {
    #[inline]
    pub const fn family() -> u8 {
        0x28
    }

    pub const fn new() -> Self {
        Self {
            conversion_time_us: DEFAULT_CONVERSION_TIME_US,
        }
    }

    /// Sets how long [`wait_for_conversion`](Self::wait_for_conversion) blocks.
    pub fn with_conversion_time_us(mut self, us: u32) -> Self {
        self.conversion_time_us = us;
        self
    }

    pub fn conversion_time_us(&self) -> u32 {
        self.conversion_time_us
    }

    /// Read the 64-bit ROM code. The embedded CRC is not checked.
    pub fn read_rom<O: OneWire>(&self, bus: &mut O) -> OneWireResult<Rom, O::BusError> {
        bus.reset()?;
        bus.write_byte(ONEWIRE_READ_ROM_CMD)?;
        let mut rom = [0; 8];
        bus.read_bytes(&mut rom)?;
        Ok(Rom(rom))
    }

    /// Start a conversion and block until it is guaranteed to be done.
    pub fn trigger_temperature_conversion<O: OneWire, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> OneWireResult<(), O::BusError> {
        bus.skip_rom()?;
        bus.write_byte(DS18B20_START_CONV)?; // start temperature conversion
        self.wait_for_conversion(delay);
        Ok(())
    }

    /// Waits out the conversion. The bus is not polled for completion.
    pub fn wait_for_conversion<D: DelayNs>(&self, delay: &mut D) {
        log::trace!("waiting {} us for conversion", self.conversion_time_us);
        delay.delay_us(self.conversion_time_us);
    }

    /// Read the scratchpad and check its CRC.
    pub fn read_scratchpad<O: OneWire>(&self, bus: &mut O) -> OneWireResult<Scratchpad, O::BusError> {
        bus.skip_rom()?;
        bus.write_byte(DS18B20_READ_SCRATCH)?;
        let mut buf = [0; 9];
        bus.read_bytes(&mut buf)?;
        let pad = Scratchpad(buf);
        if !pad.is_valid() {
            return Err(OneWireError::InvalidCrc);
        }
        Ok(pad)
    }

    /// Convert, wait, then read back the temperature register.
    pub fn read_temperature<O: OneWire, D: DelayNs>(
        &self,
        bus: &mut O,
        delay: &mut D,
    ) -> OneWireResult<Temperature, O::BusError> {
        self.trigger_temperature_conversion(bus, delay)?;
        Ok(self.read_scratchpad(bus)?.temperature())
    }
}

/// 64-bit ROM code, in the order it comes off the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rom(pub [u8; 8]);

impl Rom {
    pub fn family(&self) -> u8 {
        self.0[0]
    }

    /// The last byte is the CRC of the first seven.
    pub fn is_valid(&self) -> bool {
        OneWireCrc::validate(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for Rom {
    fn from(value: [u8; 8]) -> Self {
        Self(value)
    }
}

/// Lowercase hex, two digits per byte, bus order.
impl fmt::Display for Rom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// The 9-byte scratchpad.
///
/// | Byte | Content |
/// |------|---------|
/// | 0-1 | Temperature register, little-endian |
/// | 2-7 | Alarm thresholds, configuration, reserved |
/// | 8 | CRC-8 of bytes 0-7 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scratchpad(pub [u8; 9]);

impl Scratchpad {
    pub fn is_valid(&self) -> bool {
        OneWireCrc::compute(&self.0[..8]) == self.0[8]
    }

    /// The temperature register as an unsigned count of 1/16 °C.
    ///
    /// Only bytes 0 and 1 contribute; everything past the register is
    /// ignored.
    pub fn temperature(&self) -> Temperature {
        Temperature::from_le_bytes([self.0[0], self.0[1]])
    }

    pub fn as_bytes(&self) -> &[u8; 9] {
        &self.0
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    (9.0 * celsius) / 5.0 + 32.0
}
