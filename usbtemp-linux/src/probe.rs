use std::{io, time::Duration};

use ds18b20::{DEFAULT_CONVERSION_TIME_US, Ds18b20, celsius_to_fahrenheit};
use embedded_hal::delay::DelayNs;
use linux_embedded_hal::Delay;
use uart_onewire::{BaudRates, Transport, UartOneWire, UartOneWireBuilder};

use crate::{PortDetails, ProbeError, SerialTransport, port};

/// Read timeout of the serial port.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Builder for opening a [`Probe`] with custom configuration.
#[derive(Debug, Clone)]
pub struct ProbeBuilder {
    timeout: Duration,
    rates: BaudRates,
    conversion_time_us: u32,
}

impl Default for ProbeBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            rates: BaudRates::default(),
            conversion_time_us: DEFAULT_CONVERSION_TIME_US,
        }
    }
}

impl ProbeBuilder {
    /// Sets the serial read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the reset and data baud rates.
    pub fn with_baud_rates(mut self, rates: BaudRates) -> Self {
        self.rates = rates;
        self
    }

    /// Sets how long a temperature conversion is waited for.
    pub fn with_conversion_time_us(mut self, us: u32) -> Self {
        self.conversion_time_us = us;
        self
    }

    /// Resolve `port_name` to a USB serial port and open it.
    pub fn open(&self, port_name: &str) -> Result<Probe<SerialTransport, Delay>, ProbeError> {
        let details = port::resolve(port_name)?;
        let transport = SerialTransport::open(&details.name, self.rates.reset, self.timeout)
            .map_err(ProbeError::Open)?;
        log::debug!("opened {} ({})", details.name, details.id());
        self.attach(details, transport, Delay)
    }

    /// Build a probe on an already open transport.
    pub fn attach<T, D>(
        &self,
        details: PortDetails,
        transport: T,
        delay: D,
    ) -> Result<Probe<T, D>, ProbeError>
    where
        T: Transport<Error = io::Error>,
        D: DelayNs,
    {
        let id = details.id();
        let bus = UartOneWireBuilder::default()
            .with_baud_rates(self.rates)
            .build(transport)?;
        Ok(Probe {
            name: details.name,
            id,
            serial_number: details.serial_number.unwrap_or_default(),
            bus: Some(bus),
            sensor: Ds18b20::new().with_conversion_time_us(self.conversion_time_us),
            delay,
        })
    }
}

/// A DS18B20 probe behind a USB-serial adapter.
///
/// Each command resets the bus first. Commands take `&mut self`, so a
/// probe runs one command at a time.
pub struct Probe<T, D> {
    name: String,
    id: String,
    serial_number: String,
    bus: Option<UartOneWire<T>>,
    sensor: Ds18b20,
    delay: D,
}

impl Probe<SerialTransport, Delay> {
    /// Open the probe on `port_name` with default settings.
    pub fn open(port_name: &str) -> Result<Self, ProbeError> {
        ProbeBuilder::default().open(port_name)
    }
}

impl<T: Transport<Error = io::Error>, D: DelayNs> Probe<T, D> {
    /// Port name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adapter `vid:pid`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adapter serial number, empty when it reports none.
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn is_open(&self) -> bool {
        self.bus.is_some()
    }

    /// ROM code as 16 lowercase hex digits.
    pub fn rom(&mut self) -> Result<String, ProbeError> {
        let bus = self.bus.as_mut().ok_or(ProbeError::Closed)?;
        let rom = self.sensor.read_rom(bus)?;
        log::debug!("{}: rom {rom}", self.name);
        Ok(rom.to_string())
    }

    /// Convert and read the temperature, in °F when `fahrenheit` is set
    /// and °C otherwise. Blocks for the conversion time.
    pub fn temperature(&mut self, fahrenheit: bool) -> Result<f32, ProbeError> {
        let bus = self.bus.as_mut().ok_or(ProbeError::Closed)?;
        let celsius: f32 = self
            .sensor
            .read_temperature(bus, &mut self.delay)?
            .to_num();
        log::debug!("{}: {celsius} C", self.name);
        if fahrenheit {
            Ok(celsius_to_fahrenheit(celsius))
        } else {
            Ok(celsius)
        }
    }

    /// Release the port. Closing a closed probe does nothing.
    pub fn close(&mut self) -> Result<(), ProbeError> {
        if let Some(bus) = self.bus.take() {
            drop(bus.release());
            log::debug!("closed {}", self.name);
        }
        Ok(())
    }
}
