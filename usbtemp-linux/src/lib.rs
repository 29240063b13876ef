//! # usbtemp
//!
//! Host side of a USB-serial DS18B20 probe: the adapter bit-bangs the
//! 1-Wire bus through its UART, [`uart_onewire`] turns that into a 1-Wire
//! master, and [`ds18b20`] speaks to the sensor.
//!
//! ```no_run
//! let mut probe = usbtemp_linux::Probe::open("/dev/ttyUSB0")?;
//! println!("{} {}", probe.rom()?, probe.temperature(false)?);
//! probe.close()?;
//! # Ok::<(), usbtemp_linux::ProbeError>(())
//! ```

mod error;
pub mod port;
mod probe;
mod transport;

pub use error::ProbeError;
pub use port::PortDetails;
pub use probe::{DEFAULT_TIMEOUT, Probe, ProbeBuilder};
pub use transport::SerialTransport;
pub use uart_onewire::BaudRates;
