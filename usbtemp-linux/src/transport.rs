use std::{
    io::{self, Read, Write},
    time::Duration,
};

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use uart_onewire::Transport;

/// [`Transport`] over an OS serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `path` as 8N1 without flow control.
    ///
    /// `timeout` bounds every read; a probe that stops answering surfaces
    /// as a [`TimedOut`](io::ErrorKind::TimedOut) error.
    pub fn open(path: &str, baud_rate: u32, timeout: Duration) -> serialport::Result<Self> {
        let port = serialport::new(path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(timeout)
            .open()?;
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    type Error = io::Error;

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        Ok(self.port.set_baud_rate(baud_rate)?)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.port.write(buf)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.port.read(buf)
    }

    fn drain(&mut self) -> Result<(), Self::Error> {
        Ok(self.port.clear(ClearBuffer::Input)?)
    }
}
