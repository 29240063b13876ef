use crate::{PresenceResponse, Transport, UartError, UartOneWire, UartResult};
use embedded_onewire::{OneWire, OneWireError, OneWireResult};

/// Reset pulse character, sent at the reset baud rate.
pub(crate) const RESET_PULSE: u8 = 0xf0;
/// Character that releases the bus for the whole slot: a write-1 or read slot.
pub(crate) const SLOT_HIGH: u8 = 0xff;
/// Character that holds the bus low for the whole slot: a write-0 slot.
pub(crate) const SLOT_LOW: u8 = 0x00;

/// Character sent for a logical bit.
#[inline]
pub(crate) const fn encode_bit(bit: bool) -> u8 {
    if bit { SLOT_HIGH } else { SLOT_LOW }
}

/// Bit sampled from a received slot character. Anything but an untouched
/// `0xff` means a device pulled the line low.
#[inline]
pub(crate) const fn decode_bit(slot: u8) -> bool {
    slot == SLOT_HIGH
}

impl<T: Transport> UartOneWire<T> {
    /// Run one time slot and return the bit sampled on the bus.
    ///
    /// Sending `true` doubles as a read slot: the sampled bit is whatever
    /// the device put on the bus.
    pub fn exchange_bit(&mut self, bit: bool) -> UartResult<bool, T::Error> {
        if !self.ready {
            return Err(UartError::Uninitialized);
        }
        let mut slot = [encode_bit(bit)];
        self.send(&slot)?;
        self.receive(&mut slot)?;
        Ok(decode_bit(slot[0]))
    }

    /// Run eight time slots carrying `byte`, least significant bit first,
    /// and return the byte sampled on the bus in the same bit order.
    ///
    /// With `0xff` this reads a byte from the device; with anything else the
    /// result should echo the input unless the bus is contended.
    pub fn exchange_byte(&mut self, byte: u8) -> UartResult<u8, T::Error> {
        if !self.ready {
            return Err(UartError::Uninitialized);
        }
        let mut slots = [SLOT_LOW; 8];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = encode_bit((byte >> i) & 0x01 == 0x01);
        }
        self.send(&slots)?;
        self.receive(&mut slots)?;
        let sampled = slots
            .iter()
            .rev()
            .fold(0u8, |acc, &slot| (acc << 1) | decode_bit(slot) as u8);
        Ok(sampled)
    }

    fn send(&mut self, buf: &[u8]) -> UartResult<(), T::Error> {
        let written = self.port.write(buf)?;
        if written != buf.len() {
            return Err(UartError::ShortWrite {
                expected: buf.len(),
                written,
            });
        }
        Ok(())
    }

    /// Read until `buf` is full. Each read either makes progress or ends the
    /// exchange, so the wait is bounded by the transport's own timeout.
    fn receive(&mut self, buf: &mut [u8]) -> UartResult<(), T::Error> {
        let mut received = 0;
        while received < buf.len() {
            let n = self.port.read(&mut buf[received..])?;
            if n == 0 {
                return Err(UartError::ReadLength {
                    expected: buf.len(),
                    received,
                });
            }
            received += n;
        }
        Ok(())
    }

    fn reset_slot(&mut self) -> UartResult<u8, T::Error> {
        self.port.set_baud_rate(self.rates.reset)?;
        self.port.drain()?;
        self.send(&[RESET_PULSE])?;
        let mut reply = [0; 1];
        self.receive(&mut reply)?;
        Ok(reply[0])
    }
}

impl<T: Transport> OneWire for UartOneWire<T> {
    type Status = PresenceResponse;

    type BusError = UartError<T::Error>;

    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        let sampled = self.reset_slot();
        // data rate comes back whatever happened during the reset slot
        let restored = self.port.set_baud_rate(self.rates.data);
        self.ready = restored.is_ok();
        let sampled = match (sampled, restored) {
            (Ok(sampled), Ok(())) => sampled,
            (Ok(_), Err(e)) => return Err(UartError::Io(e).into()),
            (Err(e), Ok(())) => return Err(e.into()),
            (Err(e), Err(_)) => {
                log::warn!("could not restore {} baud after failed reset", self.rates.data);
                return Err(e.into());
            }
        };
        log::trace!("reset: sampled {sampled:#04x}");
        PresenceResponse::classify(sampled)
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        let echoed = self.exchange_byte(byte)?;
        if echoed != byte {
            log::trace!("write: sent {byte:#04x}, echoed {echoed:#04x}");
            return Err(OneWireError::WriteMismatch { sent: byte, echoed });
        }
        Ok(())
    }

    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        Ok(self.exchange_byte(SLOT_HIGH)?)
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        let echoed = self.exchange_bit(bit)?;
        if echoed != bit {
            return Err(OneWireError::WriteMismatch {
                sent: bit as u8,
                echoed: echoed as u8,
            });
        }
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        Ok(self.exchange_bit(true)?)
    }
}
