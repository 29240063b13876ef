use embedded_onewire::{OneWireError, OneWireResult, OneWireStatus};

use crate::onewire::RESET_PULSE;

/// Lowest sampled value accepted as a presence pulse.
pub(crate) const PRESENCE_MIN: u8 = 0x10;
/// Highest sampled value accepted as a presence pulse.
pub(crate) const PRESENCE_MAX: u8 = 0xe0;

/// Character sampled on RX while the reset pulse was on the bus.
///
/// A device answering the reset pulls the line low part way through the
/// `0xf0` character, which clears some of its high bits. Only responses
/// that look like a presence pulse can be constructed through
/// [`classify`](PresenceResponse::classify).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceResponse(u8);

impl PresenceResponse {
    /// Classify the sampled reset character.
    ///
    /// # Errors
    /// * `0xf0`: the character came back untouched, [`OneWireError::NoDevicePresent`].
    /// * `0x00`: the line is stuck low, [`OneWireError::ShortCircuit`].
    /// * outside `0x10..=0xe0`: [`OneWireError::PresenceError`] carrying the value.
    pub fn classify<E>(sample: u8) -> OneWireResult<Self, E> {
        match sample {
            RESET_PULSE => Err(OneWireError::NoDevicePresent),
            0x00 => Err(OneWireError::ShortCircuit),
            PRESENCE_MIN..=PRESENCE_MAX => Ok(Self(sample)),
            other => Err(OneWireError::PresenceError(other)),
        }
    }

    /// Raw sampled value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl OneWireStatus for PresenceResponse {
    fn presence(&self) -> bool {
        (PRESENCE_MIN..=PRESENCE_MAX).contains(&self.0)
    }

    fn shortcircuit(&self) -> bool {
        self.0 == 0x00
    }
}
