/// Reflected form of the Dallas/Maxim polynomial x^8 + x^5 + x^4 + 1.
const CRC8_FEEDBACK: u8 = 0x8c;

#[cfg(feature = "crc-table")]
const CRC8_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = crc8_bitwise(0, i as u8);
        i += 1;
    }
    table
};

/// Shifts one byte through the CRC register, least significant bit first.
const fn crc8_bitwise(mut crc: u8, mut byte: u8) -> u8 {
    let mut i = 0;
    while i < 8 {
        let mix = (crc ^ byte) & 0x01;
        crc >>= 1;
        if mix != 0 {
            crc ^= CRC8_FEEDBACK;
        }
        byte >>= 1;
        i += 1;
    }
    crc
}

#[derive(Debug, Default)]
/// Calculate CRC-8 used in 1-Wire communications.
pub struct OneWireCrc(u8);

impl OneWireCrc {
    /// Get the current CRC value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Update the CRC with the incoming byte.
    pub fn update(&mut self, byte: u8) {
        #[cfg(feature = "crc-table")]
        {
            self.0 = CRC8_TABLE[(self.0 ^ byte) as usize];
        }
        #[cfg(not(feature = "crc-table"))]
        {
            self.0 = crc8_bitwise(self.0, byte);
        }
    }

    /// Compute the CRC of a sequence of bytes, starting from a zero seed.
    pub fn compute(sequence: &[u8]) -> u8 {
        let mut crc = OneWireCrc(0);
        for &byte in sequence.iter() {
            crc.update(byte);
        }
        crc.0
    }

    /// Validate a sequence of bytes where the last byte is the 1-Wire CRC of
    /// the previous bytes.
    pub fn validate(sequence: &[u8]) -> bool {
        // If the last byte is the CRC of the others, the result should be 0
        Self::compute(sequence) == 0x0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_rom_crc() {
        // Application note 27 example ROM
        let rom = [0x02, 0x1c, 0xb8, 0x01, 0x00, 0x00, 0x00, 0xa2];
        assert_eq!(OneWireCrc::compute(&rom[..7]), 0xa2);
        assert!(OneWireCrc::validate(&rom));
    }

    #[test]
    fn scratchpad_crc() {
        let mut pad = [0x90, 0x01, 0x4b, 0x46, 0x7f, 0xff, 0x0c, 0x10, 0x00];
        pad[8] = OneWireCrc::compute(&pad[..8]);
        assert!(OneWireCrc::validate(&pad));
        pad[8] ^= 0x01;
        assert!(!OneWireCrc::validate(&pad));
    }

    #[test]
    fn appended_crc_validates() {
        for _ in 0..1000 {
            let mut seq: [u8; 9] = rand::random();
            seq[8] = OneWireCrc::compute(&seq[..8]);
            assert!(OneWireCrc::validate(&seq));
            let flip = rand::random::<u8>() % 8;
            let bit = 1 << (rand::random::<u8>() % 8);
            seq[flip as usize] ^= bit;
            assert!(!OneWireCrc::validate(&seq));
        }
    }

    #[test]
    fn table_matches_bitwise() {
        for seed in 0..=255u8 {
            for byte in 0..=255u8 {
                let mut crc = OneWireCrc(seed);
                crc.update(byte);
                assert_eq!(crc.value(), crc8_bitwise(seed, byte));
            }
        }
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(OneWireCrc::compute(&[]), 0);
        assert!(OneWireCrc::validate(&[]));
    }
}
