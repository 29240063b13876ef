use std::{collections::VecDeque, io};

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_onewire::OneWireCrc;
use uart_onewire::{DATA_BAUD_RATE, RESET_BAUD_RATE, Transport};
use usbtemp_linux::{PortDetails, Probe, ProbeBuilder, ProbeError};

const ROM: [u8; 8] = [0x28, 0xff, 0x4c, 0x93, 0x60, 0x17, 0x05, 0x2d];

fn scratchpad() -> [u8; 9] {
    let mut pad = [0x90, 0x01, 0x4b, 0x46, 0x7f, 0xff, 0x0c, 0x10, 0x00];
    pad[8] = OneWireCrc::compute(&pad[..8]);
    pad
}

/// A DS18B20 wired to a UART, simulated one time slot at a time.
struct SimBus {
    baud: u32,
    rx: VecDeque<u8>,
    presence: u8,
    pad: [u8; 9],
    // bits the device still has to put on the bus
    out: VecDeque<bool>,
    bit: u8,
    current: u8,
    commands: Vec<u8>,
    resets: usize,
    collide_on: Option<u8>,
    max_read: usize,
    mute: bool,
}

impl SimBus {
    fn new() -> Self {
        Self {
            baud: 0,
            rx: VecDeque::new(),
            presence: 0x90,
            pad: scratchpad(),
            out: VecDeque::new(),
            bit: 0,
            current: 0,
            commands: Vec::new(),
            resets: 0,
            collide_on: None,
            max_read: usize::MAX,
            mute: false,
        }
    }

    fn transmit(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.out.extend((0..8).map(|i| (b >> i) & 1 == 1));
        }
    }

    fn slot(&mut self, slot: u8) -> u8 {
        if let Some(bit) = self.out.pop_front() {
            assert_eq!(slot, 0xff, "host must release the bus while the device talks");
            return if bit { 0xff } else { 0xf8 };
        }
        self.current |= ((slot == 0xff) as u8) << self.bit;
        self.bit += 1;
        if self.bit < 8 {
            return slot;
        }
        let byte = self.current;
        self.bit = 0;
        self.current = 0;
        self.commands.push(byte);
        match byte {
            0x33 => self.transmit(&ROM),
            0xbe => {
                let pad = self.pad;
                self.transmit(&pad);
            }
            _ => {}
        }
        if self.collide_on == Some(byte) {
            !slot
        } else {
            slot
        }
    }
}

impl Transport for SimBus {
    type Error = io::Error;

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        self.baud = baud_rate;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &b in buf {
            let reply = if self.baud == RESET_BAUD_RATE {
                assert_eq!(b, 0xf0);
                self.resets += 1;
                self.out.clear();
                self.bit = 0;
                self.current = 0;
                self.presence
            } else {
                assert_eq!(self.baud, DATA_BAUD_RATE);
                self.slot(b)
            };
            if !self.mute {
                self.rx.push_back(reply);
            }
        }
        Ok(buf.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.rx.is_empty() {
            return Err(io::ErrorKind::TimedOut.into());
        }
        let n = buf.len().min(self.max_read).min(self.rx.len());
        for (dst, src) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }

    fn drain(&mut self) -> Result<(), Self::Error> {
        self.rx.clear();
        Ok(())
    }
}

fn details() -> PortDetails {
    PortDetails {
        name: "/dev/ttyUSB0".into(),
        vid: 0x0403,
        pid: 0x6001,
        serial_number: Some("A10KZP45".into()),
    }
}

fn attach(sim: &mut SimBus) -> Probe<&mut SimBus, NoopDelay> {
    ProbeBuilder::default()
        .attach(details(), sim, NoopDelay::new())
        .unwrap()
}

#[test]
fn identity() {
    let mut sim = SimBus::new();
    let probe = attach(&mut sim);
    assert_eq!(probe.name(), "/dev/ttyUSB0");
    assert_eq!(probe.id(), "0403:6001");
    assert_eq!(probe.serial_number(), "A10KZP45");
    assert!(probe.is_open());
    drop(probe);
    // ready for the first reset
    assert_eq!(sim.baud, RESET_BAUD_RATE);
}

#[test]
fn missing_serial_number_is_empty() {
    let mut sim = SimBus::new();
    let probe = ProbeBuilder::default()
        .attach(
            PortDetails {
                serial_number: None,
                ..details()
            },
            &mut sim,
            NoopDelay::new(),
        )
        .unwrap();
    assert_eq!(probe.serial_number(), "");
}

#[test]
fn rom() {
    // Read ROM hands the code back without checking its CRC byte
    assert!(!OneWireCrc::validate(&ROM));
    let mut sim = SimBus::new();
    let rom = attach(&mut sim).rom().unwrap();
    assert_eq!(rom, "28ff4c936017052d");
    assert_eq!(sim.commands, [0x33]);
    assert_eq!(sim.resets, 1);
    assert_eq!(sim.baud, DATA_BAUD_RATE);
}

#[test]
fn temperature() {
    let mut sim = SimBus::new();
    let mut probe = attach(&mut sim);
    assert_eq!(probe.temperature(false).unwrap(), 25.0);
    assert_eq!(probe.temperature(true).unwrap(), 77.0);
    drop(probe);
    assert_eq!(sim.commands, [0xcc, 0x44, 0xcc, 0xbe, 0xcc, 0x44, 0xcc, 0xbe]);
    assert_eq!(sim.resets, 4);
}

#[test]
fn partial_reads() {
    let mut sim = SimBus::new();
    sim.max_read = 3;
    let mut probe = attach(&mut sim);
    assert_eq!(probe.rom().unwrap(), "28ff4c936017052d");
    assert_eq!(probe.temperature(false).unwrap(), 25.0);
}

#[test]
fn crc_failure() {
    let mut sim = SimBus::new();
    sim.pad[8] ^= 0x5a;
    let err = attach(&mut sim).temperature(false).unwrap_err();
    assert!(matches!(err, ProbeError::CrcValidation));
}

#[test]
fn write_mismatch_stops_conversion() {
    let mut sim = SimBus::new();
    sim.collide_on = Some(0x44);
    let err = attach(&mut sim).temperature(false).unwrap_err();
    assert!(matches!(
        err,
        ProbeError::WriteMismatch {
            sent: 0x44,
            echoed: 0xc4
        }
    ));
    assert_eq!(sim.commands, [0xcc, 0x44]);
    assert_eq!(sim.resets, 1);
}

#[test]
fn reset_failures() {
    for presence in [0xf0, 0x00, 0x05] {
        let mut sim = SimBus::new();
        sim.presence = presence;
        let err = attach(&mut sim).rom().unwrap_err();
        match presence {
            0xf0 => assert!(matches!(err, ProbeError::NoDevicePresent)),
            0x00 => assert!(matches!(err, ProbeError::ShortCircuit)),
            _ => assert!(matches!(err, ProbeError::PresenceError(0x05))),
        }
        assert!(sim.commands.is_empty());
        // back at the data rate after the failed reset
        assert_eq!(sim.baud, DATA_BAUD_RATE);
    }
}

#[test]
fn silent_transport() {
    let mut sim = SimBus::new();
    sim.mute = true;
    let err = attach(&mut sim).rom().unwrap_err();
    assert!(matches!(&err, ProbeError::Transport(e) if e.kind() == io::ErrorKind::TimedOut));
}

#[test]
fn closed_probe() {
    let mut sim = SimBus::new();
    let mut probe = attach(&mut sim);
    probe.close().unwrap();
    assert!(!probe.is_open());
    assert!(matches!(probe.rom(), Err(ProbeError::Closed)));
    assert!(matches!(probe.temperature(true), Err(ProbeError::Closed)));
    probe.close().unwrap();
    drop(probe);
    assert_eq!(sim.resets, 0);
}
