//! Serial port selection.

use serialport::{SerialPortInfo, SerialPortType};

use crate::ProbeError;

/// Identity of the USB-serial adapter a probe is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDetails {
    pub name: String,
    pub vid: u16,
    pub pid: u16,
    pub serial_number: Option<String>,
}

impl PortDetails {
    /// `vid:pid`, four lowercase hex digits each.
    pub fn id(&self) -> String {
        format!("{:04x}:{:04x}", self.vid, self.pid)
    }
}

/// Look `port_name` up among the serial ports of this machine.
pub fn resolve(port_name: &str) -> Result<PortDetails, ProbeError> {
    let ports = serialport::available_ports().map_err(ProbeError::PortEnumeration)?;
    log::debug!("{} serial ports available", ports.len());
    select_port(ports, port_name)
}

/// Pick `port_name` out of `ports`. The port must be a USB port.
///
/// When the name is listed more than once, the last entry wins.
pub fn select_port(ports: Vec<SerialPortInfo>, port_name: &str) -> Result<PortDetails, ProbeError> {
    if ports.is_empty() {
        return Err(ProbeError::NoPorts);
    }
    let port = ports
        .into_iter()
        .rfind(|p| p.port_name == port_name)
        .ok_or_else(|| ProbeError::PortNotFound(port_name.to_owned()))?;
    match port.port_type {
        SerialPortType::UsbPort(info) => Ok(PortDetails {
            name: port.port_name,
            vid: info.vid,
            pid: info.pid,
            serial_number: info.serial_number,
        }),
        _ => Err(ProbeError::NotUsb(port.port_name)),
    }
}
