use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use usbtemp_linux::ProbeBuilder;

/// Read the ROM id and temperature of a USB-serial DS18B20 probe
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port name where the probe is connected (e.g., /dev/ttyUSB0)
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    port: String,
    /// Report degrees Celsius instead of Fahrenheit
    #[arg(short, long)]
    celsius: bool,
    /// Serial read timeout in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    timeout_ms: u64,
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut probe = ProbeBuilder::default()
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .open(&args.port)
        .context("Open() failed")?;
    let rom = probe.rom().context("ROM probe failed")?;
    let temp = probe
        .temperature(!args.celsius)
        .context("Temperature probe failed")?;
    log::info!(
        "\nName: {}\nSerial: {}\nRom: {}\nTemperature: {:.3}",
        probe.name(),
        probe.serial_number(),
        rom,
        temp
    );
    probe.close()?;
    Ok(())
}

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // Parse command line arguments
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
