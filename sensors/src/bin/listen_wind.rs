//! Listen to a live NMEA wind instrument and print decoded measurements.
//!
//! Opens the given serial port, polls the wind vane backend at the
//! scheduler cadence, and logs direction/speed along with decoder drop
//! counters. Useful for bench-checking an instrument before it is wired
//! into the autopilot.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use sensors::byte_source::SerialByteSource;
use sensors::windvane::{NmeaWindVane, WindVaneBackend};
use tracing::info;

/// Default NMEA 0183 baud rate
const DEFAULT_BAUD: u32 = 4800;

/// NMEA wind instrument listener
#[derive(Parser, Debug)]
#[command(name = "listen_wind")]
#[command(about = "Decode MWV/XDR sentences from a serial wind instrument")]
struct Args {
    /// Serial device path (e.g. /dev/ttyUSB0)
    port: String,

    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Poll interval in milliseconds (~20 Hz matches the autopilot scheduler)
    #[arg(short, long, default_value = "50")]
    interval_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let source = SerialByteSource::open(&args.port, args.baud)?;
    let mut backend = NmeaWindVane::new(source);
    backend.init()?;

    info!(port = %args.port, baud = args.baud, "listening for wind sentences");

    loop {
        let direction = backend.update_direction();
        let speed = backend.update_speed();
        let stats = backend.stats();

        info!(
            "wind {direction:6.1} deg {speed:5.2} m/s (accepted {}, checksum failures {}, unrecognized {})",
            stats.accepted, stats.checksum_failures, stats.unrecognized
        );

        thread::sleep(Duration::from_millis(args.interval_ms));
    }
}
