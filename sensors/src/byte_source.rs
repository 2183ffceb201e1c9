//! Non-blocking byte sources feeding sensor backends.
//!
//! A byte source yields no more than what has physically arrived since it
//! was last drained; it never blocks waiting for more. Backends drain a
//! source to exhaustion on every scheduler tick.

use std::collections::VecDeque;

/// Capability exposed by a hardware connection: consume the next byte if
/// one has arrived.
pub trait ByteSource {
    /// The next available byte, or `None` when nothing has arrived.
    /// Never blocks.
    fn next_byte(&mut self) -> Option<u8>;
}

/// In-memory byte source for bench tests and capture replays.
///
/// Yields the scripted bytes in order, then `None`. More bytes can be
/// pushed between drains to simulate traffic arriving over time.
#[derive(Debug, Default)]
pub struct ScriptedByteSource {
    bytes: VecDeque<u8>,
}

impl ScriptedByteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the backend's next drain.
    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes.iter().copied());
    }
}

impl ByteSource for ScriptedByteSource {
    fn next_byte(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }
}

#[cfg(feature = "serial")]
mod serial {
    use std::collections::VecDeque;
    use std::io::Read;
    use std::time::Duration;

    use tracing::debug;

    use super::ByteSource;
    use crate::SensorError;

    /// Largest chunk pulled from the OS buffer per refill.
    const READ_CHUNK: usize = 512;

    /// Byte source backed by a serial port.
    ///
    /// Reads are bounded by what the OS reports as already buffered, so
    /// `next_byte` never waits for in-flight data.
    pub struct SerialByteSource {
        port: Box<dyn serialport::SerialPort>,
        pending: VecDeque<u8>,
    }

    impl SerialByteSource {
        /// Open a serial device at the given baud rate (8N1).
        pub fn open(path: &str, baud: u32) -> Result<Self, SensorError> {
            let port = serialport::new(path, baud)
                .timeout(Duration::from_millis(1))
                .open()
                .map_err(|e| SensorError::OpenFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;

            debug!(path, baud, "opened serial byte source");

            Ok(Self {
                port,
                pending: VecDeque::new(),
            })
        }

        fn refill(&mut self) {
            let available = match self.port.bytes_to_read() {
                Ok(n) => n as usize,
                Err(_) => return,
            };
            if available == 0 {
                return;
            }

            let mut buf = vec![0u8; available.min(READ_CHUNK)];
            match self.port.read(&mut buf) {
                Ok(n) => self.pending.extend(&buf[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => debug!("serial read error: {e}"),
            }
        }
    }

    impl ByteSource for SerialByteSource {
        fn next_byte(&mut self) -> Option<u8> {
            if self.pending.is_empty() {
                self.refill();
            }
            self.pending.pop_front()
        }
    }
}

#[cfg(feature = "serial")]
pub use serial::SerialByteSource;
