use thiserror::Error;

/// Errors surfaced by sensor backends outside the decode path.
///
/// Decode failures never appear here: backends degrade to returning the
/// last known good measurement, and the decoder's statistics record what
/// was dropped.
#[derive(Error, Debug)]
pub enum SensorError {
    /// Failed to open the connection feeding a backend.
    #[error("Failed to open {path}: {message}")]
    OpenFailed {
        /// Device path of the connection
        path: String,
        /// Human-readable cause
        message: String,
    },

    /// Low-level I/O error on the connection.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
