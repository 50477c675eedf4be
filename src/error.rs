//! Error types for the broker head.

use thiserror::Error;

/// Result alias for protocol and server operations.
pub type Result<T> = std::result::Result<T, RunestreamError>;

/// Errors that can occur while framing and serving requests.
///
/// Framing errors (`TruncatedFrame`, `ShortHeader`, `Protocol`) are fatal to
/// the connection: byte alignment cannot be trusted afterwards, so the loop
/// closes the socket without writing a partial response. Protocol-level
/// conditions (unsupported version, unknown topic) are not errors here; they
/// travel in-band as response fields.
#[derive(Error, Debug)]
pub enum RunestreamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated frame: declared {declared} bytes, {buffered} buffered at end of stream")]
    TruncatedFrame { declared: usize, buffered: usize },

    #[error("short request header: {0} bytes, need at least 8")]
    ShortHeader(usize),

    #[error("protocol error: {0}")]
    Protocol(String),
}
