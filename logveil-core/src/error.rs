use std::fmt;

use thiserror::Error;

use crate::codec::Codec;

/// Invalid [`EncodeOptions`](crate::options::EncodeOptions) handed to `convert`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window start {start} must be earlier than window end {end}")]
    EmptyWindow { start: String, end: String },

    #[error("time window is too large to distribute timestamps over")]
    WindowTooLarge,

    #[error("max line width must be at least 1")]
    ZeroLineWidth,

    #[error("max chunk size must be at least 1 KB")]
    ZeroChunkSize,

    #[error("output base name cannot be empty")]
    EmptyBaseName,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown codec: {0:?} (expected binary, decimal, hexadecimal or base64)")]
    UnknownCodec(String),
}

/// A payload that no codec accepts, or that the chosen codec rejects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid {codec} token {token:?}")]
    InvalidToken { codec: Codec, token: String },

    #[error("decimal token {token:?} is outside the byte range 0-255")]
    ByteOutOfRange { token: String },

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Where in the restore input a failing fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Zero-based index of the blob in the input sequence.
    pub blob: usize,
    /// One-based line number within that blob.
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob {} line {}", self.blob, self.line)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("restore failed{}: {source}", at_suffix(.location))]
pub struct RestoreError {
    #[source]
    pub source: DecodeError,
    pub location: Option<Location>,
}

impl RestoreError {
    pub fn new(source: DecodeError) -> Self {
        Self {
            source,
            location: None,
        }
    }

    pub fn at(source: DecodeError, location: Location) -> Self {
        Self {
            source,
            location: Some(location),
        }
    }
}

fn at_suffix(location: &Option<Location>) -> String {
    location.map(|loc| format!(" at {loc}")).unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum LogveilError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Restore(#[from] RestoreError),

    #[error("Format error: {0}")]
    Format(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, LogveilError>;
