#![forbid(unsafe_code)]

//! Turn arbitrary bytes into timestamped, log-shaped text files and back.
//!
//! `convert` encodes a byte stream as binary, decimal, hexadecimal or Base64
//! text, wraps it into lines, prefixes each line with a synthetic
//! `YYYY/MM/DD HH:MM:SS.mmm` timestamp and packs the lines into size-bounded
//! `{name}_{N}.txt` files. `restore` strips the timestamps, detects the codec
//! and returns the original bytes. Both are pure; reading and writing files is
//! left to the caller.

pub mod error;
pub mod options;

pub mod codec;

pub mod layout {
    pub mod chunk;
    pub mod stamp;
    pub mod wrap;
}

pub mod convert;
pub mod restore;

// Re-exports: stable API surface
pub use codec::Codec;
pub use codec::detect::{DETECTION_ORDER, detect};
pub use convert::{OutputFile, convert, convert_chunks, convert_with_rng};
pub use error::{ConfigError, DecodeError, EncodeError, Location, LogveilError, RestoreError};
pub use layout::chunk::Chunk;
pub use layout::stamp::EncodedLine;
pub use options::EncodeOptions;
pub use restore::{restore, restore_as};
