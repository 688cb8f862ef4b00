use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};

/// Textual representations a byte stream can be written in.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Codec {
    Binary = 0,
    Decimal = 1,
    Hexadecimal = 2,
    Base64 = 3,
}

impl Codec {
    pub const ALL: [Codec; 4] = [
        Codec::Binary,
        Codec::Decimal,
        Codec::Hexadecimal,
        Codec::Base64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Codec::Binary => "Binary",
            Codec::Decimal => "Decimal",
            Codec::Hexadecimal => "Hexadecimal",
            Codec::Base64 => "Base64",
        }
    }

    /// Token codecs emit one space-separated token per byte; Base64 emits a
    /// single opaque string.
    pub fn is_tokenized(self) -> bool {
        !matches!(self, Codec::Base64)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(Codec::Binary),
            "decimal" | "dec" => Ok(Codec::Decimal),
            "hexadecimal" | "hex" => Ok(Codec::Hexadecimal),
            "base64" | "b64" => Ok(Codec::Base64),
            _ => Err(EncodeError::UnknownCodec(s.to_string())),
        }
    }
}

pub trait TextCodec: Send + Sync {
    fn id(&self) -> Codec;

    fn encode(&self, data: &[u8]) -> String;

    /// Decode a single whitespace-free token (token codecs) or the whole
    /// payload (Base64).
    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError>;

    /// Whether `payload` is shaped like this codec's output.
    fn matches(&self, payload: &str) -> bool;
}

pub fn codec_for(id: Codec) -> &'static dyn TextCodec {
    match id {
        Codec::Binary => &binary::Binary,
        Codec::Decimal => &decimal::Decimal,
        Codec::Hexadecimal => &hexadecimal::Hexadecimal,
        Codec::Base64 => &base64c::Base64,
    }
}

/// Encode `data` with the given codec.
pub fn encode(id: Codec, data: &[u8]) -> String {
    codec_for(id).encode(data)
}

/// Join per-byte tokens with single spaces.
fn join_tokens<I>(tokens: I, width: usize) -> String
where
    I: ExactSizeIterator<Item = String>,
{
    let mut out = String::with_capacity(tokens.len() * (width + 1));
    for (i, tok) in tokens.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&tok);
    }
    out
}

/// Decode a whitespace-separated token stream one token at a time.
fn decode_tokens(
    payload: &str,
    parse: impl Fn(&str) -> Result<u8, DecodeError>,
) -> Result<Vec<u8>, DecodeError> {
    payload.split_ascii_whitespace().map(parse).collect()
}

pub mod base64c;
pub mod binary;
pub mod decimal;
pub mod detect;
pub mod hexadecimal;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codec_names() {
        assert_eq!("Hexadecimal".parse::<Codec>().unwrap(), Codec::Hexadecimal);
        assert_eq!("hex".parse::<Codec>().unwrap(), Codec::Hexadecimal);
        assert_eq!(" BINARY ".parse::<Codec>().unwrap(), Codec::Binary);
        assert_eq!("b64".parse::<Codec>().unwrap(), Codec::Base64);
        assert_eq!("dec".parse::<Codec>().unwrap(), Codec::Decimal);
    }

    #[test]
    fn unknown_codec_is_encode_error() {
        let err = "octal".parse::<Codec>().unwrap_err();
        assert_eq!(err, EncodeError::UnknownCodec("octal".into()));
    }

    #[test]
    fn codec_for_returns_matching_id() {
        for id in Codec::ALL {
            assert_eq!(codec_for(id).id(), id);
        }
    }

    #[test]
    fn empty_input_encodes_to_empty_string() {
        for id in Codec::ALL {
            assert_eq!(encode(id, b""), "");
        }
    }
}
