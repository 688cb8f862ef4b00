use base64::{Engine, engine::general_purpose::STANDARD};

use super::{Codec, TextCodec};
use crate::error::DecodeError;

pub struct Base64;

impl TextCodec for Base64 {
    fn id(&self) -> Codec {
        Codec::Base64
    }

    fn encode(&self, data: &[u8]) -> String {
        STANDARD.encode(data)
    }

    /// Wrapped payloads come back with spaces where the lines were cut; all
    /// whitespace is dropped before decoding.
    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError> {
        let compact: String = payload.split_ascii_whitespace().collect();
        Ok(STANDARD.decode(compact)?)
    }

    // Fallback: anything reaching Base64 is attempted.
    fn matches(&self, _payload: &str) -> bool {
        true
    }
}
