use super::{Codec, TextCodec, join_tokens};
use crate::error::DecodeError;

pub struct Hexadecimal;

fn is_hex_token(tok: &str) -> bool {
    !tok.is_empty() && tok.len() % 2 == 0 && tok.bytes().all(|b| b.is_ascii_hexdigit())
}

impl TextCodec for Hexadecimal {
    fn id(&self) -> Codec {
        Codec::Hexadecimal
    }

    fn encode(&self, data: &[u8]) -> String {
        join_tokens(data.iter().map(|b| hex::encode([*b])), 2)
    }

    /// Tokens are normally one byte wide, but any even-length hex run is
    /// accepted and expands to several bytes.
    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::with_capacity(payload.len() / 3 + 1);
        for tok in payload.split_ascii_whitespace() {
            let bytes = hex::decode(tok).map_err(|_| DecodeError::InvalidToken {
                codec: Codec::Hexadecimal,
                token: tok.to_string(),
            })?;
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }

    fn matches(&self, payload: &str) -> bool {
        payload.split_ascii_whitespace().all(is_hex_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_lowercase_pairs() {
        assert_eq!(Hexadecimal.encode(b"AB\x0f\xff"), "41 42 0f ff");
    }

    #[test]
    fn decodes_mixed_case() {
        assert_eq!(Hexadecimal.decode("4a 4B").unwrap(), b"JK");
    }

    #[test]
    fn decodes_multi_byte_runs() {
        assert_eq!(Hexadecimal.decode("4142 43").unwrap(), b"ABC");
    }

    #[test]
    fn odd_length_does_not_match() {
        assert!(!Hexadecimal.matches("414 42"));
        assert!(Hexadecimal.decode("414").is_err());
    }
}
