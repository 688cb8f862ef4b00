use super::{Codec, TextCodec, decode_tokens, join_tokens};
use crate::error::DecodeError;

pub struct Decimal;

fn is_digit_token(tok: &str) -> bool {
    !tok.is_empty() && tok.bytes().all(|b| b.is_ascii_digit())
}

impl TextCodec for Decimal {
    fn id(&self) -> Codec {
        Codec::Decimal
    }

    fn encode(&self, data: &[u8]) -> String {
        join_tokens(data.iter().map(|b| b.to_string()), 3)
    }

    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError> {
        decode_tokens(payload, |tok| {
            if !is_digit_token(tok) {
                return Err(DecodeError::InvalidToken {
                    codec: Codec::Decimal,
                    token: tok.to_string(),
                });
            }
            // All digits, so the only failure left is overflow.
            tok.parse::<u8>()
                .map_err(|_| DecodeError::ByteOutOfRange {
                    token: tok.to_string(),
                })
        })
    }

    /// Hexadecimal output of bytes whose nibbles are all below 10 is also a
    /// valid digit stream; it is told apart by every token being exactly two
    /// characters wide, which decimal output only produces when every byte
    /// lies in 10..=99.
    fn matches(&self, payload: &str) -> bool {
        let mut tokens = payload.split_ascii_whitespace().peekable();
        if tokens.peek().is_none() {
            return true;
        }
        let mut all_two_wide = true;
        for tok in tokens {
            if !is_digit_token(tok) {
                return false;
            }
            all_two_wide &= tok.len() == 2;
        }
        !all_two_wide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_plain_decimal() {
        assert_eq!(Decimal.encode(&[0, 7, 65, 255]), "0 7 65 255");
    }

    #[test]
    fn rejects_out_of_range_token() {
        let err = Decimal.decode("12 256").unwrap_err();
        assert_eq!(
            err,
            DecodeError::ByteOutOfRange {
                token: "256".into()
            }
        );
    }

    #[test]
    fn two_wide_stream_is_left_to_hexadecimal() {
        assert!(!Decimal.matches("41 42"));
        assert!(Decimal.matches("7 41 42"));
        assert!(Decimal.matches("104 101 108 108 111"));
    }

    #[test]
    fn letters_do_not_match() {
        assert!(!Decimal.matches("12 4a"));
    }
}
