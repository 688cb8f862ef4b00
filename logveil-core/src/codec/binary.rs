use super::{Codec, TextCodec, decode_tokens, join_tokens};
use crate::error::DecodeError;

pub struct Binary;

fn is_bit_token(tok: &str) -> bool {
    tok.len() == 8 && tok.bytes().all(|b| b == b'0' || b == b'1')
}

impl TextCodec for Binary {
    fn id(&self) -> Codec {
        Codec::Binary
    }

    fn encode(&self, data: &[u8]) -> String {
        join_tokens(data.iter().map(|b| format!("{b:08b}")), 8)
    }

    fn decode(&self, payload: &str) -> Result<Vec<u8>, DecodeError> {
        decode_tokens(payload, |tok| {
            if !is_bit_token(tok) {
                return Err(DecodeError::InvalidToken {
                    codec: Codec::Binary,
                    token: tok.to_string(),
                });
            }
            u8::from_str_radix(tok, 2).map_err(|_| DecodeError::InvalidToken {
                codec: Codec::Binary,
                token: tok.to_string(),
            })
        })
    }

    fn matches(&self, payload: &str) -> bool {
        payload.split_ascii_whitespace().all(is_bit_token)
    }
}
