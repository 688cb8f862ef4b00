use super::{Codec, codec_for};

/// Order in which codecs are tried against a restored payload; the first
/// codec whose shape matches wins. Inputs can satisfy several shapes at once
/// (every binary token is also a run of decimal digits), so the order is part
/// of the file format.
pub const DETECTION_ORDER: [Codec; 4] = [
    Codec::Binary,
    Codec::Decimal,
    Codec::Hexadecimal,
    Codec::Base64,
];

/// Pick the codec that produced `payload`. Never fails: Base64 is the
/// fallback and reports its own error when decoding.
pub fn detect(payload: &str) -> Codec {
    let found = DETECTION_ORDER
        .into_iter()
        .find(|id| codec_for(*id).matches(payload))
        .unwrap_or(Codec::Base64);
    tracing::debug!(codec = %found, "detected payload codec");
    found
}

/// True when `payload` is a non-empty run of two-digit decimal tokens. Such a
/// stream is detected as hexadecimal but reads just as well as decimal bytes
/// in 10..=99.
pub fn is_decimal_ambiguous(payload: &str) -> bool {
    let mut tokens = payload.split_ascii_whitespace().peekable();
    tokens.peek().is_some()
        && tokens.all(|tok| tok.len() == 2 && tok.bytes().all(|b| b.is_ascii_digit()))
}
