use crate::codec::detect::{detect, is_decimal_ambiguous};
use crate::codec::{Codec, codec_for};
use crate::error::{Location, RestoreError};
use crate::layout::stamp::strip_timestamp;

/// A payload fragment with the place it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub location: Location,
}

/// Strip timestamps from every line of every blob, keeping blob order and
/// line order. Lines without a timestamp are kept as they are.
pub fn fragments<S: AsRef<str>>(blobs: &[S]) -> Vec<Fragment<'_>> {
    let mut out = Vec::new();
    let mut unstamped = 0usize;
    for (blob, text) in blobs.iter().enumerate() {
        for (i, line) in text.as_ref().lines().enumerate() {
            let body = match strip_timestamp(line) {
                Some(rest) => rest,
                None => {
                    unstamped += 1;
                    line
                }
            };
            out.push(Fragment {
                text: body.trim(),
                location: Location { blob, line: i + 1 },
            });
        }
    }
    if unstamped > 0 {
        tracing::debug!(unstamped, "lines without a timestamp kept verbatim");
    }
    out
}

/// Joined payload as the decoder sees it: fragments separated by one space.
pub fn payload<S: AsRef<str>>(blobs: &[S]) -> String {
    join(&fragments(blobs))
}

fn join(frags: &[Fragment<'_>]) -> String {
    let mut out = String::with_capacity(frags.iter().map(|f| f.text.len() + 1).sum());
    for (i, f) in frags.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(f.text);
    }
    out
}

/// Recover the original bytes from chunk files given in emission order,
/// detecting the codec from the payload.
pub fn restore<S: AsRef<str>>(blobs: &[S]) -> Result<Vec<u8>, RestoreError> {
    let frags = fragments(blobs);
    let joined = join(&frags);
    let codec = detect(&joined);
    if codec == Codec::Hexadecimal && is_decimal_ambiguous(&joined) {
        tracing::warn!(
            "payload reads as hexadecimal or decimal; decoding as hexadecimal. \
             Use restore_as (CLI: --codec decimal) if it was decimal"
        );
    }
    decode_fragments(&frags, &joined, codec, blobs.len())
}

/// Like [`restore`], but with a known codec instead of detection.
pub fn restore_as<S: AsRef<str>>(blobs: &[S], codec: Codec) -> Result<Vec<u8>, RestoreError> {
    let frags = fragments(blobs);
    let joined = join(&frags);
    decode_fragments(&frags, &joined, codec, blobs.len())
}

fn decode_fragments(
    frags: &[Fragment<'_>],
    joined: &str,
    codec: Codec,
    blob_count: usize,
) -> Result<Vec<u8>, RestoreError> {
    let dec = codec_for(codec);
    let bytes = if codec.is_tokenized() {
        // Tokens never span fragments, so decoding per fragment gives the
        // same bytes and lets a failure point at its line.
        let mut out = Vec::with_capacity(joined.len() / 2);
        for f in frags {
            let part = dec
                .decode(f.text)
                .map_err(|e| RestoreError::at(e, f.location))?;
            out.extend_from_slice(&part);
        }
        out
    } else {
        dec.decode(joined).map_err(RestoreError::new)?
    };
    tracing::info!(
        %codec,
        files = blob_count,
        lines = frags.len(),
        output_bytes = bytes.len(),
        "restore complete"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn restores_hex_line() {
        let out = restore(&["2024/01/01 00:00:00.123 41 42\n"]).unwrap();
        assert_eq!(out, b"AB");
    }

    #[test]
    fn empty_input_restores_to_nothing() {
        let none: [&str; 0] = [];
        assert_eq!(restore(&none).unwrap(), b"");
        assert_eq!(restore(&[""]).unwrap(), b"");
    }

    #[test]
    fn joins_across_blobs_in_order() {
        let blobs = [
            "2024/01/01 00:00:00.100 48 65\n2024/01/01 00:00:01.200 6c\n",
            "2024/01/01 00:00:02.300 6c 6f\n",
        ];
        assert_eq!(restore(&blobs).unwrap(), b"Hello");
    }

    #[test]
    fn unstamped_lines_are_kept() {
        assert_eq!(restore(&["48 65 6c 6c 6f"]).unwrap(), b"Hello");
    }

    #[test]
    fn crlf_line_endings() {
        let blob = "2024/01/01 00:00:00.100 01000001\r\n2024/01/01 00:00:00.200 01000010\r\n";
        assert_eq!(restore(&[blob]).unwrap(), b"AB");
    }

    #[test]
    fn decimal_out_of_range_points_at_line() {
        let blobs = [
            "2024/01/01 00:00:00.100 12 200\n",
            "2024/01/01 00:00:00.200 7\n2024/01/01 00:00:00.300 256\n",
        ];
        let err = restore(&blobs).unwrap_err();
        assert_eq!(
            err.source,
            DecodeError::ByteOutOfRange {
                token: "256".into()
            }
        );
        assert_eq!(err.location, Some(Location { blob: 1, line: 2 }));
    }

    #[test]
    fn bad_base64_has_no_location() {
        let err = restore(&["2024/01/01 00:00:00.100 QUJD*\n"]).unwrap_err();
        assert!(matches!(err.source, DecodeError::Base64(_)));
        assert_eq!(err.location, None);
    }

    #[test]
    fn forced_codec_skips_detection() {
        // Detected as hex, but read as decimal when the caller says so.
        let blob = "2024/01/01 00:00:00.100 65 66\n";
        assert_eq!(restore(&[blob]).unwrap(), vec![0x65, 0x66]);
        assert_eq!(restore_as(&[blob], Codec::Decimal).unwrap(), b"AB");
    }

    #[test]
    fn payload_strips_stamps_and_joins() {
        let blobs = ["2024/01/01 00:00:00.100   ab cd  \nef\n"];
        assert_eq!(payload(&blobs), "ab cd ef");
    }
}
