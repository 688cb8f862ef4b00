use rand::Rng;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, PrimitiveDateTime};

use crate::error::ConfigError;

/// `YYYY/MM/DD HH:MM:SS.mmm`
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second].[subsecond digits:3]");

/// Width in bytes of a rendered timestamp.
pub const TIMESTAMP_LEN: usize = 23;

const MAX_OFFSET_MS: u16 = 999;

/// One wrapped fragment of the payload with its synthetic timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedLine {
    pub timestamp: PrimitiveDateTime,
    pub text: String,
}

impl EncodedLine {
    /// Append `"<timestamp> <text>\n"` to `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push_str(&format_timestamp(self.timestamp));
        out.push(' ');
        out.push_str(&self.text);
        out.push('\n');
    }

    /// Size in bytes of the rendered line, newline included.
    pub fn rendered_len(&self) -> usize {
        self.content_len() + 1
    }

    /// Size in bytes of `"<timestamp> <text>"`, without the newline. This is
    /// what counts toward the chunk threshold.
    pub fn content_len(&self) -> usize {
        TIMESTAMP_LEN + 1 + self.text.len()
    }
}

pub fn format_timestamp(ts: PrimitiveDateTime) -> String {
    // Only fails for years outside 0..=9999, which the window cannot produce
    // from a parsed YYYY/MM/DD boundary.
    ts.format(TIMESTAMP_FORMAT).unwrap_or_else(|_| ts.to_string())
}

/// Millisecond offsets that never go backwards: each draw lies strictly above
/// the previous one until 999 is reached, after which 999 repeats.
#[derive(Debug, Default)]
pub struct OffsetSequence {
    prev: u16,
}

impl OffsetSequence {
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u16 {
        let ms = if self.prev < MAX_OFFSET_MS {
            rng.gen_range(self.prev + 1..=MAX_OFFSET_MS)
        } else {
            MAX_OFFSET_MS
        };
        self.prev = ms;
        ms
    }
}

/// Spread `lines` evenly over `[start, end)` and give each a timestamp.
///
/// Line `i` of `n` sits at `start + i * (end - start) / n` plus a random
/// millisecond offset from [`OffsetSequence`]. Stamps are clamped to the last
/// millisecond before `end`, so they stay inside the window and never
/// decrease.
pub fn stamp_lines<R: Rng + ?Sized>(
    lines: Vec<String>,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    rng: &mut R,
) -> Result<Vec<EncodedLine>, ConfigError> {
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    if start >= end {
        return Err(ConfigError::EmptyWindow {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let window_ns = (end - start).whole_nanoseconds();
    let n = lines.len() as i128;
    let last_ms =
        i64::try_from((window_ns - 1) / 1_000_000).map_err(|_| ConfigError::WindowTooLarge)?;

    let mut offsets = OffsetSequence::default();
    let mut out = Vec::with_capacity(lines.len());
    for (i, text) in lines.into_iter().enumerate() {
        let base_ms = i64::try_from(window_ns * i as i128 / n / 1_000_000)
            .map_err(|_| ConfigError::WindowTooLarge)?;
        let at_ms = (base_ms + i64::from(offsets.next(rng))).min(last_ms);
        let timestamp = start
            .checked_add(Duration::milliseconds(at_ms))
            .ok_or(ConfigError::WindowTooLarge)?;
        out.push(EncodedLine { timestamp, text });
    }
    Ok(out)
}

/// If `line` starts with a rendered timestamp followed by whitespace (or
/// nothing), return the remainder after that timestamp.
pub fn strip_timestamp(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    if bytes.len() < TIMESTAMP_LEN {
        return None;
    }
    // "dddd/dd/dd dd:dd:dd.ddd"
    const SHAPE: &[u8; TIMESTAMP_LEN] = b"dddd/dd/dd dd:dd:dd.ddd";
    let shaped = SHAPE.iter().zip(bytes).all(|(&want, &got)| match want {
        b'd' => got.is_ascii_digit(),
        sep => sep == got,
    });
    if !shaped {
        return None;
    }
    let rest = &line[TIMESTAMP_LEN..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}
