use serde::{Deserialize, Serialize};
use time::macros::{format_description, time};
use time::{Date, Duration, PrimitiveDateTime};

use crate::codec::Codec;
use crate::error::ConfigError;

time::serde::format_description!(
    window_format,
    PrimitiveDateTime,
    "[year]/[month]/[day] [hour]:[minute]:[second]"
);

/// Hours offered as window boundaries on each preset day.
const PRESET_STEP_HOURS: u8 = 3;
/// Number of days back from today the presets reach.
const PRESET_DAYS_BACK: i64 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub codec: Codec,
    /// Characters per wrapped line, excluding the timestamp prefix.
    pub max_line_width: usize,
    /// Chunk file threshold in KB (1 KB = 1024 bytes).
    pub max_chunk_kb: usize,
    #[serde(with = "window_format")]
    pub window_start: PrimitiveDateTime,
    /// Exclusive upper bound of the synthetic timestamps.
    #[serde(with = "window_format")]
    pub window_end: PrimitiveDateTime,
    pub output_base_name: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        let (window_start, window_end) = default_window(today());
        Self {
            codec: Codec::Hexadecimal,
            max_line_width: 100,
            max_chunk_kb: 3000,
            window_start,
            window_end,
            output_base_name: "OutputFileName".to_string(),
        }
    }
}

impl EncodeOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_start >= self.window_end {
            return Err(ConfigError::EmptyWindow {
                start: self.window_start.to_string(),
                end: self.window_end.to_string(),
            });
        }
        if self.max_line_width == 0 {
            return Err(ConfigError::ZeroLineWidth);
        }
        if self.max_chunk_kb == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.output_base_name.trim().is_empty() {
            return Err(ConfigError::EmptyBaseName);
        }
        Ok(())
    }

    /// Chunk threshold in bytes.
    pub fn chunk_threshold(&self) -> usize {
        self.max_chunk_kb.saturating_mul(1024)
    }
}

fn today() -> Date {
    time::OffsetDateTime::now_utc().date()
}

/// Window boundaries a host can offer: every three hours from midnight three
/// days before `today` up to 21:00 on `today`.
pub fn window_presets(today: Date) -> Vec<PrimitiveDateTime> {
    let mut out = Vec::new();
    for back in (0..=PRESET_DAYS_BACK).rev() {
        let Some(day) = today.checked_sub(Duration::days(back)) else {
            continue;
        };
        let midnight = day.with_time(time!(00:00));
        for step in 0..(24 / PRESET_STEP_HOURS) {
            out.push(midnight + Duration::hours(i64::from(step * PRESET_STEP_HOURS)));
        }
    }
    out
}

/// First and last preset, the window a host starts with.
pub fn default_window(today: Date) -> (PrimitiveDateTime, PrimitiveDateTime) {
    let presets = window_presets(today);
    match (presets.first(), presets.last()) {
        (Some(start), Some(end)) => (*start, *end),
        _ => {
            let midnight = today.with_time(time!(00:00));
            (midnight, midnight + Duration::hours(21))
        }
    }
}

/// Parse a window boundary as typed by a user: `YYYY/MM/DD HH:MM` or
/// `YYYY/MM/DD HH:MM:SS`.
pub fn parse_window_time(s: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    let s = s.trim();
    let with_seconds = format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");
    let minutes = format_description!("[year]/[month]/[day] [hour]:[minute]");
    PrimitiveDateTime::parse(s, with_seconds).or_else(|_| PrimitiveDateTime::parse(s, minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn opts() -> EncodeOptions {
        EncodeOptions {
            codec: Codec::Hexadecimal,
            max_line_width: 100,
            max_chunk_kb: 1,
            window_start: datetime!(2024-01-01 00:00),
            window_end: datetime!(2024-01-01 01:00),
            output_base_name: "out".into(),
        }
    }

    #[test]
    fn valid_options_pass() {
        assert_eq!(opts().validate(), Ok(()));
    }

    #[test]
    fn reversed_window_rejected() {
        let mut o = opts();
        o.window_end = o.window_start;
        assert!(matches!(o.validate(), Err(ConfigError::EmptyWindow { .. })));
    }

    #[test]
    fn zero_sizes_rejected() {
        let mut o = opts();
        o.max_line_width = 0;
        assert_eq!(o.validate(), Err(ConfigError::ZeroLineWidth));

        let mut o = opts();
        o.max_chunk_kb = 0;
        assert_eq!(o.validate(), Err(ConfigError::ZeroChunkSize));
    }

    #[test]
    fn blank_name_rejected() {
        let mut o = opts();
        o.output_base_name = "   ".into();
        assert_eq!(o.validate(), Err(ConfigError::EmptyBaseName));
    }

    #[test]
    fn presets_span_four_days_in_three_hour_steps() {
        let presets = window_presets(date!(2024-03-10));
        assert_eq!(presets.len(), 32);
        assert_eq!(presets[0], datetime!(2024-03-07 00:00));
        assert_eq!(presets[1], datetime!(2024-03-07 03:00));
        assert_eq!(presets[31], datetime!(2024-03-10 21:00));
        assert_eq!(
            default_window(date!(2024-03-10)),
            (datetime!(2024-03-07 00:00), datetime!(2024-03-10 21:00))
        );
    }

    #[test]
    fn parses_both_window_forms() {
        assert_eq!(
            parse_window_time("2024/01/01 09:30").unwrap(),
            datetime!(2024-01-01 09:30)
        );
        assert_eq!(
            parse_window_time("2024/01/01 09:30:15").unwrap(),
            datetime!(2024-01-01 09:30:15)
        );
        assert!(parse_window_time("01-01-2024").is_err());
    }

    #[test]
    fn serde_uses_slash_format() {
        let json = serde_json::to_string(&opts()).unwrap();
        assert!(json.contains("\"2024/01/01 00:00:00\""));
        let back: EncodeOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts());
    }

    #[test]
    fn defaults_are_hex_100_cols_3000_kb() {
        let d = EncodeOptions::default();
        assert_eq!(d.codec, Codec::Hexadecimal);
        assert_eq!(d.max_line_width, 100);
        assert_eq!(d.max_chunk_kb, 3000);
        assert_eq!(d.output_base_name, "OutputFileName");
        assert!(d.validate().is_ok());
    }
}
