// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, arg, value_parser};
use eventdesk_core::schedule::{parse_epoch_millis, to_epoch_millis};
use jiff::Timestamp;
use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD HH:MM` or `YYYY-MM-DD` in the given zone. Empty input yields `None`.
pub fn parse_datetime(dt: &str, tz: &TimeZone) -> Result<Option<Timestamp>, Box<dyn Error>> {
    let dt = dt.trim();
    let civil = if dt.is_empty() {
        return Ok(None);
    } else if let Ok(civil) = DateTime::strptime(DATETIME_FORMAT, dt) {
        civil
    } else if let Ok(date) = Date::strptime(DATE_FORMAT, dt) {
        date.to_datetime(jiff::civil::Time::midnight())
    } else {
        return Err(
            format!("Invalid date '{dt}'. Expected format: YYYY-MM-DD or YYYY-MM-DD HH:MM").into(),
        );
    };

    let zoned = civil.to_zoned(tz.clone())?;
    Ok(Some(zoned.timestamp()))
}

/// Same as [`parse_datetime`] but produces the epoch millisecond text stored in documents.
pub fn parse_datetime_millis(dt: &str, tz: &TimeZone) -> Result<String, Box<dyn Error>> {
    Ok(parse_datetime(dt, tz)?
        .map(to_epoch_millis)
        .unwrap_or_default())
}

/// Renders a stored epoch millisecond string for an input field. Unreadable
/// values are returned untouched so nothing is lost silently.
pub fn format_datetime(ms: &str, tz: &TimeZone) -> String {
    if ms.trim().is_empty() {
        return String::new();
    }

    match parse_epoch_millis(ms) {
        Ok(ts) => tz.to_datetime(ts).strftime(DATETIME_FORMAT).to_string(),
        Err(e) => {
            tracing::warn!(ms, err = %e, "unreadable timestamp");
            ms.to_string()
        }
    }
}

pub fn unicode_width_of_slice(s: &str, first_n_chars: usize) -> usize {
    if first_n_chars == 0 || s.is_empty() {
        0
    } else if let Some((idx, ch)) = s.char_indices().nth(first_n_chars - 1) {
        let byte_idx = idx + ch.len_utf8();
        s[..byte_idx].width()
    } else {
        s.width()
    }
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    for (i, (byte_start, g)) in s.grapheme_indices(true).enumerate() {
        if i == g_idx {
            let byte_end = byte_start + g.len();
            return Some(byte_start..byte_end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range_of_grapheme_at() {
        let s = "a中😀b";
        assert_eq!(byte_range_of_grapheme_at(s, 0), Some(0..1));
        assert_eq!(byte_range_of_grapheme_at(s, 1), Some(1..4));
        assert_eq!(byte_range_of_grapheme_at(s, 2), Some(4..8));
        assert_eq!(byte_range_of_grapheme_at(s, 3), Some(8..9));
        assert_eq!(byte_range_of_grapheme_at(s, 4), None);
    }

    #[test]
    fn test_unicode_width_ascii_only() {
        let s = "hello world";
        assert_eq!(unicode_width_of_slice(s, 100), 11);
        assert_eq!(unicode_width_of_slice(s, 5), 5);
        assert_eq!(unicode_width_of_slice(s, 0), 0);
    }

    #[test]
    fn test_unicode_width_mixed_english_chinese() {
        let s = "abc中文def";
        // "abc" + "中"
        assert_eq!(unicode_width_of_slice(s, 4), "abc中".width());
        assert_eq!(unicode_width_of_slice(s, 8), s.width());
        assert_eq!(unicode_width_of_slice(s, 9), s.width());
    }

    #[test]
    fn test_unicode_width_emoji() {
        let s = "a😀b";
        assert_eq!(unicode_width_of_slice(s, 2), "a😀".width());
    }

    #[test]
    fn test_unicode_width_empty_string() {
        assert_eq!(unicode_width_of_slice("", 0), 0);
    }

    #[test]
    fn test_parse_datetime_empty() {
        assert_eq!(parse_datetime("", &TimeZone::UTC).unwrap(), None);
        assert_eq!(parse_datetime("   ", &TimeZone::UTC).unwrap(), None);
    }

    #[test]
    fn test_parse_datetime_date_time() {
        let ts = parse_datetime("2024-01-15 09:00", &TimeZone::UTC)
            .unwrap()
            .unwrap();
        assert_eq!(ts.as_millisecond(), 1_705_309_200_000);
    }

    #[test]
    fn test_parse_datetime_date_only_is_midnight() {
        let ts = parse_datetime("1970-01-02", &TimeZone::UTC).unwrap().unwrap();
        assert_eq!(ts.as_millisecond(), 86_400_000);
    }

    #[test]
    fn test_parse_datetime_respects_zone() {
        let tz = TimeZone::fixed(jiff::tz::offset(8));
        let ts = parse_datetime("1970-01-01 08:00", &tz).unwrap().unwrap();
        assert_eq!(ts.as_millisecond(), 0);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("invalid", &TimeZone::UTC).is_err());
        assert!(parse_datetime("2023-13-01", &TimeZone::UTC).is_err());
        assert!(parse_datetime("2023-12-01 25:00", &TimeZone::UTC).is_err());
    }

    #[test]
    fn test_parse_datetime_millis() {
        let ms = parse_datetime_millis("1970-01-01 00:01", &TimeZone::UTC).unwrap();
        assert_eq!(ms, "60000");
        assert_eq!(parse_datetime_millis("", &TimeZone::UTC).unwrap(), "");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("1705309200000", &TimeZone::UTC),
            "2024-01-15 09:00"
        );
        assert_eq!(format_datetime("", &TimeZone::UTC), "");
        assert_eq!(format_datetime("soon", &TimeZone::UTC), "soon");
    }
}
