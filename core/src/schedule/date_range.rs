// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Human readable date ranges for schedule entries.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Error returned when an epoch-millisecond string cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    #[error("timestamp is missing")]
    Missing,

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Formats the range between two epoch-millisecond strings, read in `tz`.
///
/// The most compact form is picked:
///
/// - `January 15, 2024 at 9:00 AM` for a single instant,
/// - `January 15, 2024 at 1:00 - 5:30 PM` within one day and period,
/// - `January 15, 2024 from 9:00 AM - 5:30 PM` within one day across periods,
/// - `January 15 at 9:00 AM - 17 at 5:30 PM, 2024` within one month,
/// - `January 15 at 9:00 AM, 2024 - February 20 at 5:30 PM, 2024` otherwise.
pub fn format_range(start: &str, end: &str, tz: &TimeZone) -> Result<String, DateRangeError> {
    let s = parse_local(start, tz)?;
    let e = parse_local(end, tz)?;

    let same_day = s.year() == e.year() && s.month() == e.month() && s.day() == e.day();
    let text = if same_day && s.hour() == e.hour() && s.minute() == e.minute() {
        format!("{}, {} at {}", month_day(&s), s.year(), time(&s, true))
    } else if same_day && is_pm(&s) == is_pm(&e) {
        format!(
            "{}, {} at {} - {}",
            month_day(&s),
            s.year(),
            time(&s, false),
            time(&e, true)
        )
    } else if same_day {
        format!(
            "{}, {} from {} - {}",
            month_day(&s),
            s.year(),
            time(&s, true),
            time(&e, true)
        )
    } else if s.year() == e.year() && s.month() == e.month() {
        format!(
            "{} at {} - {} at {}, {}",
            month_day(&s),
            time(&s, true),
            e.day(),
            time(&e, true),
            s.year()
        )
    } else {
        // same year or not, both sides carry their own year
        format!(
            "{} at {}, {} - {} at {}, {}",
            month_day(&s),
            time(&s, true),
            s.year(),
            month_day(&e),
            time(&e, true),
            e.year()
        )
    };
    Ok(text)
}

/// Formats a single instant, e.g. `January 1, 1970 at 12:00 AM`.
pub fn format_timestamp(ms: &str, tz: &TimeZone) -> Result<String, DateRangeError> {
    format_range(ms, ms, tz)
}

/// Parses an epoch-millisecond string into a timestamp.
pub fn parse_epoch_millis(ms: &str) -> Result<Timestamp, DateRangeError> {
    let ms = ms.trim();
    if ms.is_empty() {
        return Err(DateRangeError::Missing);
    }

    ms.parse::<i64>()
        .ok()
        .and_then(|n| Timestamp::from_millisecond(n).ok())
        .ok_or_else(|| DateRangeError::InvalidTimestamp(ms.to_owned()))
}

/// Converts a timestamp into the epoch-millisecond string form.
pub fn to_epoch_millis(ts: Timestamp) -> String {
    ts.as_millisecond().to_string()
}

fn parse_local(ms: &str, tz: &TimeZone) -> Result<DateTime, DateRangeError> {
    parse_epoch_millis(ms).map(|ts| tz.to_datetime(ts))
}

fn month_day(dt: &DateTime) -> String {
    // month() is 1-based and always within 1..=12
    let month = MONTH_NAMES[(dt.month() - 1) as usize];
    format!("{month} {}", dt.day())
}

fn is_pm(dt: &DateTime) -> bool {
    dt.hour() >= 12
}

fn time(dt: &DateTime, with_period: bool) -> String {
    let hour = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };
    match with_period {
        true => {
            let period = if is_pm(dt) { "PM" } else { "AM" };
            format!("{hour}:{:02} {period}", dt.minute())
        }
        false => format!("{hour}:{:02}", dt.minute()),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn ms(y: i16, m: i8, d: i8, h: i8, min: i8) -> String {
        let ts = date(y, m, d)
            .at(h, min, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp();
        to_epoch_millis(ts)
    }

    fn utc(start: &str, end: &str) -> String {
        format_range(start, end, &TimeZone::UTC).unwrap()
    }

    #[test]
    fn epoch_single_instant() {
        assert_eq!(utc("0", "0"), "January 1, 1970 at 12:00 AM");
        assert_eq!(
            format_timestamp("0", &TimeZone::UTC).unwrap(),
            "January 1, 1970 at 12:00 AM"
        );
    }

    #[test]
    fn same_day_across_periods() {
        let start = ms(2024, 1, 15, 9, 0);
        let end = ms(2024, 1, 15, 17, 30);
        assert_eq!(utc(&start, &end), "January 15, 2024 from 9:00 AM - 5:30 PM");
    }

    #[test]
    fn same_day_same_period_omits_start_period() {
        let start = ms(2024, 1, 15, 13, 5);
        let end = ms(2024, 1, 15, 17, 30);
        assert_eq!(utc(&start, &end), "January 15, 2024 at 1:05 - 5:30 PM");

        let start = ms(2024, 1, 15, 0, 0);
        let end = ms(2024, 1, 15, 11, 59);
        assert_eq!(utc(&start, &end), "January 15, 2024 at 12:00 - 11:59 AM");
    }

    #[test]
    fn same_minute_different_seconds_is_single_instant() {
        let start = ms(2024, 3, 1, 12, 0);
        let end = (start.parse::<i64>().unwrap() + 30_000).to_string();
        assert_eq!(utc(&start, &end), "March 1, 2024 at 12:00 PM");
    }

    #[test]
    fn same_month_different_days() {
        let start = ms(2024, 1, 15, 9, 0);
        let end = ms(2024, 1, 17, 18, 45);
        assert_eq!(
            utc(&start, &end),
            "January 15 at 9:00 AM - 17 at 6:45 PM, 2024"
        );
    }

    #[test]
    fn same_year_different_months() {
        let start = ms(2024, 1, 15, 9, 0);
        let end = ms(2024, 2, 20, 10, 0);
        assert_eq!(
            utc(&start, &end),
            "January 15 at 9:00 AM, 2024 - February 20 at 10:00 AM, 2024"
        );
    }

    #[test]
    fn different_years() {
        let start = ms(2023, 12, 31, 22, 0);
        let end = ms(2024, 1, 1, 2, 0);
        assert_eq!(
            utc(&start, &end),
            "December 31 at 10:00 PM, 2023 - January 1 at 2:00 AM, 2024"
        );
    }

    #[test]
    fn reads_fields_in_the_given_zone() {
        let tz = TimeZone::fixed(jiff::tz::offset(-5));
        assert_eq!(
            format_range("0", "0", &tz).unwrap(),
            "December 31, 1969 at 7:00 PM"
        );
    }

    #[test]
    fn rejects_unreadable_timestamps() {
        assert_eq!(
            format_range("", "0", &TimeZone::UTC),
            Err(DateRangeError::Missing)
        );
        assert_eq!(
            format_range("0", "soon", &TimeZone::UTC),
            Err(DateRangeError::InvalidTimestamp("soon".to_string()))
        );
        assert!(matches!(
            parse_epoch_millis(&i64::MAX.to_string()),
            Err(DateRangeError::InvalidTimestamp(_))
        ));
    }
}
