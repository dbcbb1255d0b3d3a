//! Local date, clock and "what day is it" keys per locale.
//!
//! Everything here is a pure function of a UTC instant so the day panel can
//! be rendered (and tested) for any moment.

use crate::locale::Locale;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

pub const NIGHT: &str = "🌃";
pub const SUNSET: &str = "🌇";
pub const DAY: &str = "🏙️";
pub const SUNRISE: &str = "🌅";

/// What a day panel shows in its date/time cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    /// `YYYY-MM-DD` in the locale's timezone.
    pub date: String,
    /// `HH:MM:SS`, 24-hour.
    pub time: String,
    pub icon: &'static str,
}

/// Time-of-day icon for an hour in `0..24`.
pub fn time_icon(hour: u32) -> &'static str {
    match hour {
        19.. => NIGHT,
        16..=18 => SUNSET,
        6..=15 => DAY,
        4..=5 => SUNRISE,
        _ => NIGHT,
    }
}

/// Read the wall clock as seen in `locale`.
///
/// # Arguments
///
/// * `locale` - Whose timezone to convert into
/// * `now` - The instant to read, normally `Utc::now()`
///
/// # Returns
///
/// A [`ClockReading`] with the local date, the 24-hour time and the
/// [`time_icon`] for the local hour.
pub fn read_clock(locale: Locale, now: DateTime<Utc>) -> ClockReading {
    let local = now.with_timezone(&locale.timezone());
    ClockReading {
        date: local.format("%Y-%m-%d").to_string(),
        time: local.format("%H:%M:%S").to_string(),
        icon: time_icon(local.hour()),
    }
}

/// Title of the locale's Wikipedia article for the current day.
///
/// Japan: `10月18日`. Sweden: `18_oktober` (zero-padded day, Swedish month name).
pub fn day_key(locale: Locale, now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&locale.timezone());
    match locale {
        Locale::Japan => format!("{}月{}日", local.month(), local.day()),
        Locale::Sweden => local
            .format_localized("%d-%B", chrono::Locale::sv_SE)
            .to_string()
            .replacen('-', "_", 1),
    }
}

/// [`day_key`], percent-encoded for use as a query value.
pub fn encoded_day_key(locale: Locale, now: DateTime<Utc>) -> String {
    urlencoding::encode(&day_key(locale, now)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_time_icon_buckets() {
        for hour in 0..24 {
            let expected = match hour {
                19..=23 | 0..=3 => NIGHT,
                16..=18 => SUNSET,
                6..=15 => DAY,
                _ => SUNRISE,
            };
            assert_eq!(time_icon(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn test_read_clock_summer_time() {
        // CEST (+02:00) and JST (+09:00)
        let now = at(2026, 10, 18, 10, 30);
        let sweden = read_clock(Locale::Sweden, now);
        assert_eq!(sweden.date, "2026-10-18");
        assert_eq!(sweden.time, "12:30:00");
        assert_eq!(sweden.icon, DAY);

        let japan = read_clock(Locale::Japan, now);
        assert_eq!(japan.date, "2026-10-18");
        assert_eq!(japan.time, "19:30:00");
        assert_eq!(japan.icon, NIGHT);
    }

    #[test]
    fn test_read_clock_crosses_midnight_in_winter() {
        // CET (+01:00)
        let now = at(2026, 1, 5, 23, 30);
        let sweden = read_clock(Locale::Sweden, now);
        assert_eq!(sweden.date, "2026-01-06");
        assert_eq!(sweden.time, "00:30:00");
        assert_eq!(sweden.icon, NIGHT);

        let japan = read_clock(Locale::Japan, now);
        assert_eq!(japan.time, "08:30:00");
        assert_eq!(japan.icon, DAY);
    }

    #[test]
    fn test_japan_day_key() {
        let now = at(2026, 1, 5, 23, 30);
        assert_eq!(day_key(Locale::Japan, now), "1月6日");
        assert_eq!(
            encoded_day_key(Locale::Japan, at(2026, 10, 18, 10, 30)),
            "10%E6%9C%8818%E6%97%A5"
        );
    }

    #[test]
    fn test_sweden_day_key() {
        assert_eq!(day_key(Locale::Sweden, at(2026, 10, 18, 10, 30)), "18_oktober");
        assert_eq!(day_key(Locale::Sweden, at(2026, 1, 5, 23, 30)), "06_januari");
        assert_eq!(
            encoded_day_key(Locale::Sweden, at(2026, 10, 18, 10, 30)),
            "18_oktober"
        );
    }

    #[test]
    fn test_sweden_day_key_follows_stockholm_date() {
        // 22:30 UTC on April 30 is already May 1 in CEST
        let key = encoded_day_key(Locale::Sweden, at(2026, 4, 30, 22, 30));
        assert_eq!(key, "01_maj");
    }
}
