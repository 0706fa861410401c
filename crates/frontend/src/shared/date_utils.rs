/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use std::fmt;

/// Format a timestamp as DD.MM.YYYY HH:MM
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02"
pub fn format_datetime(at: &DateTime<Utc>) -> String {
    at.format("%d.%m.%Y %H:%M").to_string()
}

/// Format an optional timestamp, "—" when absent
pub fn format_datetime_opt(at: Option<&DateTime<Utc>>) -> String {
    at.map(format_datetime).unwrap_or_else(|| "—".to_string())
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Value for `<input type="datetime-local">`, in the browser's wall-clock time
pub fn to_input_value(at: &DateTime<Utc>) -> String {
    utc_to_local_input(at, browser_offset(at))
}

/// Parse `<input type="datetime-local">` output (seconds optional), empty means none.
/// The value is the browser's wall-clock time.
pub fn parse_input_value(value: &str) -> Option<DateTime<Utc>> {
    let naive = parse_naive(value)?;
    local_to_utc(naive, browser_offset(&naive.and_utc()))
}

/// Wall-clock input value at a fixed offset to UTC
pub fn local_input_to_utc(value: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local_to_utc(parse_naive(value)?, offset)
}

/// UTC instant to a wall-clock input value at a fixed offset
pub fn utc_to_local_input(at: &DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%Y-%m-%dT%H:%M").to_string()
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn local_to_utc(naive: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|at| at.with_timezone(&Utc))
}

/// Browser zone offset in effect at `at`; JS reports minutes as UTC minus local.
#[cfg(target_arch = "wasm32")]
fn browser_offset(at: &DateTime<Utc>) -> FixedOffset {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(
        at.timestamp_millis() as f64,
    ));
    let east_minutes = -(date.get_timezone_offset() as i32);
    FixedOffset::east_opt(east_minutes * 60).unwrap_or_else(|| Utc.fix())
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_offset(_at: &DateTime<Utc>) -> FixedOffset {
    Utc.fix()
}

/// Time left until a moment, rendered as "2d 03:04:05" or "03:04:05"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total_seconds: i64,
}

impl Countdown {
    /// Past targets clamp to zero.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        let left: Duration = target - now;
        Self {
            total_seconds: left.num_seconds().max(0),
        }
    }

    pub fn is_elapsed(&self) -> bool {
        self.total_seconds == 0
    }

    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.total_seconds / 86_400;
        let hours = (self.total_seconds % 86_400) / 3_600;
        let minutes = (self.total_seconds % 3_600) / 60;
        let seconds = self.total_seconds % 60;
        if days > 0 {
            write!(f, "{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
        } else {
            write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, s).unwrap()
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(&at(14, 2, 26)), "15.03.2024 14:02");
        assert_eq!(format_datetime_opt(None), "—");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_input_value_round_trip() {
        let t = at(9, 30, 0);
        assert_eq!(to_input_value(&t), "2024-03-15T09:30");
        assert_eq!(parse_input_value("2024-03-15T09:30"), Some(t));
        assert_eq!(parse_input_value("2024-03-15T09:30:00"), Some(t));
        assert_eq!(parse_input_value("  "), None);
        assert_eq!(parse_input_value("tomorrow"), None);
    }

    #[test]
    fn test_wall_clock_input_uses_zone_offset() {
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
        assert_eq!(local_input_to_utc("2024-05-01T10:00", moscow), Some(expected));
        assert_eq!(utc_to_local_input(&expected, moscow), "2024-05-01T10:00");

        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        let late = local_input_to_utc("2024-05-01T22:30", new_york).unwrap();
        assert_eq!(late, Utc.with_ymd_and_hms(2024, 5, 2, 2, 30, 0).unwrap());
        assert_eq!(utc_to_local_input(&late, new_york), "2024-05-01T22:30");
        assert_eq!(local_input_to_utc("", moscow), None);
    }

    #[test]
    fn test_countdown_display() {
        let now = at(0, 0, 0);
        let target = now + Duration::days(2) + Duration::seconds(3 * 3600 + 4 * 60 + 5);
        assert_eq!(Countdown::between(now, target).to_string(), "2d 03:04:05");
        assert_eq!(Countdown::between(now, at(0, 1, 1)).to_string(), "00:01:01");

        let past = Countdown::between(at(1, 0, 0), now);
        assert!(past.is_elapsed());
        assert_eq!(past.to_string(), "00:00:00");
    }
}
