//! Date utilities for spreadsheet serial numbers

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Pattern used for every date rendered into extraction output (`yyyy/MM/dd`).
pub const DATE_PATTERN: &str = "%Y/%m/%d";

/// Day zero of the 1900 date system.
///
/// Using 1899-12-30 rather than 1899-12-31 absorbs Excel's phantom
/// 1900-02-29, so every serial from 61 onwards maps to the right day.
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Convert an Excel serial number (1900 date system) to a calendar date.
///
/// The time-of-day fraction is dropped. Returns `None` for negative,
/// non-finite or out-of-range serials.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.floor();
    if days > f64::from(i32::MAX) {
        return None;
    }
    excel_epoch().checked_add_signed(Duration::try_days(days as i64)?)
}

/// Convert a date-time back to a 1900-system serial number.
pub fn datetime_to_excel_serial(dt: NaiveDateTime) -> f64 {
    let elapsed = dt - excel_epoch().and_time(chrono::NaiveTime::MIN);
    elapsed.num_seconds() as f64 / 86_400.0
}

/// Render a date with the fixed output pattern.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_PATTERN).to_string()
}

/// Parse an ISO 8601 date or date-time string, as ODS files store them.
pub fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
}
