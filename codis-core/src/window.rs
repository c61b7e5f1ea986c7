use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::FetchError;

/// Timestamp layout the CODiS API expects for `start`/`end` fields.
const API_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Inclusive day-boundary window, both ends at 00:00:00 local civil time.
///
/// Always spans exactly one calendar month or one calendar year. The service
/// works in Taiwan local time; no timezone conversion happens here, a fixed
/// `+08:00` annotation is attached only when the window is serialized into
/// the request `date` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Window covering one calendar month: the 1st through the last day,
    /// leap-year aware.
    pub fn month(year: i32, month: u32) -> Result<Self, FetchError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| FetchError::InvalidDate(format!("no such month: {year}-{month}")))?;
        let last = first
            .with_day(last_day_of_month(year, month))
            .ok_or_else(|| FetchError::InvalidDate(format!("no such month: {year}-{month}")))?;

        Ok(Self {
            start: first.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
            end: last.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
        })
    }

    /// Window covering one calendar year, Jan 1 through Dec 31.
    pub fn year(year: i32) -> Result<Self, FetchError> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| FetchError::InvalidDate(format!("year out of range: {year}")))?;
        let dec31 = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| FetchError::InvalidDate(format!("year out of range: {year}")))?;

        Ok(Self {
            start: jan1.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
            end: dec31.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
        })
    }

    /// Start timestamp as the API `start` field.
    pub fn start_str(&self) -> String {
        self.start.format(API_FORMAT).to_string()
    }

    /// End timestamp as the API `end` field.
    pub fn end_str(&self) -> String {
        self.end.format(API_FORMAT).to_string()
    }

    /// The `date` field: window start with the fixed millisecond and UTC+8
    /// offset suffix the service requires.
    pub fn request_date(&self) -> String {
        format!("{}.000+08:00", self.start_str())
    }
}

/// Number of days in the given month: day-before-the-next-first, since chrono
/// has no direct month-length accessor.
fn last_day_of_month(year: i32, month: u32) -> u32 {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match next_first {
        Some(d) => d.pred_opt().map_or(28, |prev| prev.day()),
        // Only reachable for a month outside 1..=12, which `DateWindow::month`
        // rejects via `from_ymd_opt` before calling here.
        None => 28,
    }
}

/// Split a `YYYY-MM-DD` string into year and month; the day component must be
/// present but is ignored.
pub fn parse_year_month(date: &str) -> Result<(i32, u32), FetchError> {
    let invalid = || FetchError::InvalidDate(format!("expected 'YYYY-MM-DD', got '{date}'"));

    let parts: Vec<&str> = date.split('-').collect();
    let [year_str, month_str, _day_str] = parts.as_slice() else {
        return Err(invalid());
    };

    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month: u32 = month_str.parse().map_err(|_| invalid())?;

    Ok((year, month))
}

/// Parse a `YYYY` year string.
pub fn parse_year(year: &str) -> Result<i32, FetchError> {
    year.parse()
        .map_err(|_| FetchError::InvalidDate(format!("expected 'YYYY', got '{year}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn month_window_spans_first_to_last_day() {
        let w = DateWindow::month(2024, 3).unwrap();
        assert_eq!(w.start_str(), "2024-03-01T00:00:00");
        assert_eq!(w.end_str(), "2024-03-31T00:00:00");
    }

    #[test]
    fn february_respects_leap_years() {
        assert_eq!(DateWindow::month(2024, 2).unwrap().end.day(), 29);
        assert_eq!(DateWindow::month(2023, 2).unwrap().end.day(), 28);
        assert_eq!(DateWindow::month(2000, 2).unwrap().end.day(), 29);
        assert_eq!(DateWindow::month(1900, 2).unwrap().end.day(), 28);
    }

    #[test]
    fn every_month_length_is_correct() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, days) in expected.iter().enumerate() {
            let w = DateWindow::month(2023, i as u32 + 1).unwrap();
            assert_eq!(w.end.day(), *days, "month {}", i + 1);
        }
    }

    #[test]
    fn month_out_of_range_is_invalid() {
        assert!(matches!(
            DateWindow::month(2024, 0),
            Err(FetchError::InvalidDate(_))
        ));
        assert!(matches!(
            DateWindow::month(2024, 13),
            Err(FetchError::InvalidDate(_))
        ));
    }

    #[test]
    fn year_window_spans_jan_first_to_dec_last() {
        let w = DateWindow::year(2023).unwrap();
        assert_eq!(w.start_str(), "2023-01-01T00:00:00");
        assert_eq!(w.end_str(), "2023-12-31T00:00:00");
    }

    #[test]
    fn request_date_carries_offset_suffix() {
        let w = DateWindow::month(2024, 3).unwrap();
        assert_eq!(w.request_date(), "2024-03-01T00:00:00.000+08:00");
    }

    #[test]
    fn parse_year_month_ignores_the_day() {
        assert_eq!(parse_year_month("2024-03-15").unwrap(), (2024, 3));
        assert_eq!(parse_year_month("2024-03-01").unwrap(), (2024, 3));
    }

    #[test]
    fn parse_year_month_rejects_bad_input() {
        for bad in ["2024-03", "2024/03/15", "abcd-03-15", "2024-xx-15", ""] {
            assert!(
                matches!(parse_year_month(bad), Err(FetchError::InvalidDate(_))),
                "should reject '{bad}'"
            );
        }
    }

    #[test]
    fn parse_year_rejects_non_integers() {
        assert_eq!(parse_year("2023").unwrap(), 2023);
        assert!(matches!(parse_year("20x3"), Err(FetchError::InvalidDate(_))));
        assert!(matches!(parse_year(""), Err(FetchError::InvalidDate(_))));
    }
}
