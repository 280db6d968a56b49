use chrono::NaiveDate;

use crate::constants::{ISO_DATE_FORMAT, WIRE_DATE_FORMAT};

/// Format a date the way the predict endpoint expects (`dd.MM.yyyy`).
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Parse a user-entered date, accepting `dd.MM.yyyy` or `yyyy-MM-dd`.
pub fn parse_user_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, WIRE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, ISO_DATE_FORMAT))
        .ok()
}

/// How much of the range the user has picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    None,
    Partial,
    Complete,
}

/// Transient start/end selection for a prediction request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn selection(&self) -> DateSelection {
        match (self.start, self.end) {
            (Some(_), Some(_)) => DateSelection::Complete,
            (None, None) => DateSelection::None,
            _ => DateSelection::Partial,
        }
    }

    /// Both ends, when both are picked.
    pub fn complete(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    /// Both ends formatted for the wire.
    pub fn wire_dates(&self) -> Option<(String, String)> {
        self.complete()
            .map(|(start, end)| (format_wire_date(start), format_wire_date(end)))
    }

    /// Number of calendar days covered, inclusive. `None` for an incomplete or
    /// reversed range.
    pub fn day_count(&self) -> Option<u64> {
        let (start, end) = self.complete()?;
        let days = (end - start).num_days();
        u64::try_from(days).ok().map(|d| d + 1)
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn wire_format_is_day_month_year() {
        assert_eq!(format_wire_date(d(2024, 6, 1)), "01.06.2024");
    }

    #[test]
    fn user_dates_accept_both_formats() {
        assert_eq!(parse_user_date("03.06.2024"), Some(d(2024, 6, 3)));
        assert_eq!(parse_user_date(" 2024-06-03 "), Some(d(2024, 6, 3)));
        assert_eq!(parse_user_date("31.02.2024"), None);
        assert_eq!(parse_user_date("tomorrow"), None);
    }

    #[test]
    fn selection_tracks_picked_ends() {
        let mut range = DateRange::default();
        assert_eq!(range.selection(), DateSelection::None);
        range.end = Some(d(2024, 6, 3));
        assert_eq!(range.selection(), DateSelection::Partial);
        assert!(range.wire_dates().is_none());
        range.start = Some(d(2024, 6, 1));
        assert_eq!(range.selection(), DateSelection::Complete);
        assert_eq!(
            range.wire_dates(),
            Some(("01.06.2024".to_string(), "03.06.2024".to_string()))
        );
        assert_eq!(range.day_count(), Some(3));
    }

    #[test]
    fn reversed_range_has_no_day_count() {
        let range = DateRange::new(Some(d(2024, 6, 3)), Some(d(2024, 6, 1)));
        assert_eq!(range.day_count(), None);
    }
}
