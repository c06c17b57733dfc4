//! Calendar date ranges used to filter prescription lists and reports.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Wire format of a calendar date (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive `(start, end)` pair of calendar dates.
///
/// No ordering between `start` and `end` is enforced; an inverted range simply matches nothing
/// on the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing `today`, first and last day inclusive.
    pub fn current_month(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(today);
        Self { start, end }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Query string parameters for this range (`startDate=..&endDate=..`), without a leading `?`.
    pub fn query_string(&self) -> String {
        format!(
            "startDate={}&endDate={}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Date range as received in a query string.
///
/// Either side may be missing; [`RangeQuery::resolve`] falls back to the current month in that
/// case.
#[derive(Clone, Copy, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// First day (inclusive), `YYYY-MM-DD`
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive), `YYYY-MM-DD`
    pub end_date: Option<NaiveDate>,
}

impl RangeQuery {
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => DateRange::new(start, end),
            _ => DateRange::current_month(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_month_spans_first_to_last_day() {
        let range = DateRange::current_month(date(2024, 1, 17));
        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 1, 31)));
    }

    #[test]
    fn test_current_month_handles_leap_february_and_december() {
        assert_eq!(
            DateRange::current_month(date(2024, 2, 29)).end,
            date(2024, 2, 29)
        );
        assert_eq!(
            DateRange::current_month(date(2023, 12, 5)),
            DateRange::new(date(2023, 12, 1), date(2023, 12, 31))
        );
    }

    #[test]
    fn test_query_string_uses_iso_dates() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(range.query_string(), "startDate=2024-01-01&endDate=2024-01-31");
    }

    #[test]
    fn test_range_query_falls_back_to_current_month_when_partial() {
        let today = date(2024, 3, 10);
        let partial = RangeQuery {
            start_date: Some(date(2024, 1, 1)),
            end_date: None,
        };
        assert_eq!(partial.resolve(today), DateRange::current_month(today));

        let full = RangeQuery {
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 1, 2)),
        };
        assert_eq!(
            full.resolve(today),
            DateRange::new(date(2024, 1, 1), date(2024, 1, 2))
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }
}
