//! Time-window enum and its per-source date math

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// How far back a search looks. "All" means no date bound at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    /// The start date for a date-bounded query, relative to `now`. `All`
    /// yields no bound. Calendar-month and calendar-year arithmetic is used
    /// for the longer windows, matching how the date pickers behave.
    pub fn start_date(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        let start = match self {
            Self::Hour => now - Duration::hours(1),
            Self::Day => now - Duration::days(1),
            Self::Week => now - Duration::days(7),
            Self::Month => now.checked_sub_months(Months::new(1)).unwrap_or(now),
            Self::Year => now.checked_sub_months(Months::new(12)).unwrap_or(now),
            Self::All => return None,
        };
        Some(start.date_naive())
    }

    /// The end date paired with [`start_date`](Self::start_date): today,
    /// whenever a start date exists.
    pub fn end_date(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            _ => Some(now.date_naive()),
        }
    }

    /// eBird's `back` parameter is day-granular with a 30-day ceiling, so the
    /// finer windows collapse: hour and day both mean 1 day back, and
    /// anything beyond a month falls to the API's two-week default.
    pub fn ebird_days_back(&self) -> u32 {
        match self {
            Self::Hour | Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Year | Self::All => 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_start_date_hour_stays_same_day() {
        assert_eq!(
            TimeWindow::Hour.start_date(noon()),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }

    #[test]
    fn test_start_date_day() {
        assert_eq!(
            TimeWindow::Day.start_date(noon()),
            NaiveDate::from_ymd_opt(2024, 6, 14)
        );
    }

    #[test]
    fn test_start_date_week() {
        assert_eq!(
            TimeWindow::Week.start_date(noon()),
            NaiveDate::from_ymd_opt(2024, 6, 8)
        );
    }

    #[test]
    fn test_start_date_month_is_calendar_month() {
        assert_eq!(
            TimeWindow::Month.start_date(noon()),
            NaiveDate::from_ymd_opt(2024, 5, 15)
        );
    }

    #[test]
    fn test_start_date_year() {
        assert_eq!(
            TimeWindow::Year.start_date(noon()),
            NaiveDate::from_ymd_opt(2023, 6, 15)
        );
    }

    #[test]
    fn test_all_has_no_bounds() {
        assert_eq!(TimeWindow::All.start_date(noon()), None);
        assert_eq!(TimeWindow::All.end_date(noon()), None);
    }

    #[test]
    fn test_end_date_is_today_when_bounded() {
        for window in [
            TimeWindow::Hour,
            TimeWindow::Day,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::Year,
        ] {
            assert_eq!(window.end_date(noon()), NaiveDate::from_ymd_opt(2024, 6, 15));
        }
    }

    #[test]
    fn test_month_end_clamps() {
        // March 31 minus one calendar month lands on the last day of February
        let end_of_march = Utc.with_ymd_and_hms(2024, 3, 31, 8, 0, 0).unwrap();
        assert_eq!(
            TimeWindow::Month.start_date(end_of_march),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_ebird_days_back_mapping() {
        assert_eq!(TimeWindow::Hour.ebird_days_back(), 1);
        assert_eq!(TimeWindow::Day.ebird_days_back(), 1);
        assert_eq!(TimeWindow::Week.ebird_days_back(), 7);
        assert_eq!(TimeWindow::Month.ebird_days_back(), 30);
        assert_eq!(TimeWindow::Year.ebird_days_back(), 14);
        assert_eq!(TimeWindow::All.ebird_days_back(), 14);
    }
}
