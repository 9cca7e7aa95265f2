use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Lines expiring within this many days are flagged.
pub const EXPIRING_SOON_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Fresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpiryInfo {
    pub date: NaiveDate,
    pub days_left: i64,
    pub status: ExpiryStatus,
}

impl ExpiryInfo {
    /// Table row class used to highlight the line.
    pub fn row_class(&self) -> &'static str {
        match self.status {
            ExpiryStatus::Expired => "table-danger",
            ExpiryStatus::ExpiringSoon => "table-warning",
            ExpiryStatus::Fresh => "",
        }
    }
}

pub fn classify(date: NaiveDate, today: NaiveDate) -> ExpiryInfo {
    // Whole calendar days, so any time on `today` rounds up to the same count.
    let days_left = (date - today).num_days();
    let status = if days_left <= 0 {
        ExpiryStatus::Expired
    } else if days_left <= EXPIRING_SOON_DAYS {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Fresh
    };

    ExpiryInfo {
        date,
        days_left,
        status,
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn past_and_same_day_are_expired() {
        let info = classify(today(), today());
        assert_eq!(info.status, ExpiryStatus::Expired);
        assert_eq!(info.days_left, 0);
        assert_eq!(info.row_class(), "table-danger");

        let info = classify(today() - Duration::days(3), today());
        assert_eq!(info.days_left, -3);
        assert_eq!(info.status, ExpiryStatus::Expired);
    }

    #[test]
    fn within_thirty_days_is_flagged() {
        let info = classify(today() + Duration::days(1), today());
        assert_eq!(info.status, ExpiryStatus::ExpiringSoon);

        let info = classify(today() + Duration::days(30), today());
        assert_eq!(info.status, ExpiryStatus::ExpiringSoon);
        assert_eq!(info.row_class(), "table-warning");
    }

    #[test]
    fn later_dates_are_fresh() {
        let info = classify(today() + Duration::days(31), today());
        assert_eq!(info.status, ExpiryStatus::Fresh);
        assert_eq!(info.row_class(), "");
    }
}
