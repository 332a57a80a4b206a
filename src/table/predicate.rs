use chrono::{Datelike, Duration, Months, NaiveDate};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::debug;

use super::{Record, TableError, parse_date};

/// Relative date range evaluated against an injected "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum DateBucket {
    #[default]
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "today")]
    Today,
    #[strum(serialize = "yesterday")]
    Yesterday,
    #[strum(serialize = "thisWeek")]
    ThisWeek,
    #[strum(serialize = "thisMonth")]
    ThisMonth,
    #[strum(serialize = "lastMonth")]
    LastMonth,
}

impl DateBucket {
    pub fn parse(raw: &str) -> Result<Self, TableError> {
        raw.parse()
            .map_err(|_| TableError::InvalidDateBucket(raw.to_string()))
    }

    /// Whether `date` falls in this bucket relative to `now`.
    pub fn contains(&self, date: NaiveDate, now: NaiveDate) -> bool {
        match self {
            DateBucket::All => true,
            DateBucket::Today => date == now,
            DateBucket::Yesterday => Some(date) == now.checked_sub_signed(Duration::days(1)),
            DateBucket::ThisWeek => week_start(date) == week_start(now),
            DateBucket::ThisMonth => same_month(date, now),
            DateBucket::LastMonth => now
                .checked_sub_months(Months::new(1))
                .is_some_and(|prev| same_month(date, prev)),
        }
    }
}

// Weeks start on Sunday.
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(offset)
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Filter criteria for one record type. Absent criteria always pass.
#[derive(Debug, Clone)]
pub struct Criteria<F> {
    pub search_text: Option<String>,
    pub exact: Vec<(F, String)>,
    pub date_bucket: DateBucket,
    pub now: NaiveDate,
}

impl<F> Criteria<F> {
    pub fn new(now: NaiveDate) -> Self {
        Self {
            search_text: None,
            exact: Vec::new(),
            date_bucket: DateBucket::All,
            now,
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn exact(mut self, field: F, value: impl Into<String>) -> Self {
        self.exact.push((field, value.into()));
        self
    }

    pub fn bucket(mut self, bucket: DateBucket) -> Self {
        self.date_bucket = bucket;
        self
    }
}

/// Evaluates a single record against `criteria`.
pub fn matches<R: Record>(record: &R, criteria: &Criteria<R::Field>) -> bool {
    if let Some(needle) = criteria.search_text.as_deref().filter(|s| !s.is_empty()) {
        let needle = needle.to_lowercase();
        if !record
            .search_values()
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
        {
            return false;
        }
    }

    for (field, expected) in &criteria.exact {
        if expected.is_empty() {
            continue;
        }
        if record.field(*field).as_str() != expected {
            return false;
        }
    }

    if criteria.date_bucket == DateBucket::All {
        return true;
    }

    // Fails closed: no date or an unparsable one never lands in a bucket.
    let Some(raw) = record.date() else {
        return false;
    };
    match parse_date(raw) {
        Ok(date) => criteria.date_bucket.contains(date, criteria.now),
        Err(e) => {
            debug!(error = %e, "Excluding record from date bucket");
            false
        }
    }
}
