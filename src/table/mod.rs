//! Record Table Engine.
//!
//! A pure data pipeline shared by every list view: filter a record
//! collection, sort what survives, and summarise the whole collection.
//! Nothing here performs I/O or reads the clock; "now" is always passed in.

pub mod comparator;
pub mod pipeline;
pub mod predicate;
pub mod roster;
pub mod stats;

use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;

pub use comparator::{SortDirection, build_comparator};
pub use pipeline::{View, ViewConfig, build_view};
pub use predicate::{Criteria, DateBucket, matches};
pub use stats::{Stats, aggregate};

/// Configuration and data errors raised by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TableError {
    #[display(fmt = "invalid sort field: {}", _0)]
    InvalidSortField(String),

    #[display(fmt = "invalid filter field: {}", _0)]
    InvalidFilterField(String),

    #[display(fmt = "invalid date bucket: {}", _0)]
    InvalidDateBucket(String),

    #[display(fmt = "malformed date: {}", _0)]
    MalformedDate(String),
}

impl std::error::Error for TableError {}

/// A borrowed field value, typed enough to pick the right comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    /// ISO `yyyy-MM-dd` string, compared chronologically.
    Date(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => s,
        }
    }
}

/// A record type the pipeline can filter, sort and aggregate.
pub trait Record {
    /// Named fields of the record, parsed from their wire names.
    type Field: Copy + std::str::FromStr;

    /// Values matched by free-text search.
    fn search_values(&self) -> Vec<&str>;

    fn field(&self, field: Self::Field) -> FieldValue<'_>;

    /// The raw date evaluated by date buckets, if the record has one.
    fn date(&self) -> Option<&str> {
        None
    }

    /// Key the statistics group this record under.
    fn group(&self) -> &str;

    /// Whether the record counts toward the headline rate.
    fn is_positive(&self) -> bool {
        false
    }

    /// Groups always present in statistics, even with a zero count.
    fn known_groups() -> &'static [&'static str] {
        &[]
    }
}

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern"));

/// Parses an ISO calendar date as stored on a record.
///
/// Only the exact zero-padded `yyyy-MM-dd` shape is accepted.
pub fn parse_date(raw: &str) -> Result<chrono::NaiveDate, TableError> {
    if !ISO_DATE.is_match(raw) {
        return Err(TableError::MalformedDate(raw.to_string()));
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TableError::MalformedDate(raw.to_string()))
}
