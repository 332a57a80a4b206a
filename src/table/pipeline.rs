use chrono::NaiveDate;
use serde::Serialize;

use super::{
    Criteria, DateBucket, Record, SortDirection, Stats, TableError, aggregate, build_comparator,
    matches,
};

/// Caller-owned view state: what to filter on and how to sort.
///
/// Field and bucket names stay raw until [`build_view`] validates them, so a
/// bad name surfaces as an error instead of a silently different table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewConfig {
    pub search_text: Option<String>,
    pub exact_filters: Vec<(String, String)>,
    pub date_bucket: Option<String>,
    pub sort_field: String,
    pub sort_direction: SortDirection,
}

impl ViewConfig {
    pub fn sorted_by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            sort_field: field.into(),
            sort_direction: direction,
            ..Self::default()
        }
    }

    pub fn search(mut self, text: Option<String>) -> Self {
        self.search_text = text;
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.exact_filters.push((field.into(), value));
        }
        self
    }

    pub fn bucket(mut self, bucket: Option<String>) -> Self {
        self.date_bucket = bucket;
        self
    }
}

/// Filtered and sorted rows, plus statistics over the full input.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct View<'a, R> {
    pub rows: Vec<&'a R>,
    pub stats: Stats,
}

/// Runs the table pipeline over an already-fetched snapshot.
///
/// The input is never mutated and no state survives the call.
pub fn build_view<'a, R: Record>(
    records: &'a [R],
    config: &ViewConfig,
    now: NaiveDate,
) -> Result<View<'a, R>, TableError> {
    let compare = build_comparator::<R>(&config.sort_field, config.sort_direction)?;
    let criteria = criteria::<R>(config, now)?;

    let mut rows: Vec<&R> = records
        .iter()
        .filter(|record| matches(*record, &criteria))
        .collect();
    rows.sort_by(|a, b| compare(*a, *b));

    Ok(View {
        rows,
        stats: aggregate(records),
    })
}

fn criteria<R: Record>(config: &ViewConfig, now: NaiveDate) -> Result<Criteria<R::Field>, TableError> {
    let date_bucket = match config.date_bucket.as_deref() {
        Some(raw) => DateBucket::parse(raw)?,
        None => DateBucket::All,
    };

    let exact = config
        .exact_filters
        .iter()
        .map(|(name, value)| {
            name.parse::<R::Field>()
                .map(|field| (field, value.clone()))
                .map_err(|_| TableError::InvalidFilterField(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Criteria {
        search_text: config.search_text.clone(),
        exact,
        date_bucket,
        now,
    })
}
