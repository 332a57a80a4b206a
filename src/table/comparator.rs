use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FieldValue, Record, TableError, parse_date};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Orders two values of the same field.
///
/// Text compares case-insensitively. Dates compare chronologically, with
/// unparsable dates ordered before every valid one.
pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Date(a), FieldValue::Date(b)) => {
            parse_date(a).ok().cmp(&parse_date(b).ok())
        }
        (a, b) => a.as_str().to_lowercase().cmp(&b.as_str().to_lowercase()),
    }
}

/// Builds the ordering for `field`, suitable for a stable sort.
///
/// Descending is the exact reverse of ascending, so equal keys stay equal and
/// keep their input order.
pub fn build_comparator<R: Record>(
    field: &str,
    direction: SortDirection,
) -> Result<impl Fn(&R, &R) -> Ordering, TableError> {
    let field: R::Field = field
        .parse()
        .map_err(|_| TableError::InvalidSortField(field.to_string()))?;

    Ok(move |a: &R, b: &R| direction.apply(compare_values(a.field(field), b.field(field))))
}
