use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::types::SortDirection;

/// Typed value a record exposes for one sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    /// Field not set on this record.
    Missing,
    /// Text, compared case-insensitively.
    Text(&'a str),
    /// Integer, natural ordering.
    Int(i64),
    /// Decimal, total ordering.
    Number(f64),
    /// Instant, compared chronologically.
    Date(DateTime<Utc>),
}

impl SortValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Text(_) => 1,
            Self::Int(_) => 2,
            Self::Number(_) => 3,
            Self::Date(_) => 4,
        }
    }
}

/// Comparator used by every list view.
///
/// Missing values go last when ascending and first when descending. All other
/// values compare by type and the result is inverted for descending order.
pub fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>, direction: SortDirection) -> Ordering {
    let asc = direction == SortDirection::Asc;
    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => {
            if asc {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (_, SortValue::Missing) => {
            if asc {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        _ => {
            let ord = compare_present(a, b);
            if asc { ord } else { ord.reverse() }
        }
    }
}

fn compare_present(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(x), SortValue::Text(y)) => compare_text(x, y),
        (SortValue::Int(x), SortValue::Int(y)) => x.cmp(y),
        (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(y),
        (SortValue::Int(x), SortValue::Number(y)) => (*x as f64).total_cmp(y),
        (SortValue::Number(x), SortValue::Int(y)) => x.total_cmp(&(*y as f64)),
        (SortValue::Date(x), SortValue::Date(y)) => x.cmp(y),
        _ => a.rank().cmp(&b.rank()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
