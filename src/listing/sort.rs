//! Sort stage of the list pipeline.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::view::ListView;
use crate::listing::{FieldValue, Listable};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Descending order.
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Parses a sort direction from a query parameter.
    ///
    /// `"name"` sorts ascending and `"-name"` descending.
    pub fn parse_from_query(s: &str) -> (Self, &str) {
        if let Some(field) = s.strip_prefix('-') {
            (Self::Descending, field)
        } else {
            (Self::Ascending, s)
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The single active sort field of a list screen, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    /// No sorting: entities keep their collection order.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Descending,
        }
    }

    /// Parses the `sort` query parameter; blank input means no sort.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        let (direction, field) = SortDirection::parse_from_query(query);
        if field.is_empty() {
            return Self::none();
        }
        Self {
            field: Some(field.to_string()),
            direction,
        }
    }

    /// Inverse of [`SortSpec::parse`].
    pub fn to_query(&self) -> Option<String> {
        self.field.as_ref().map(|field| match self.direction {
            SortDirection::Ascending => field.clone(),
            SortDirection::Descending => format!("-{field}"),
        })
    }
}

/// How the comparison value of a sort field is extracted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SortRule {
    /// Compare the raw field value.
    #[default]
    Value,
    /// Map the textual value to a rank; unknown values sort lowest.
    Priority(&'static [(&'static str, i64)]),
    /// Parse both sides to an instant before comparing.
    Timestamp,
}

/// Comparison key; the variant order makes `Empty` sort lowest.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Empty,
    Integer(i64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl SortRule {
    fn key(&self, value: FieldValue<'_>) -> SortKey {
        match self {
            SortRule::Value => match value {
                FieldValue::Empty => SortKey::Empty,
                FieldValue::Text(text) => SortKey::Text(text.into_owned()),
                FieldValue::Integer(value) => SortKey::Integer(value),
                FieldValue::Boolean(value) => SortKey::Integer(i64::from(value)),
                FieldValue::Timestamp(value) => SortKey::Timestamp(value),
            },
            SortRule::Priority(table) => value
                .as_text()
                .and_then(|text| {
                    table
                        .iter()
                        .find(|(name, _)| *name == text.as_ref())
                        .map(|(_, rank)| SortKey::Integer(*rank))
                })
                .unwrap_or(SortKey::Empty),
            SortRule::Timestamp => value
                .as_timestamp()
                .map_or(SortKey::Empty, SortKey::Timestamp),
        }
    }
}

/// Orders `entities` in place by the active sort field. The sort is stable,
/// so entities with equal keys keep their filtered order.
pub fn sort_entities<T: Listable>(entities: &mut Vec<&T>, view: &ListView<T>, sort: &SortSpec) {
    let Some(field) = sort.field.as_deref() else {
        return;
    };
    let rule = view.sort_rule(field);

    let mut keyed: Vec<(SortKey, &T)> = entities
        .drain(..)
        .map(|entity| (rule.key(entity.field(field)), entity))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| sort.direction.apply(a.cmp(b)));

    entities.extend(keyed.into_iter().map(|(_, entity)| entity));
}
