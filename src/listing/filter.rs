//! Filter stage of the list pipeline.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::view::ListView;
use crate::listing::Listable;

/// Current value of one filter key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Free text, matched case-insensitively.
    Text(String),
    /// Enumerated value such as a status.
    Tag(String),
    /// Enumerated value judged at a fixed instant, such as `active` as of
    /// the request time.
    TagAt { tag: String, at: NaiveDateTime },
    /// Inclusive instant range; an absent bound is open.
    DateRange {
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    },
}

impl FilterValue {
    /// An empty value imposes no constraint.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(value) | FilterValue::Tag(value) => value.trim().is_empty(),
            FilterValue::TagAt { tag, .. } => tag.trim().is_empty(),
            FilterValue::DateRange { start, end } => start.is_none() && end.is_none(),
        }
    }

    fn as_needle(&self) -> Option<String> {
        match self {
            FilterValue::Text(value) | FilterValue::Tag(value) => Some(value.to_lowercase()),
            FilterValue::TagAt { tag, .. } => Some(tag.to_lowercase()),
            FilterValue::DateRange { .. } => None,
        }
    }
}

/// Active filter keys and their values for one list screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec(BTreeMap<String, FilterValue>);

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a filter key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        self.0.insert(key.into(), value);
    }

    /// Builder-style [`FilterSpec::set`].
    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    /// Keys whose value is non-empty.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn is_active(&self) -> bool {
        self.active().next().is_some()
    }
}

/// Named predicate for filter keys that need logic the built-in rules lack.
pub type Predicate<T> = fn(&T, &FilterValue) -> bool;

/// String-keyed table of custom predicates available to a view.
pub struct PredicateRegistry<T> {
    predicates: HashMap<String, Predicate<T>>,
}

impl<T> Default for PredicateRegistry<T> {
    fn default() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }
}

impl<T> PredicateRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, predicate: Predicate<T>) {
        self.predicates.insert(name.into(), predicate);
    }

    pub fn get(&self, name: &str) -> Option<Predicate<T>> {
        self.predicates.get(name).copied()
    }
}

/// How a filter key constrains an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterRule {
    /// Case-insensitive substring match on any of the listed fields.
    Substring(Vec<String>),
    /// Case-insensitive equality with an enumerated field.
    Equals(String),
    /// Timestamp field lies within the (inclusive) range.
    DateRange(String),
    /// The entity's own `[start, end]` window overlaps the range. Missing
    /// window bounds are unbounded.
    DateOverlap { start: String, end: String },
    /// Predicate registered under this name in the view's registry.
    Custom(String),
}

impl FilterRule {
    pub fn substring(fields: &[&str]) -> Self {
        FilterRule::Substring(fields.iter().map(|field| field.to_string()).collect())
    }

    /// Whether `entity` satisfies this rule for a non-empty `value`.
    pub fn matches<T: Listable>(
        &self,
        entity: &T,
        value: &FilterValue,
        predicates: &PredicateRegistry<T>,
    ) -> bool {
        match self {
            FilterRule::Substring(fields) => {
                let Some(needle) = value.as_needle() else {
                    return true;
                };
                fields.iter().any(|field| {
                    entity
                        .field(field)
                        .as_text()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            }
            FilterRule::Equals(field) => {
                let Some(needle) = value.as_needle() else {
                    return true;
                };
                entity
                    .field(field)
                    .as_text()
                    .is_some_and(|text| text.to_lowercase() == needle)
            }
            FilterRule::DateRange(field) => {
                let FilterValue::DateRange { start, end } = value else {
                    return true;
                };
                entity
                    .field(field)
                    .as_timestamp()
                    .is_some_and(|instant| within(instant, *start, *end))
            }
            FilterRule::DateOverlap {
                start: start_field,
                end: end_field,
            } => {
                let FilterValue::DateRange { start, end } = value else {
                    return true;
                };
                let window_start = entity.field(start_field).as_timestamp();
                let window_end = entity.field(end_field).as_timestamp();
                overlaps(window_start, window_end, *start, *end)
            }
            FilterRule::Custom(name) => match predicates.get(name) {
                Some(predicate) => predicate(entity, value),
                None => {
                    log::warn!("Unknown filter predicate `{name}`, ignoring");
                    true
                }
            },
        }
    }
}

fn within(
    instant: NaiveDateTime,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> bool {
    start.is_none_or(|start| instant >= start) && end.is_none_or(|end| instant <= end)
}

fn overlaps(
    window_start: Option<NaiveDateTime>,
    window_end: Option<NaiveDateTime>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> bool {
    let starts_before_range_ends = match (window_start, end) {
        (Some(window_start), Some(end)) => window_start <= end,
        _ => true,
    };
    let ends_after_range_starts = match (window_end, start) {
        (Some(window_end), Some(start)) => window_end >= start,
        _ => true,
    };
    starts_before_range_ends && ends_after_range_starts
}

/// Keeps the entities that satisfy every active filter key, preserving order.
pub fn apply_filters<'a, T, I>(entities: I, view: &ListView<T>, filters: &FilterSpec) -> Vec<&'a T>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let active: Vec<(&FilterRule, &FilterValue)> = filters
        .active()
        .filter_map(|(key, value)| view.filter_rule(key).map(|rule| (rule, value)))
        .collect();

    entities
        .into_iter()
        .filter(|entity| {
            active
                .iter()
                .all(|(rule, value)| rule.matches(*entity, value, view.predicates()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::parse_timestamp;
    use crate::listing::tests::{Row, rows_view};

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "Alice",
                email: "alice@example.com",
                status: "pending",
                created_at: "2024-01-10",
            },
            Row {
                id: 2,
                name: "Bob",
                email: "bob@corp.io",
                status: "completed",
                created_at: "2024-02-10",
            },
            Row {
                id: 3,
                name: "Carol",
                email: "carol@example.com",
                status: "spam",
                created_at: "not a date",
            },
        ]
    }

    fn ids(items: &[&Row]) -> Vec<i32> {
        items.iter().map(|row| row.id).collect()
    }

    #[test]
    fn empty_filter_values_impose_no_constraint() {
        let data = rows();
        let filters = FilterSpec::new()
            .with("search", FilterValue::Text("   ".to_string()))
            .with(
                "created",
                FilterValue::DateRange {
                    start: None,
                    end: None,
                },
            );

        assert!(!filters.is_active());
        assert_eq!(ids(&apply_filters(&data, &rows_view(), &filters)), vec![1, 2, 3]);
    }

    #[test]
    fn search_matches_any_field_and_ands_with_status() {
        let data = rows();
        let view = rows_view();
        let search = FilterSpec::new().with("search", FilterValue::Text("EXAMPLE".to_string()));
        assert_eq!(ids(&apply_filters(&data, &view, &search)), vec![1, 3]);

        let combined = search.with("status", FilterValue::Tag("spam".to_string()));
        assert_eq!(ids(&apply_filters(&data, &view, &combined)), vec![3]);
    }

    #[test]
    fn search_text_is_matched_as_given() {
        let data = rows();
        let view = rows_view();

        let padded = FilterSpec::new().with("search", FilterValue::Text("alice ".to_string()));
        assert!(apply_filters(&data, &view, &padded).is_empty());

        let exact = FilterSpec::new().with("search", FilterValue::Text("ALIC".to_string()));
        assert_eq!(ids(&apply_filters(&data, &view, &exact)), vec![1]);
    }

    #[test]
    fn status_filter_selects_single_pending_entity() {
        let data = rows();
        let filters = FilterSpec::new().with("status", FilterValue::Tag("pending".to_string()));

        assert_eq!(ids(&apply_filters(&data, &rows_view(), &filters)), vec![1]);
    }

    #[test]
    fn date_range_is_inclusive_and_skips_unparseable() {
        let data = rows();
        let filters = FilterSpec::new().with(
            "created",
            FilterValue::DateRange {
                start: parse_timestamp("2024-01-10"),
                end: None,
            },
        );

        assert_eq!(ids(&apply_filters(&data, &rows_view(), &filters)), vec![1, 2]);
    }

    #[test]
    fn unknown_keys_and_mismatched_values_degrade_to_no_op() {
        let data = rows();
        let filters = FilterSpec::new()
            .with("nonexistent", FilterValue::Text("zzz".to_string()))
            .with(
                "search",
                FilterValue::DateRange {
                    start: parse_timestamp("2030-01-01"),
                    end: None,
                },
            );

        assert_eq!(ids(&apply_filters(&data, &rows_view(), &filters)), vec![1, 2, 3]);
    }

    #[test]
    fn custom_predicate_is_resolved_by_name() {
        fn corporate(row: &Row, value: &FilterValue) -> bool {
            let wanted = matches!(value, FilterValue::Tag(tag) if tag == "yes");
            row.email.ends_with(".io") == wanted
        }

        let data = rows();
        let view = rows_view()
            .filter("corporate", FilterRule::Custom("corporate".to_string()))
            .filter("missing", FilterRule::Custom("not_registered".to_string()))
            .predicate("corporate", corporate);
        let filters = FilterSpec::new()
            .with("corporate", FilterValue::Tag("yes".to_string()))
            .with("missing", FilterValue::Tag("anything".to_string()));

        assert_eq!(ids(&apply_filters(&data, &view, &filters)), vec![2]);
    }

    #[test]
    fn overlap_treats_missing_bounds_as_open() {
        let at = |s: &str| parse_timestamp(s);
        assert!(overlaps(at("2024-01-01"), at("2024-01-31"), at("2024-01-31"), None));
        assert!(!overlaps(at("2024-01-01"), at("2024-01-31"), at("2024-02-01"), None));
        assert!(overlaps(None, None, at("2024-02-01"), at("2024-02-02")));
        assert!(!overlaps(at("2024-03-01"), None, None, at("2024-02-01")));
    }

    #[test]
    fn filtering_is_idempotent_and_never_grows() {
        let data = rows();
        let view = rows_view();
        let filters = FilterSpec::new().with("search", FilterValue::Text("o".to_string()));

        let once = apply_filters(&data, &view, &filters);
        let twice = apply_filters(once.iter().copied(), &view, &filters);

        assert_eq!(once, twice);
        assert!(once.len() <= data.len());
    }
}
