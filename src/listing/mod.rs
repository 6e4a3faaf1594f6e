//! Derived-list pipeline shared by every admin list screen.
//!
//! A list screen renders `filter → sort → paginate` over an in-memory
//! collection. Each stage is a pure function of its inputs so the page can be
//! re-derived on every state change.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::pagination::{PageRequest, paginate};

pub mod filter;
pub mod screens;
pub mod sort;
pub mod view;

pub use filter::{FilterRule, FilterSpec, FilterValue, Predicate, PredicateRegistry, apply_filters};
pub use sort::{SortDirection, SortRule, SortSpec, sort_entities};
pub use view::{ListState, ListView};

/// Value of a single named field, as seen by filters and comparators.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<'a> {
    /// Field is unknown or unset.
    Empty,
    Text(Cow<'a, str>),
    Integer(i64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value.
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    /// Text value that is `Empty` when absent.
    pub fn optional_text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::text)
    }

    /// Timestamp value that is `Empty` when absent.
    pub fn optional_timestamp(value: Option<NaiveDateTime>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::Timestamp)
    }

    /// Textual rendering used for substring and equality matching.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Text(text) => Some(Cow::Borrowed(text.as_ref())),
            FieldValue::Integer(value) => Some(Cow::Owned(value.to_string())),
            FieldValue::Boolean(value) => Some(Cow::Borrowed(if *value { "true" } else { "false" })),
            FieldValue::Timestamp(value) => {
                Some(Cow::Owned(value.format("%Y-%m-%d %H:%M:%S").to_string()))
            }
        }
    }

    /// Instant carried by the field, parsing textual timestamps.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Timestamp(value) => Some(*value),
            FieldValue::Text(text) => parse_timestamp(text),
            _ => None,
        }
    }
}

/// A record that list screens can filter and sort by field name.
///
/// Unknown field names must yield [`FieldValue::Empty`] so that a stale or
/// malformed filter/sort key degrades to a no-op.
pub trait Listable {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// An admin-managed record with a stable identifier.
pub trait Entity: Listable + Clone {
    /// Collection name used in routes and log lines (e.g. `contacts`).
    const KIND: &'static str;

    fn id(&self) -> i32;

    /// Assigns the identifier of a freshly inserted record.
    fn set_id(&mut self, id: i32);

    /// Reason `self` may not be stored next to `other`, if any. Stores check
    /// this against every other record while holding the write lock.
    fn conflict_with(&self, _other: &Self) -> Option<String> {
        None
    }
}

/// The slice of a collection a list screen renders.
#[derive(Debug, PartialEq)]
pub struct VisiblePage<'a, T> {
    /// Entities of the requested page, in display order.
    pub items: Vec<&'a T>,
    /// Number of entities that passed the filter stage.
    pub total: usize,
}

impl<T> VisiblePage<'_, T> {
    pub fn total_pages(&self, items_per_page: usize) -> usize {
        if items_per_page == 0 {
            0
        } else {
            self.total.div_ceil(items_per_page)
        }
    }

    /// Clones the borrowed page into owned records.
    pub fn to_owned_items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().map(|item| (*item).clone()).collect()
    }
}

/// Runs the full pipeline and returns the page to render.
pub fn derive_visible_page<'a, T: Listable>(
    entities: &'a [T],
    view: &ListView<T>,
    filters: &FilterSpec,
    sort: &SortSpec,
    page: PageRequest,
) -> VisiblePage<'a, T> {
    let mut filtered = apply_filters(entities, view, filters);
    sort_entities(&mut filtered, view, sort);
    let total = filtered.len();

    VisiblePage {
        items: paginate(filtered, page),
        total,
    }
}

/// Parses RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or a bare
/// `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::listing::sort::SortRule;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Row {
        pub id: i32,
        pub name: &'static str,
        pub email: &'static str,
        pub status: &'static str,
        pub created_at: &'static str,
    }

    impl Listable for Row {
        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "id" => FieldValue::Integer(self.id.into()),
                "name" => FieldValue::text(self.name),
                "email" => FieldValue::text(self.email),
                "status" => FieldValue::text(self.status),
                "created_at" => FieldValue::text(self.created_at),
                _ => FieldValue::Empty,
            }
        }
    }

    pub(crate) const STATUS_RANK: &[(&str, i64)] = &[
        ("pending", 1),
        ("in_progress", 2),
        ("completed", 3),
        ("spam", 4),
    ];

    pub(crate) fn rows_view() -> ListView<Row> {
        ListView::new("rows", 10)
            .filter("search", FilterRule::substring(&["name", "email"]))
            .filter("status", FilterRule::Equals("status".to_string()))
            .filter("created", FilterRule::DateRange("created_at".to_string()))
            .sort("status", SortRule::Priority(STATUS_RANK))
            .sort("created_at", SortRule::Timestamp)
    }

    pub(crate) fn numbered_rows(count: i32) -> Vec<Row> {
        (1..=count)
            .map(|id| Row {
                id,
                name: "Row",
                email: "row@example.com",
                status: "pending",
                created_at: "2024-01-01",
            })
            .collect()
    }

    fn ids(page: &VisiblePage<'_, Row>) -> Vec<i32> {
        page.items.iter().map(|row| row.id).collect()
    }

    #[test]
    fn pipeline_filters_sorts_and_pages() {
        let rows = vec![
            Row {
                id: 1,
                name: "Alice",
                email: "alice@example.com",
                status: "spam",
                created_at: "2024-03-01",
            },
            Row {
                id: 2,
                name: "Bob",
                email: "bob@example.com",
                status: "pending",
                created_at: "2024-01-01",
            },
            Row {
                id: 3,
                name: "Alina",
                email: "alina@example.com",
                status: "completed",
                created_at: "2024-02-01",
            },
        ];
        let mut filters = FilterSpec::default();
        filters.set("search", FilterValue::Text("ALI".to_string()));

        let page = derive_visible_page(
            &rows,
            &rows_view(),
            &filters,
            &SortSpec::ascending("status"),
            PageRequest::new(1, 10),
        );

        assert_eq!(ids(&page), vec![3, 1]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn pagination_scenario_with_25_items() {
        let rows = numbered_rows(25);
        let view = rows_view();
        let filters = FilterSpec::default();
        let sort = SortSpec::none();

        let first = derive_visible_page(&rows, &view, &filters, &sort, PageRequest::new(1, 10));
        let third = derive_visible_page(&rows, &view, &filters, &sort, PageRequest::new(3, 10));
        let fourth = derive_visible_page(&rows, &view, &filters, &sort, PageRequest::new(4, 10));

        assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&third), (21..=25).collect::<Vec<_>>());
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.total, 25);
        assert_eq!(first.total_pages(10), 3);
    }

    #[test]
    fn pages_cover_collection_exactly_once() {
        let rows: Vec<Row> = numbered_rows(23)
            .into_iter()
            .map(|mut row| {
                if row.id % 3 == 0 {
                    row.status = "spam";
                }
                row
            })
            .collect();
        let view = rows_view();
        let filters = FilterSpec::default();
        let sort = SortSpec::descending("status");

        let all = derive_visible_page(&rows, &view, &filters, &sort, PageRequest::new(1, 100));
        let per_page = 4;
        let mut stitched = Vec::new();
        for page in 1..=all.total_pages(per_page) {
            let visible =
                derive_visible_page(&rows, &view, &filters, &sort, PageRequest::new(page, per_page));
            stitched.extend(ids(&visible));
        }

        assert_eq!(stitched, ids(&all));
    }

    #[test]
    fn parse_timestamp_accepts_common_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-05-01"), Some(midnight));
        assert_eq!(parse_timestamp("2024-05-01 00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-05-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
