use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::listing::{
    FilterRule, FilterSpec, FilterValue, ListState, ListView, SortSpec, parse_timestamp,
};
use crate::pagination::Paginated;

/// Raw query parameters of an admin list request.
///
/// `page` and `sort` are reserved; every other key is a filter. Range filters
/// arrive as `{key}_from` and `{key}_to`.
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub sort: Option<String>,
    pub params: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn from_params(params: HashMap<String, String>) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in params {
            match key.as_str() {
                // An unparseable page falls back to the first one.
                "page" => query.page = value.trim().parse().ok(),
                "sort" => query.sort = Some(value),
                _ => {
                    query.params.insert(key, value);
                }
            }
        }
        query
    }

    /// Builds the list state for `view`. Keys the view does not know are
    /// ignored. Custom filters are judged as of `now`.
    pub fn to_state<T>(&self, view: &ListView<T>, now: NaiveDateTime) -> ListState {
        let mut filters = FilterSpec::new();
        for (key, rule) in view.filter_keys() {
            let value = match rule {
                FilterRule::DateRange(_) | FilterRule::DateOverlap { .. } => {
                    let start = self.param(&format!("{key}_from")).and_then(parse_timestamp);
                    let end = self.param(&format!("{key}_to")).and_then(parse_range_end);
                    FilterValue::DateRange { start, end }
                }
                FilterRule::Substring(_) => match self.param(key) {
                    Some(value) => FilterValue::Text(value.to_string()),
                    None => continue,
                },
                FilterRule::Equals(_) => match self.param(key) {
                    Some(value) => FilterValue::Tag(value.to_string()),
                    None => continue,
                },
                FilterRule::Custom(_) => match self.param(key) {
                    Some(value) => FilterValue::TagAt {
                        tag: value.to_string(),
                        at: now,
                    },
                    None => continue,
                },
            };
            if !value.is_empty() {
                filters.set(key, value);
            }
        }

        let sort = match self.sort.as_deref().map(str::trim) {
            Some(sort) if !sort.is_empty() => SortSpec::parse(sort),
            _ => view.initial_state().sort().clone(),
        };

        ListState::new(filters, sort, self.page.unwrap_or(1))
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Upper bound of a range. A bare date covers the whole day.
fn parse_range_end(value: &str) -> Option<NaiveDateTime> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(23, 59, 59),
        Err(_) => parse_timestamp(value),
    }
}

/// One rendered page of an admin list.
#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    pub kind: &'static str,
    pub list: Paginated<T>,
    /// Active sort in query form, e.g. `-created_at`.
    pub sort: Option<String>,
    /// Filter parameters echoed back for the filter bar.
    pub filters: BTreeMap<String, String>,
}
