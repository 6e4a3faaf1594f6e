//! List screen definitions and per-screen UI state.

use std::collections::{BTreeMap, HashMap};

use crate::listing::filter::{FilterRule, FilterSpec, FilterValue, Predicate, PredicateRegistry};
use crate::listing::sort::{SortRule, SortSpec};
use crate::listing::{Listable, VisiblePage, derive_visible_page};
use crate::pagination::PageRequest;

static DEFAULT_SORT_RULE: SortRule = SortRule::Value;

/// Declarative description of one admin list screen: which filter keys it
/// offers, how its sortable fields compare, and its fixed page size.
pub struct ListView<T> {
    name: &'static str,
    items_per_page: usize,
    filters: BTreeMap<String, FilterRule>,
    sorts: HashMap<String, SortRule>,
    predicates: PredicateRegistry<T>,
    default_sort: SortSpec,
}

impl<T> ListView<T> {
    /// Creates an empty view. A zero page size is bumped to one.
    pub fn new(name: &'static str, items_per_page: usize) -> Self {
        Self {
            name,
            items_per_page: items_per_page.max(1),
            filters: BTreeMap::new(),
            sorts: HashMap::new(),
            predicates: PredicateRegistry::new(),
            default_sort: SortSpec::none(),
        }
    }

    pub fn filter(mut self, key: impl Into<String>, rule: FilterRule) -> Self {
        self.filters.insert(key.into(), rule);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, rule: SortRule) -> Self {
        self.sorts.insert(field.into(), rule);
        self
    }

    pub fn predicate(mut self, name: impl Into<String>, predicate: Predicate<T>) -> Self {
        self.predicates.register(name, predicate);
        self
    }

    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn filter_rule(&self, key: &str) -> Option<&FilterRule> {
        self.filters.get(key)
    }

    pub fn filter_keys(&self) -> impl Iterator<Item = (&str, &FilterRule)> {
        self.filters.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    /// Rule for `field`, falling back to raw value comparison.
    pub fn sort_rule(&self, field: &str) -> &SortRule {
        self.sorts.get(field).unwrap_or(&DEFAULT_SORT_RULE)
    }

    pub fn predicates(&self) -> &PredicateRegistry<T> {
        &self.predicates
    }

    /// Fresh state for this screen: no filters, default sort, page 1.
    pub fn initial_state(&self) -> ListState {
        ListState {
            sort: self.default_sort.clone(),
            ..ListState::default()
        }
    }
}

/// Filter, sort and page currently selected on a list screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    filters: FilterSpec,
    sort: SortSpec,
    page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            filters: FilterSpec::default(),
            sort: SortSpec::none(),
            page: 1,
        }
    }
}

impl ListState {
    pub fn new(filters: FilterSpec, sort: SortSpec, page: usize) -> Self {
        Self {
            filters,
            sort,
            page: page.max(1),
        }
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Changing a filter returns to the first page.
    pub fn set_filter(&mut self, key: impl Into<String>, value: FilterValue) {
        self.filters.set(key, value);
        self.page = 1;
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.filters.remove(key);
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Changing the sort returns to the first page.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page = 1;
    }

    /// Header-click behaviour: the active field flips direction, any other
    /// field becomes the active one, ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        let sort = if self.sort.field.as_deref() == Some(field) {
            SortSpec {
                field: Some(field.to_string()),
                direction: self.sort.direction.toggle(),
            }
        } else {
            SortSpec::ascending(field)
        };
        self.set_sort(sort);
    }

    /// Selects a page; page `0` is treated as the first page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page_request<T>(&self, view: &ListView<T>) -> PageRequest {
        PageRequest::new(self.page, view.items_per_page())
    }

    /// Runs the list pipeline for this state.
    pub fn derive<'a, T: Listable>(&self, entities: &'a [T], view: &ListView<T>) -> VisiblePage<'a, T> {
        derive_visible_page(
            entities,
            view,
            &self.filters,
            &self.sort,
            self.page_request(view),
        )
    }
}
