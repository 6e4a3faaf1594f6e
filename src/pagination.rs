use serde::Serialize;

/// Items shown per page on admin list screens unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page links for a pager: `None` marks a gap rendered as an ellipsis.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Requested page of a list: 1-based page number and fixed page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub current_page: usize,
    pub items_per_page: usize,
}

impl PageRequest {
    /// Normalises page `0` to `1` and a zero page size to `1`.
    pub fn new(current_page: usize, items_per_page: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            items_per_page: items_per_page.max(1),
        }
    }

    /// Index of the first item on the page.
    pub fn start_index(&self) -> usize {
        (self.current_page.max(1) - 1).saturating_mul(self.items_per_page)
    }

    /// Exclusive index one past the last item on the page.
    pub fn end_index(&self) -> usize {
        self.start_index().saturating_add(self.items_per_page)
    }
}

/// Returns `[start, end)` of `items` for the requested page. A page past the
/// end yields an empty vector.
pub fn paginate<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    let start = page.start_index();
    if start >= items.len() {
        return Vec::new();
    }
    items
        .into_iter()
        .skip(start)
        .take(page.end_index() - start)
        .collect()
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_items: usize, items_per_page: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let total_pages = total_items.div_ceil(items_per_page.max(1));

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_items,
            total_pages,
        }
    }
}
