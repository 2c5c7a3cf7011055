//! Paginated grid/list presentation state for one catalog page.
//!
//! DESIGN
//! ======
//! [`CatalogListing`] owns the candidate-list load state, the page's
//! [`FilterState`], sort order, view mode and pagination. The UI renders
//! whatever [`CatalogListing::view`] returns, which is exactly one of
//! loading skeletons, a load failure, an explicit empty state, or a page of
//! results. Loading and empty are distinct variants so a pending fetch never
//! flashes "no results".
//!
//! Fetches are tagged with a [`Ticket`] from a monotonic [`RequestSeq`]; a
//! response carrying a superseded ticket is dropped, so the last request
//! issued always wins regardless of arrival order.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterState, FilterStats, FilterValue};
use crate::product::Product;

/// Items-per-page choices offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [12, 24, 36, 48];

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Maximum number of numbered page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Card grid or row list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    PartNumber,
    Manufacturer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => cmp_ignore_case(&a.name, &b.name),
            SortKey::PartNumber => cmp_ignore_case(
                a.part_number.as_deref().unwrap_or_default(),
                b.part_number.as_deref().unwrap_or_default(),
            ),
            SortKey::Manufacturer => cmp_ignore_case(&a.manufacturer.name, &b.manufacturer.name),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Candidate-list fetch state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Vec<Product>),
    Failed(String),
}

/// Identifies one candidate-list request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic request counter implementing last-request-wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    /// Issue a ticket that supersedes every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// One rendered page of results.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSlice<'a> {
    pub mode: ViewMode,
    pub items: Vec<&'a Product>,
    /// 1-based current page.
    pub page: usize,
    pub page_count: usize,
    /// Page numbers for the numbered pagination buttons.
    pub window: Vec<usize>,
    pub stats: FilterStats,
}

/// What the presentation layer should render right now.
#[derive(Clone, Debug, PartialEq)]
pub enum ListingView<'a> {
    /// Candidates not yet resolved: render `placeholders` skeletons shaped
    /// for `mode`.
    Loading { mode: ViewMode, placeholders: usize },
    Failed { message: &'a str },
    /// Zero results after filtering.
    Empty { query: &'a str },
    Results(PageSlice<'a>),
}

/// Listing state for one catalog page.
#[derive(Clone, Debug)]
pub struct CatalogListing {
    load: LoadState,
    seq: RequestSeq,
    filter: FilterState,
    sort: Option<Sort>,
    mode: ViewMode,
    page: usize,
    page_size: usize,
}

impl Default for CatalogListing {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogListing {
    #[must_use]
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            seq: RequestSeq::default(),
            filter: FilterState::new(),
            sort: None,
            mode: ViewMode::Grid,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    // -- loading --

    /// Start a candidate-list fetch. The returned ticket must be handed
    /// back to [`Self::finish_load`].
    pub fn begin_load(&mut self) -> Ticket {
        self.load = LoadState::Loading;
        self.seq.issue()
    }

    /// Apply a fetch result. Returns `false` and leaves state untouched
    /// when `ticket` has been superseded by a newer request.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Product>, String>) -> bool {
        if !self.seq.is_current(ticket) {
            tracing::debug!(?ticket, "dropping superseded candidate list");
            return false;
        }
        self.load = match result {
            Ok(products) => LoadState::Ready(products),
            Err(message) => {
                tracing::warn!(%message, "candidate list failed to load");
                LoadState::Failed(message)
            }
        };
        self.page = 1;
        true
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Loaded candidates, empty while loading or after a failure.
    #[must_use]
    pub fn candidates(&self) -> &[Product] {
        match &self.load {
            LoadState::Ready(products) => products,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    // -- filters --

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Mutate the filter state. Any filter change returns to page 1.
    pub fn update_filter(&mut self, f: impl FnOnce(&mut FilterState)) {
        f(&mut self.filter);
        self.page = 1;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.update_filter(|filter| filter.set_query(query));
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: FilterValue) {
        self.update_filter(|filter| filter.set(key, value));
    }

    pub fn remove_filter(&mut self, key: &str) {
        self.update_filter(|filter| {
            filter.remove(key);
        });
    }

    pub fn clear_filters(&mut self) {
        self.update_filter(FilterState::clear);
    }

    /// Drop every filter and the search query.
    pub fn reset_filters(&mut self) {
        self.update_filter(FilterState::reset);
    }

    // -- sort / mode --

    #[must_use]
    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
        self.page = 1;
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    // -- pagination --

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change items per page. Zero is ignored. Returns to page 1.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        self.page_size = size;
        self.page = 1;
        true
    }

    /// Filtered and sorted candidates.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        let mut visible = self.filter.apply(self.candidates());
        if let Some(sort) = self.sort {
            visible.sort_by(|a, b| sort.compare(a, b));
        }
        visible
    }

    /// `ceil(filtered / page_size)`; zero when nothing matches.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(self.page_size)
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    pub fn next_page(&mut self) -> bool {
        if self.page >= self.page_count() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Page numbers to show as buttons, centred on the current page.
    #[must_use]
    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.page, self.page_count())
    }

    /// The single state the presentation layer renders.
    #[must_use]
    pub fn view(&self) -> ListingView<'_> {
        let products = match &self.load {
            LoadState::Loading => {
                return ListingView::Loading { mode: self.mode, placeholders: self.page_size };
            }
            LoadState::Failed(message) => return ListingView::Failed { message: message.as_str() },
            LoadState::Ready(products) => products,
        };
        let visible = self.visible();
        if visible.is_empty() {
            return ListingView::Empty { query: self.filter.query() };
        }
        let page_count = visible.len().div_ceil(self.page_size);
        let page = self.page.min(page_count);
        let items = visible.into_iter().skip((page - 1) * self.page_size).take(self.page_size).collect();
        ListingView::Results(PageSlice {
            mode: self.mode,
            items,
            page,
            page_count,
            window: page_window(page, page_count),
            stats: self.filter.stats(products),
        })
    }
}

fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let end = (current.saturating_sub(PAGE_WINDOW / 2).max(1) + PAGE_WINDOW - 1).min(total);
    let start = (end + 1).saturating_sub(PAGE_WINDOW).max(1);
    (start..=end).collect()
}
