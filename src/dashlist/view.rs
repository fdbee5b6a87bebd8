//! # View State Controller
//!
//! One list view = one [`ViewSpec`] (what is searchable, default order, which
//! columns to show) plus one [`ViewState`] (what the user asked for). The
//! visible page is always recomputed from scratch by [`derive`]:
//!
//! ```text
//! all records ─▶ filter (AND) ─▶ search (OR over fields) ─▶ sort ─▶ paginate
//! ```
//!
//! `derive` is pure: recency filters read `ViewState::as_of` instead of the
//! clock, so the same records and state always give the same page.
//!
//! [`ViewController`] owns the state and the record cache for a single view
//! and applies the transition rules:
//!
//! - search, filter, sort and page-size changes reset the page to 1
//! - a page change touches nothing else
//! - a rejected change leaves the state exactly as it was
//!
//! Its data phase moves `Idle -> Loading -> Ready`, and back to `Loading`
//! only when the cache is invalidated after a mutation.

use crate::error::{Result, ValidationError};
use crate::filter::{matches_all, FilterCriterion};
use crate::model::{EntityKind, Record, CREATED_AT};
use crate::pager::{paginate, PageRequest, PageResult, DEFAULT_PAGE_SIZE};
use crate::search::SearchQuery;
use crate::sort::{sort_records, SortKey};
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Static description of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSpec {
    pub kind: EntityKind,
    /// Fields the free-text search looks at
    pub search_fields: Vec<String>,
    /// Order used when the state does not pick one
    pub default_sort: Option<SortKey>,
    /// Fields shown by table renderers, in order
    pub columns: Vec<String>,
}

impl ViewSpec {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            search_fields: Vec::new(),
            default_sort: None,
            columns: Vec::new(),
        }
    }

    /// The dashboard's built-in view for a collection.
    pub fn for_kind(kind: EntityKind) -> Self {
        let (search, columns): (&[&str], &[&str]) = match kind {
            EntityKind::User => (
                &["name", "email", "displayName"],
                &["name", "email", "role", "packageSub", "lastLogin"],
            ),
            EntityKind::Content => (
                &["title", "author", "collection", "genre"],
                &["title", "author", "collection", "package", "status", "createdAt"],
            ),
            EntityKind::Blog => (
                &["content", "author.name", "author.username"],
                &["author.name", "content", "createdAt"],
            ),
            EntityKind::Employee => (
                &["name", "email"],
                &["name", "email", "role", "department", "status"],
            ),
        };
        Self {
            kind,
            search_fields: to_strings(search),
            default_sort: Some(SortKey::desc(CREATED_AT)),
            columns: to_strings(columns),
        }
    }

    pub fn with_search_fields(mut self, fields: Vec<String>) -> Self {
        self.search_fields = fields;
        self
    }

    pub fn with_default_sort(mut self, sort: Option<SortKey>) -> Self {
        self.default_sort = sort;
        self
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// What the user currently asked the view to show.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search: String,
    pub filters: Vec<FilterCriterion>,
    /// Overrides the view's default sort when set
    pub sort: Option<SortKey>,
    pub page_index: usize,
    pub page_size: usize,
    /// Reference time for recency filters
    pub as_of: DateTime<Utc>,
}

impl ViewState {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            search: String::new(),
            filters: Vec::new(),
            sort: None,
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
            as_of,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_index, self.page_size)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

/// Compute the visible page.
///
/// `records` is `None` while the collection is still being fetched; the
/// result is then an empty page flagged as loading. Page request validation
/// runs first, so an invalid state is rejected even before data arrives.
pub fn derive(
    records: Option<&[Record]>,
    spec: &ViewSpec,
    state: &ViewState,
) -> std::result::Result<PageResult<Record>, ValidationError> {
    let request = state.page_request();
    request.validate()?;

    let Some(records) = records else {
        return Ok(PageResult::loading(request));
    };

    let query = SearchQuery::new(&state.search);
    let mut matched: Vec<Record> = records
        .iter()
        .filter(|r| matches_all(r, &state.filters, state.as_of))
        .filter(|r| query.matches(r, &spec.search_fields))
        .cloned()
        .collect();

    if let Some(key) = state.sort.as_ref().or(spec.default_sort.as_ref()) {
        sort_records(&mut matched, key);
    }

    let page = paginate(&matched, request)?;
    debug!(
        kind = %spec.kind,
        candidates = records.len(),
        matched = page.total_count,
        page = page.page_index,
        pages = page.total_pages,
        "derived view"
    );
    Ok(page)
}

/// Data phase of a view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewPhase {
    #[default]
    Idle,
    Loading,
    Ready(Vec<Record>),
}

/// Per-view state holder: record cache plus the user's current choices.
#[derive(Debug, Clone)]
pub struct ViewController {
    spec: ViewSpec,
    state: ViewState,
    phase: ViewPhase,
    page_sizes: Option<Vec<usize>>,
}

impl ViewController {
    pub fn new(spec: ViewSpec) -> Self {
        Self {
            spec,
            state: ViewState::default(),
            phase: ViewPhase::Idle,
            page_sizes: None,
        }
    }

    /// Restrict page sizes to an allow-list.
    pub fn with_page_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.page_sizes = Some(sizes);
        self
    }

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ViewPhase::Loading)
    }

    /// Cached records, once loaded.
    pub fn records(&self) -> Option<&[Record]> {
        match &self.phase {
            ViewPhase::Ready(records) => Some(records),
            _ => None,
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.search = text.into();
        self.state.page_index = 1;
    }

    /// Replace all filter criteria.
    pub fn set_filter(&mut self, criteria: Vec<FilterCriterion>) {
        self.state.filters = criteria;
        self.filters_changed();
    }

    pub fn add_filter(&mut self, criterion: FilterCriterion) {
        self.state.filters.push(criterion);
        self.filters_changed();
    }

    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        self.state.page_index = 1;
        self.state.as_of = Utc::now();
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.state.sort = sort;
        self.state.page_index = 1;
    }

    /// Move to another page. Pages past the end are allowed and render empty.
    pub fn set_page(&mut self, index: usize) -> std::result::Result<(), ValidationError> {
        if index == 0 {
            warn!(index, "rejected page index");
            return Err(ValidationError::PageIndex(index));
        }
        self.state.page_index = index;
        Ok(())
    }

    pub fn set_page_size(&mut self, size: usize) -> std::result::Result<(), ValidationError> {
        if size == 0 {
            warn!(size, "rejected page size");
            return Err(ValidationError::PageSize(size));
        }
        if let Some(allowed) = &self.page_sizes {
            if !allowed.contains(&size) {
                warn!(size, ?allowed, "page size not in allow-list");
                return Err(ValidationError::PageSizeNotAllowed {
                    size,
                    allowed: allowed.clone(),
                });
            }
        }
        self.state.page_size = size;
        self.state.page_index = 1;
        Ok(())
    }

    /// Pin the reference time used by recency filters.
    pub fn set_reference_time(&mut self, as_of: DateTime<Utc>) {
        self.state.as_of = as_of;
    }

    pub fn begin_loading(&mut self) {
        self.phase = ViewPhase::Loading;
    }

    pub fn finish_loading(&mut self, records: Vec<Record>) {
        self.phase = ViewPhase::Ready(records);
        self.state.as_of = Utc::now();
    }

    /// Drop the cached records after a mutation. Only a loaded view changes.
    pub fn invalidate(&mut self) {
        if let ViewPhase::Ready(_) = self.phase {
            self.phase = ViewPhase::Loading;
        }
    }

    /// Fetch the collection through the store.
    ///
    /// On failure the view stays `Loading` and the error goes back to the
    /// caller to display or retry.
    pub fn refresh<S: DataStore>(&mut self, store: &S) -> Result<()> {
        self.begin_loading();
        match store.fetch_all(self.spec.kind) {
            Ok(records) => {
                info!(kind = %self.spec.kind, count = records.len(), "fetched collection");
                self.finish_loading(records);
                Ok(())
            }
            Err(e) => {
                warn!(kind = %self.spec.kind, error = %e, "fetch failed");
                Err(e)
            }
        }
    }

    pub fn get_view(&self) -> std::result::Result<PageResult<Record>, ValidationError> {
        derive(self.records(), &self.spec, &self.state)
    }

    /// Pull an out-of-range page back to the last one (or 1 for an empty
    /// result). Returns the resulting page index.
    pub fn clamp_page(&mut self) -> usize {
        if let Ok(view) = self.get_view() {
            if !view.loading {
                let last = view.total_pages.max(1);
                if self.state.page_index > last {
                    debug!(from = self.state.page_index, to = last, "clamped page");
                    self.state.page_index = last;
                }
            }
        }
        self.state.page_index
    }
}
