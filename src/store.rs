use crate::models::{MovieDetail, MovieSummary, PageResult};

/// Transient UI-facing catalog state, mutated reducer-style.
///
/// Not persisted and not shared globally: callers construct an instance and
/// thread it through. Each mutation is atomic under the single-threaded
/// execution model. When two searches are in flight at once the last
/// response to land wins; there is no request-generation guard.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStore {
    pub popular: Vec<MovieSummary>,
    pub popular_loading: bool,
    pub popular_error: Option<String>,

    pub current: Option<MovieDetail>,
    pub current_loading: bool,
    pub current_error: Option<String>,

    pub search_results: Vec<MovieSummary>,
    pub search_loading: bool,
    pub search_error: Option<String>,
    pub query: String,

    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            popular: Vec::new(),
            popular_loading: false,
            popular_error: None,
            current: None,
            current_loading: false,
            current_error: None,
            search_results: Vec::new(),
            search_loading: false,
            search_error: None,
            query: String::new(),
            page: 1,
            total_pages: 1,
            total_results: 0,
        }
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_popular(&mut self) {
        self.popular_loading = true;
    }

    pub fn apply_popular(&mut self, page: u32, result: PageResult) {
        self.popular = result.items;
        self.page = page;
        self.total_pages = result.total_pages;
        self.total_results = result.total_results;
        self.popular_loading = false;
        self.popular_error = None;
    }

    pub fn fail_popular(&mut self, message: impl Into<String>) {
        self.popular_loading = false;
        self.popular_error = Some(message.into());
    }

    pub fn begin_search(&mut self) {
        self.search_loading = true;
    }

    pub fn apply_search(&mut self, result: PageResult) {
        self.search_results = result.items;
        self.total_results = result.total_results;
        self.total_pages = result.total_pages;
        self.search_loading = false;
        self.search_error = None;
    }

    pub fn fail_search(&mut self, message: impl Into<String>) {
        self.search_loading = false;
        self.search_error = Some(message.into());
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_results.clear();
        self.query.clear();
        self.search_error = None;
        self.total_results = 0;
        self.total_pages = 1;
    }

    pub fn begin_detail(&mut self) {
        self.current_loading = true;
    }

    pub fn apply_detail(&mut self, detail: MovieDetail) {
        self.current = Some(detail);
        self.current_loading = false;
        self.current_error = None;
    }

    pub fn fail_detail(&mut self, message: impl Into<String>) {
        self.current_loading = false;
        self.current_error = Some(message.into());
    }

    pub fn clear_detail(&mut self) {
        self.current = None;
        self.current_error = None;
    }
}
