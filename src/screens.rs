//! Per-screen state holders
//!
//! Each screen owns its state for as long as it is mounted on the
//! navigation stack. Screens never perform I/O: they return `Request`s
//! and accept results through `apply_*` methods.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app::{Request, ScreenId};
use crate::models::{Catalog, CatalogEntry, ComingSoonEntry, MediaDetail, MediaItem, MediaType};
use crate::search::{filter_catalog, Debouncer, SearchResults};

/// How long the play screen shows "launching"
pub const LAUNCH_DURATION: Duration = Duration::from_secs(2);

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if visible > 0 && self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }
}

/// Result of a one-shot load
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Ready(T),
    Failed,
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

// =============================================================================
// Profiles
// =============================================================================

#[derive(Debug, Clone)]
pub struct ProfilesScreen {
    pub id: ScreenId,
    pub profiles: Vec<String>,
    pub list: ListState,
}

impl ProfilesScreen {
    pub fn new(id: ScreenId, profiles: Vec<String>) -> Self {
        let list = ListState::new(profiles.len());
        Self { id, profiles, list }
    }

    pub fn selected(&self) -> Option<&str> {
        self.profiles.get(self.list.selected).map(String::as_str)
    }
}

// =============================================================================
// Home
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeRow {
    #[default]
    Trending,
    TopRated,
}

/// Hero banner plus trending and top rated rows.
///
/// The two rows load independently; each fills in as its fetch resolves.
#[derive(Debug, Clone)]
pub struct HomeScreen {
    pub id: ScreenId,
    pub trending: Option<Vec<MediaItem>>,
    pub top_rated: Option<Vec<MediaItem>>,
    pub row: HomeRow,
    pub trending_list: ListState,
    pub top_rated_list: ListState,
}

impl HomeScreen {
    pub fn new(id: ScreenId) -> Self {
        Self {
            id,
            trending: None,
            top_rated: None,
            row: HomeRow::Trending,
            trending_list: ListState::default(),
            top_rated_list: ListState::default(),
        }
    }

    pub fn mount_requests(&self) -> Vec<Request> {
        vec![
            Request::Trending { screen: self.id },
            Request::TopRated { screen: self.id },
        ]
    }

    /// Loading until both rows have resolved (empty counts as resolved)
    pub fn is_loading(&self) -> bool {
        self.trending.is_none() || self.top_rated.is_none()
    }

    /// First trending title, shown large at the top
    pub fn hero(&self) -> Option<&MediaItem> {
        self.trending.as_ref().and_then(|t| t.first())
    }

    pub fn apply_trending(&mut self, items: Vec<MediaItem>) {
        self.trending_list.set_len(items.len());
        self.trending = Some(items);
    }

    pub fn apply_top_rated(&mut self, items: Vec<MediaItem>) {
        self.top_rated_list.set_len(items.len());
        self.top_rated = Some(items);
    }

    pub fn row_items(&self, row: HomeRow) -> &[MediaItem] {
        let items = match row {
            HomeRow::Trending => &self.trending,
            HomeRow::TopRated => &self.top_rated,
        };
        items.as_deref().unwrap_or(&[])
    }

    pub fn row_list(&self, row: HomeRow) -> &ListState {
        match row {
            HomeRow::Trending => &self.trending_list,
            HomeRow::TopRated => &self.top_rated_list,
        }
    }

    fn active_list(&mut self) -> &mut ListState {
        match self.row {
            HomeRow::Trending => &mut self.trending_list,
            HomeRow::TopRated => &mut self.top_rated_list,
        }
    }

    pub fn next_row(&mut self) {
        self.row = HomeRow::TopRated;
    }

    pub fn prev_row(&mut self) {
        self.row = HomeRow::Trending;
    }

    pub fn left(&mut self) {
        self.active_list().up();
    }

    pub fn right(&mut self) {
        self.active_list().down();
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.row_items(self.row)
            .get(self.row_list(self.row).selected)
    }
}

// =============================================================================
// New & Hot
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewHotTab {
    #[default]
    ComingSoon,
    EveryoneWatching,
    TopShows,
    TopMovies,
}

impl NewHotTab {
    pub const ALL: [NewHotTab; 4] = [
        NewHotTab::ComingSoon,
        NewHotTab::EveryoneWatching,
        NewHotTab::TopShows,
        NewHotTab::TopMovies,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NewHotTab::ComingSoon => "Coming Soon",
            NewHotTab::EveryoneWatching => "Everyone's Watching",
            NewHotTab::TopShows => "Top 10 TV Shows",
            NewHotTab::TopMovies => "Top 10 Movies",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// One line in the New & Hot list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotRow {
    pub title: String,
    pub sub_text: String,
    pub description: String,
    pub rated: String,
}

impl From<&ComingSoonEntry> for NewHotRow {
    fn from(entry: &ComingSoonEntry) -> Self {
        Self {
            title: entry.title.clone(),
            sub_text: entry.sub_text.clone(),
            description: entry.description.clone(),
            rated: entry.rated.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewHotScreen {
    pub id: ScreenId,
    pub tab: NewHotTab,
    pub list: ListState,
    catalog: Arc<Catalog>,
}

impl NewHotScreen {
    pub fn new(id: ScreenId, catalog: Arc<Catalog>) -> Self {
        let mut screen = Self {
            id,
            tab: NewHotTab::ComingSoon,
            list: ListState::default(),
            catalog,
        };
        screen.list.set_len(screen.rows().len());
        screen
    }

    pub fn rows(&self) -> Vec<NewHotRow> {
        match self.tab {
            NewHotTab::ComingSoon | NewHotTab::EveryoneWatching => {
                self.catalog.coming_soon.iter().map(NewHotRow::from).collect()
            }
            NewHotTab::TopShows => top_ten(&self.catalog.shows, |e| e.kind != "Movie"),
            NewHotTab::TopMovies => top_ten(&self.catalog.shows, |e| e.kind == "Movie"),
        }
    }

    pub fn set_tab(&mut self, tab: NewHotTab) {
        self.tab = tab;
        self.list.reset();
        let len = self.rows().len();
        self.list.set_len(len);
    }

    pub fn next_tab(&mut self) {
        let next = NewHotTab::ALL[(self.tab.index() + 1) % NewHotTab::ALL.len()];
        self.set_tab(next);
    }

    pub fn prev_tab(&mut self) {
        let len = NewHotTab::ALL.len();
        let prev = NewHotTab::ALL[(self.tab.index() + len - 1) % len];
        self.set_tab(prev);
    }
}

fn top_ten(entries: &[CatalogEntry], keep: impl Fn(&CatalogEntry) -> bool) -> Vec<NewHotRow> {
    entries
        .iter()
        .filter(|e| keep(e))
        .take(10)
        .enumerate()
        .map(|(i, e)| NewHotRow {
            title: e.title.clone(),
            sub_text: format!("#{} in {}s today", i + 1, e.kind),
            description: String::new(),
            rated: String::new(),
        })
        .collect()
}

// =============================================================================
// Explore (remote search)
// =============================================================================

/// What the explore list currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExploreView {
    /// Trending titles, shown while the query is empty
    #[default]
    TopSearches,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExploreFetch {
    Trending,
    Search(String),
}

/// Remote search screen backed by the gateway
#[derive(Debug, Clone)]
pub struct ExploreScreen {
    pub id: ScreenId,
    pub view: ExploreView,
    pub results: Vec<MediaItem>,
    pub list: ListState,
    query: Debouncer<String>,
    min_query_len: usize,
    outstanding: Option<ExploreFetch>,
}

impl ExploreScreen {
    pub fn new(id: ScreenId, window: Duration, min_query_len: usize) -> Self {
        Self {
            id,
            view: ExploreView::TopSearches,
            results: Vec::new(),
            list: ListState::default(),
            query: Debouncer::new(String::new(), window),
            min_query_len,
            outstanding: Some(ExploreFetch::Trending),
        }
    }

    pub fn mount_requests(&self) -> Vec<Request> {
        vec![Request::Trending { screen: self.id }]
    }

    pub fn query(&self) -> &str {
        self.query.raw()
    }

    /// True while a search request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.outstanding, Some(ExploreFetch::Search(_)))
    }

    pub fn set_query(&mut self, query: String, now: Instant) {
        self.query.update(query, now);
    }

    pub fn input(&mut self, c: char, now: Instant) {
        let mut q = self.query.raw().clone();
        q.push(c);
        self.set_query(q, now);
    }

    pub fn backspace(&mut self, now: Instant) {
        let mut q = self.query.raw().clone();
        q.pop();
        self.set_query(q, now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.set_query(String::new(), now);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.query.deadline()
    }

    /// Settle the query if its window passed and decide whether to fetch
    pub fn tick(&mut self, now: Instant) -> Option<Request> {
        let settled = self.query.poll(now)?;
        self.on_settled(settled)
    }

    /// Commit the pending query right away
    pub fn submit(&mut self) -> Option<Request> {
        let settled = self.query.flush()?;
        self.on_settled(settled)
    }

    fn on_settled(&mut self, query: String) -> Option<Request> {
        if query.is_empty() {
            self.outstanding = Some(ExploreFetch::Trending);
            Some(Request::Trending { screen: self.id })
        } else if query.chars().count() >= self.min_query_len {
            self.outstanding = Some(ExploreFetch::Search(query.clone()));
            Some(Request::Search {
                screen: self.id,
                query,
            })
        } else {
            // Too short to search; keep whatever is on screen
            None
        }
    }

    /// Returns false when the results are stale and were dropped
    pub fn apply_trending(&mut self, items: Vec<MediaItem>) -> bool {
        if self.outstanding != Some(ExploreFetch::Trending) {
            return false;
        }
        self.outstanding = None;
        self.view = ExploreView::TopSearches;
        self.set_results(items);
        true
    }

    /// Returns false when `query` is no longer the one being searched
    pub fn apply_search(&mut self, query: &str, items: Vec<MediaItem>) -> bool {
        match &self.outstanding {
            Some(ExploreFetch::Search(q)) if q == query => {}
            _ => return false,
        }
        self.outstanding = None;
        self.view = ExploreView::Results;
        self.set_results(items);
        true
    }

    fn set_results(&mut self, items: Vec<MediaItem>) {
        self.list.reset();
        self.list.set_len(items.len());
        self.results = items;
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.results.get(self.list.selected)
    }
}

// =============================================================================
// Search (local, debounced)
// =============================================================================

/// Snapshot of the search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub raw_query: String,
    pub debounced_query: String,
    pub is_loading: bool,
}

/// Local search over the catalog's games and shows
#[derive(Debug, Clone)]
pub struct SearchScreen {
    pub id: ScreenId,
    pub results: SearchResults,
    pub list: ListState,
    query: Debouncer<String>,
    catalog: Arc<Catalog>,
}

impl SearchScreen {
    pub fn new(id: ScreenId, catalog: Arc<Catalog>, window: Duration) -> Self {
        let results = filter_catalog(&catalog, "");
        let list = ListState::new(results.len());
        Self {
            id,
            results,
            list,
            query: Debouncer::new(String::new(), window),
            catalog,
        }
    }

    pub fn raw_query(&self) -> &str {
        self.query.raw()
    }

    pub fn debounced_query(&self) -> &str {
        self.query.settled()
    }

    /// Loading exactly while a keystroke waits for the window
    pub fn is_loading(&self) -> bool {
        self.query.is_pending()
    }

    pub fn state(&self) -> SearchState {
        SearchState {
            raw_query: self.raw_query().to_string(),
            debounced_query: self.debounced_query().to_string(),
            is_loading: self.is_loading(),
        }
    }

    /// Nothing matched a non-blank query
    pub fn show_no_results(&self) -> bool {
        !self.is_loading() && !self.raw_query().trim().is_empty() && self.results.is_empty()
    }

    pub fn set_query(&mut self, query: String, now: Instant) {
        self.query.update(query, now);
    }

    pub fn input(&mut self, c: char, now: Instant) {
        let mut q = self.query.raw().clone();
        q.push(c);
        self.set_query(q, now);
    }

    pub fn backspace(&mut self, now: Instant) {
        let mut q = self.query.raw().clone();
        q.pop();
        self.set_query(q, now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.set_query(String::new(), now);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.query.deadline()
    }

    /// Re-filter once the query settles. Returns true if results changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.query.poll(now) {
            Some(query) => {
                self.refilter(&query);
                true
            }
            None => false,
        }
    }

    pub fn submit(&mut self) -> bool {
        match self.query.flush() {
            Some(query) => {
                self.refilter(&query);
                true
            }
            None => false,
        }
    }

    fn refilter(&mut self, query: &str) {
        self.results = filter_catalog(&self.catalog, query);
        tracing::debug!(query, matches = self.results.len(), "Catalog filtered");
        self.list.reset();
        self.list.set_len(self.results.len());
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.results.get(self.list.selected)
    }

    /// Whether the flat index points into the games section
    pub fn is_game(&self, index: usize) -> bool {
        index < self.results.games.len()
    }
}

// =============================================================================
// Detail
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Episodes,
    MoreLikeThis,
}

#[derive(Debug, Clone)]
pub struct DetailScreen {
    pub id: ScreenId,
    pub target_id: String,
    pub kind: MediaType,
    pub detail: Loadable<MediaDetail>,
    pub tab: DetailTab,
    pub muted: bool,
    pub in_my_list: bool,
    pub rated: bool,
    pub similar_list: ListState,
}

impl DetailScreen {
    pub fn new(id: ScreenId, target_id: impl Into<String>, kind: MediaType) -> Self {
        Self {
            id,
            target_id: target_id.into(),
            kind,
            detail: Loadable::Loading,
            tab: DetailTab::Episodes,
            muted: false,
            in_my_list: false,
            rated: false,
            similar_list: ListState::default(),
        }
    }

    pub fn mount_requests(&self) -> Vec<Request> {
        vec![Request::Details {
            screen: self.id,
            id: self.target_id.clone(),
            kind: self.kind,
        }]
    }

    pub fn apply_details(&mut self, detail: Option<MediaDetail>) {
        self.detail = match detail {
            Some(detail) => {
                self.similar_list.set_len(detail.similar.len());
                Loadable::Ready(detail)
            }
            None => Loadable::Failed,
        };
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_my_list(&mut self) {
        self.in_my_list = !self.in_my_list;
    }

    pub fn toggle_rated(&mut self) {
        self.rated = !self.rated;
    }

    pub fn set_tab(&mut self, tab: DetailTab) {
        self.tab = tab;
    }

    pub fn selected_similar(&self) -> Option<&MediaItem> {
        if self.tab != DetailTab::MoreLikeThis {
            return None;
        }
        self.detail
            .ready()
            .and_then(|d| d.similar.get(self.similar_list.selected))
    }
}

// =============================================================================
// Play
// =============================================================================

#[derive(Debug, Clone)]
pub struct PlayScreen {
    pub id: ScreenId,
    pub title: String,
    pub kind: String,
    pub launching: bool,
}

impl PlayScreen {
    pub fn new(id: ScreenId, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kind: kind.into(),
            launching: false,
        }
    }

    /// Start launching; None if a launch is already running
    pub fn launch(&mut self) -> Option<Request> {
        if self.launching {
            return None;
        }
        self.launching = true;
        Some(Request::LaunchTimer {
            screen: self.id,
            after: LAUNCH_DURATION,
        })
    }

    pub fn finish_launch(&mut self) {
        self.launching = false;
    }
}
