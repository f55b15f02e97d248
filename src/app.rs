//! App state and navigation
//!
//! Owns the navigation stack of mounted screens, routes keys to the
//! current screen and applies async results to the screen that asked
//! for them. Results addressed to a screen that has since been popped
//! are dropped.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ImageUrls;
use crate::config::Config;
use crate::models::{Catalog, MediaDetail, MediaItem, MediaType};
use crate::screens::*;
use crate::ui::theme::Theme;

/// Identity of one mounted screen instance
pub type ScreenId = u64;

// =============================================================================
// Requests and Events
// =============================================================================

/// Work a screen asks the loader to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Trending { screen: ScreenId },
    TopRated { screen: ScreenId },
    Search { screen: ScreenId, query: String },
    Details { screen: ScreenId, id: String, kind: MediaType },
    LaunchTimer { screen: ScreenId, after: Duration },
}

impl Request {
    pub fn screen(&self) -> ScreenId {
        match self {
            Request::Trending { screen }
            | Request::TopRated { screen }
            | Request::Search { screen, .. }
            | Request::Details { screen, .. }
            | Request::LaunchTimer { screen, .. } => *screen,
        }
    }
}

/// Completed work coming back from the loader
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Trending { screen: ScreenId, items: Vec<MediaItem> },
    TopRated { screen: ScreenId, items: Vec<MediaItem> },
    SearchResults { screen: ScreenId, query: String, items: Vec<MediaItem> },
    Details { screen: ScreenId, detail: Option<MediaDetail> },
    LaunchFinished { screen: ScreenId },
}

impl AppEvent {
    pub fn screen(&self) -> ScreenId {
        match self {
            AppEvent::Trending { screen, .. }
            | AppEvent::TopRated { screen, .. }
            | AppEvent::SearchResults { screen, .. }
            | AppEvent::Details { screen, .. }
            | AppEvent::LaunchFinished { screen } => *screen,
        }
    }
}

// =============================================================================
// App State Enum
// =============================================================================

/// Which kind of screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Profiles,
    Home,
    NewHot,
    Explore,
    Search,
    Detail,
    Play,
}

/// Root tabs, in Tab-key order
pub const TABS: [AppState; 3] = [AppState::Home, AppState::NewHot, AppState::Explore];

impl AppState {
    pub fn label(&self) -> &'static str {
        match self {
            AppState::Profiles => "Profiles",
            AppState::Home => "Home",
            AppState::NewHot => "New & Hot",
            AppState::Explore => "Explore",
            AppState::Search => "Search",
            AppState::Detail => "Details",
            AppState::Play => "Play",
        }
    }
}

/// A mounted screen
#[derive(Debug, Clone)]
pub enum Screen {
    Profiles(ProfilesScreen),
    Home(HomeScreen),
    NewHot(NewHotScreen),
    Explore(ExploreScreen),
    Search(SearchScreen),
    Detail(DetailScreen),
    Play(PlayScreen),
}

impl Screen {
    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Profiles(s) => s.id,
            Screen::Home(s) => s.id,
            Screen::NewHot(s) => s.id,
            Screen::Explore(s) => s.id,
            Screen::Search(s) => s.id,
            Screen::Detail(s) => s.id,
            Screen::Play(s) => s.id,
        }
    }

    pub fn state(&self) -> AppState {
        match self {
            Screen::Profiles(_) => AppState::Profiles,
            Screen::Home(_) => AppState::Home,
            Screen::NewHot(_) => AppState::NewHot,
            Screen::Explore(_) => AppState::Explore,
            Screen::Search(_) => AppState::Search,
            Screen::Detail(_) => AppState::Detail,
            Screen::Play(_) => AppState::Play,
        }
    }

    fn mount_requests(&self) -> Vec<Request> {
        match self {
            Screen::Home(s) => s.mount_requests(),
            Screen::Explore(s) => s.mount_requests(),
            Screen::Detail(s) => s.mount_requests(),
            _ => Vec::new(),
        }
    }

    fn deadline(&self) -> Option<Instant> {
        match self {
            Screen::Search(s) => s.deadline(),
            Screen::Explore(s) => s.deadline(),
            _ => None,
        }
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Settings
// =============================================================================

/// The subset of `Config` screens need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub search_debounce: Duration,
    pub explore_debounce: Duration,
    pub explore_min_query_len: usize,
    pub profiles: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_debounce: config.search_debounce(),
            explore_debounce: config.explore_debounce(),
            explore_min_query_len: config.explore_min_query_len,
            profiles: config.profiles.clone(),
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    /// Mounted screens; the last one is showing
    pub stack: Vec<Screen>,
    pub running: bool,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub images: ImageUrls,
    pub catalog: Arc<Catalog>,
    pub settings: AppSettings,
    /// Selected profile name, once chosen
    pub profile: Option<String>,
    /// Frame counter driving animated styles
    pub tick: u64,
    next_id: ScreenId,
    requests: Vec<Request>,
}

impl App {
    /// Create an app showing the profile picker
    pub fn new(settings: AppSettings, theme: Theme, catalog: Arc<Catalog>) -> Self {
        let mut app = Self {
            stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            theme,
            images: ImageUrls::default(),
            catalog,
            settings,
            profile: None,
            tick: 0,
            next_id: 1,
            requests: Vec::new(),
        };
        let id = app.allocate_id();
        let profiles = app.settings.profiles.clone();
        app.stack.push(Screen::Profiles(ProfilesScreen::new(id, profiles)));
        app
    }

    pub fn with_images(mut self, images: ImageUrls) -> Self {
        self.images = images;
        self
    }

    fn allocate_id(&mut self) -> ScreenId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Currently showing screen
    pub fn current(&self) -> Option<&Screen> {
        self.stack.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Screen> {
        self.stack.last_mut()
    }

    pub fn state(&self) -> Option<AppState> {
        self.current().map(Screen::state)
    }

    /// Screen with the given id, if still mounted
    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.stack.iter().find(|s| s.id() == id)
    }

    fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.stack.iter_mut().find(|s| s.id() == id)
    }

    /// Drain requests queued since the last call
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Build a screen that needs no arguments. Detail and Play go through
    /// `open_detail` / `open_play`.
    fn build(&mut self, state: AppState) -> Option<Screen> {
        if matches!(state, AppState::Detail | AppState::Play) {
            return None;
        }
        let id = self.allocate_id();
        let settings = &self.settings;
        let screen = match state {
            AppState::Profiles => Screen::Profiles(ProfilesScreen::new(id, settings.profiles.clone())),
            AppState::Home => Screen::Home(HomeScreen::new(id)),
            AppState::NewHot => Screen::NewHot(NewHotScreen::new(id, self.catalog.clone())),
            AppState::Explore => Screen::Explore(ExploreScreen::new(
                id,
                settings.explore_debounce,
                settings.explore_min_query_len,
            )),
            AppState::Search => Screen::Search(SearchScreen::new(
                id,
                self.catalog.clone(),
                settings.search_debounce,
            )),
            AppState::Detail | AppState::Play => return None,
        };
        Some(screen)
    }

    /// Mount a screen on top of the stack
    pub fn push(&mut self, screen: Screen) -> ScreenId {
        let id = screen.id();
        tracing::debug!(screen = ?screen.state(), id, "Mounting screen");
        self.requests.extend(screen.mount_requests());
        self.stack.push(screen);
        self.input_mode = InputMode::Normal;
        id
    }

    /// Unmount everything and show `screen` as the new root
    pub fn reset_to(&mut self, screen: Screen) -> ScreenId {
        for old in self.stack.drain(..) {
            tracing::debug!(screen = ?old.state(), id = old.id(), "Unmounting screen");
        }
        self.push(screen)
    }

    /// Push a screen that needs no arguments
    pub fn open(&mut self, state: AppState) -> Option<ScreenId> {
        let screen = self.build(state)?;
        Some(self.push(screen))
    }

    /// Replace the whole stack with a screen that needs no arguments
    pub fn open_tab(&mut self, state: AppState) -> Option<ScreenId> {
        let screen = self.build(state)?;
        Some(self.reset_to(screen))
    }

    pub fn open_detail(&mut self, id: impl Into<String>, kind: MediaType) -> ScreenId {
        let screen_id = self.allocate_id();
        self.push(Screen::Detail(DetailScreen::new(screen_id, id, kind)))
    }

    pub fn open_play(&mut self, title: impl Into<String>, kind: impl Into<String>) -> ScreenId {
        let screen_id = self.allocate_id();
        self.push(Screen::Play(PlayScreen::new(screen_id, title, kind)))
    }

    /// Open local search with the input focused
    pub fn focus_search(&mut self) {
        if self.state() != Some(AppState::Search) {
            self.open(AppState::Search);
        }
        self.input_mode = InputMode::Editing;
    }

    /// Cycle Home → New & Hot → Explore
    pub fn next_tab(&mut self) {
        let next = match self.state() {
            Some(state) => TABS
                .iter()
                .position(|t| *t == state)
                .map(|i| TABS[(i + 1) % TABS.len()])
                .unwrap_or(AppState::Home),
            None => AppState::Home,
        };
        self.open_tab(next);
    }

    /// Go back. Leaves editing mode first; never pops the root screen.
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if self.stack.len() > 1 {
            if let Some(old) = self.stack.pop() {
                tracing::debug!(screen = ?old.state(), id = old.id(), "Unmounting screen");
            }
            true
        } else {
            false
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::info!(mode = %self.theme.mode, "Theme toggled");
    }

    pub fn select_profile(&mut self) {
        if let Some(Screen::Profiles(p)) = self.current() {
            self.profile = p.selected().map(String::from);
            tracing::info!(profile = ?self.profile, "Profile selected");
            self.open_tab(AppState::Home);
        }
    }

    // -------------------------------------------------------------------------
    // Async results and timers
    // -------------------------------------------------------------------------

    /// Apply a loader result. Returns false if it was dropped.
    pub fn apply(&mut self, event: AppEvent) -> bool {
        let id = event.screen();
        let Some(screen) = self.screen_mut(id) else {
            tracing::debug!(id, "Dropping result for unmounted screen");
            return false;
        };

        let applied = match (screen, event) {
            (Screen::Home(home), AppEvent::Trending { items, .. }) => {
                home.apply_trending(items);
                true
            }
            (Screen::Home(home), AppEvent::TopRated { items, .. }) => {
                home.apply_top_rated(items);
                true
            }
            (Screen::Explore(explore), AppEvent::Trending { items, .. }) => {
                explore.apply_trending(items)
            }
            (Screen::Explore(explore), AppEvent::SearchResults { query, items, .. }) => {
                explore.apply_search(&query, items)
            }
            (Screen::Detail(detail), AppEvent::Details { detail: d, .. }) => {
                detail.apply_details(d);
                true
            }
            (Screen::Play(play), AppEvent::LaunchFinished { .. }) => {
                play.finish_launch();
                true
            }
            (screen, event) => {
                tracing::warn!(screen = ?screen.state(), ?event, "Result does not fit screen");
                false
            }
        };

        if !applied {
            tracing::debug!(id, "Stale result dropped");
        }
        applied
    }

    /// Advance timers on every mounted screen
    pub fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);

        let mut fired = Vec::new();
        for screen in &mut self.stack {
            match screen {
                Screen::Search(search) => {
                    search.tick(now);
                }
                Screen::Explore(explore) => fired.extend(explore.tick(now)),
                _ => {}
            }
        }
        self.requests.extend(fired);
    }

    /// Earliest debounce deadline across mounted screens
    pub fn next_deadline(&self) -> Option<Instant> {
        self.stack.iter().filter_map(Screen::deadline).min()
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Handle keyboard event at `now`, returns true if event was consumed
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key, now)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Keys while a search box is focused
    fn handle_editing_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let mut submitted = Vec::new();
        let consumed = match (self.stack.last_mut(), key.code) {
            (_, KeyCode::Esc) | (_, KeyCode::Down) => {
                self.input_mode = InputMode::Normal;
                true
            }
            (Some(Screen::Search(s)), KeyCode::Enter) => {
                s.submit();
                self.input_mode = InputMode::Normal;
                true
            }
            (Some(Screen::Explore(s)), KeyCode::Enter) => {
                submitted.extend(s.submit());
                self.input_mode = InputMode::Normal;
                true
            }
            (Some(Screen::Search(s)), KeyCode::Char(c)) => {
                s.input(c, now);
                true
            }
            (Some(Screen::Explore(s)), KeyCode::Char(c)) => {
                s.input(c, now);
                true
            }
            (Some(Screen::Search(s)), KeyCode::Backspace) => {
                s.backspace(now);
                true
            }
            (Some(Screen::Explore(s)), KeyCode::Backspace) => {
                s.backspace(now);
                true
            }
            (Some(Screen::Search(s)), KeyCode::Delete) => {
                s.clear(now);
                true
            }
            (Some(Screen::Explore(s)), KeyCode::Delete) => {
                s.clear(now);
                true
            }
            _ => false,
        };
        self.requests.extend(submitted);
        consumed
    }

    /// Keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Esc => return self.back(),
            KeyCode::Char('t') => {
                self.toggle_theme();
                return true;
            }
            KeyCode::Tab if self.state() != Some(AppState::Profiles) => {
                self.next_tab();
                return true;
            }
            KeyCode::Char('/') => {
                match self.state() {
                    Some(AppState::Explore) => self.input_mode = InputMode::Editing,
                    Some(AppState::Profiles) | None => return false,
                    _ => self.focus_search(),
                }
                return true;
            }
            _ => {}
        }

        match self.state() {
            Some(AppState::Profiles) => self.handle_profiles_key(key),
            Some(AppState::Home) => self.handle_home_key(key),
            Some(AppState::NewHot) => self.handle_new_hot_key(key),
            Some(AppState::Explore) => self.handle_explore_key(key),
            Some(AppState::Search) => self.handle_search_key(key),
            Some(AppState::Detail) => self.handle_detail_key(key),
            Some(AppState::Play) => self.handle_play_key(key),
            None => false,
        }
    }

    fn handle_profiles_key(&mut self, key: KeyEvent) -> bool {
        let Some(Screen::Profiles(p)) = self.current_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left => {
                p.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right => {
                p.list.down();
                true
            }
            KeyCode::Enter => {
                self.select_profile();
                true
            }
            _ => false,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        let Some(Screen::Home(home)) = self.current_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                home.prev_row();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                home.next_row();
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                home.left();
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                home.right();
                true
            }
            KeyCode::Enter => {
                let target = home.selected_item().map(|i| (i.id, i.media_type));
                if let Some((id, kind)) = target {
                    self.open_detail(id.to_string(), kind);
                }
                true
            }
            KeyCode::Char('p') => {
                self.open_tab(AppState::Profiles);
                true
            }
            _ => false,
        }
    }

    fn handle_new_hot_key(&mut self, key: KeyEvent) -> bool {
        let Some(Screen::NewHot(screen)) = self.current_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => screen.prev_tab(),
            KeyCode::Right | KeyCode::Char('l') => screen.next_tab(),
            KeyCode::Up | KeyCode::Char('k') => screen.list.up(),
            KeyCode::Down | KeyCode::Char('j') => screen.list.down(),
            _ => return false,
        }
        true
    }

    fn handle_explore_key(&mut self, key: KeyEvent) -> bool {
        let Some(Screen::Explore(explore)) = self.current_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if explore.list.selected == 0 {
                    self.input_mode = InputMode::Editing;
                } else {
                    explore.list.up();
                }
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                explore.list.down();
                true
            }
            KeyCode::Enter => {
                let target = explore.selected_item().map(|i| (i.id, i.media_type));
                if let Some((id, kind)) = target {
                    self.open_detail(id.to_string(), kind);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        let Some(Screen::Search(search)) = self.current_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if search.list.selected == 0 {
                    self.input_mode = InputMode::Editing;
                } else {
                    search.list.up();
                }
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                search.list.down();
                true
            }
            KeyCode::Enter => {
                let index = search.list.selected;
                let is_game = search.is_game(index);
                let Some(entry) = search.selected_entry().cloned() else {
                    return true;
                };
                if is_game {
                    self.open_play(entry.title, entry.kind);
                } else {
                    let kind = if entry.kind == "Movie" {
                        MediaType::Movie
                    } else {
                        MediaType::Tv
                    };
                    self.open_detail(entry.id, kind);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        let Some(Screen::Detail(detail)) = self.current_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char('m') => detail.toggle_muted(),
            KeyCode::Char('+') => detail.toggle_my_list(),
            KeyCode::Char('r') => detail.toggle_rated(),
            KeyCode::Left | KeyCode::Char('1') => detail.set_tab(DetailTab::Episodes),
            KeyCode::Right | KeyCode::Char('2') => detail.set_tab(DetailTab::MoreLikeThis),
            KeyCode::Up | KeyCode::Char('k') => detail.similar_list.up(),
            KeyCode::Down | KeyCode::Char('j') => detail.similar_list.down(),
            KeyCode::Enter => {
                let target = detail.selected_similar().map(|i| (i.id, i.media_type));
                if let Some((id, kind)) = target {
                    self.open_detail(id.to_string(), kind);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_play_key(&mut self, key: KeyEvent) -> bool {
        let Some(Screen::Play(play)) = self.current_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let request = play.launch();
                self.requests.extend(request);
                true
            }
            _ => false,
        }
    }
}
