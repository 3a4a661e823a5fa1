//! Home list retrieval: which catalog query to run for the current filters,
//! where its result is kept, and what slice of it is shown.
//!
//! Lifecycle: restoring persisted filters, then ready. Nothing is fetched
//! until the restore has finished.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, OnceLock};

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::models::{Category, FilterState, ListResponse, Movie, SortOrder};
use crate::services::catalog::MovieCatalog;
use crate::services::filters::FilterStore;
use crate::services::preferences::{PreferenceKey, PreferenceStore};
use crate::services::sorting::sort_movies;
use crate::services::tmdb::{FetchFailure, FetchOutcome, image_url};

pub const PAGE_SIZE: usize = 10;

/// Runs the list query for the given filters.
///
/// A non-blank search always wins over the category.
pub async fn query_movies(
    catalog: &dyn MovieCatalog,
    category: Category,
    search: &str,
) -> FetchOutcome<ListResponse> {
    let search = search.trim();
    if !search.is_empty() {
        return catalog.search(search).await;
    }
    match category {
        Category::Popular => catalog.popular().await,
        Category::Upcoming => catalog.upcoming().await,
        Category::NowPlaying => catalog.now_playing().await,
    }
}

/// Cache key for a fetched list. `search_trigger` changes on every search
/// submit, so resubmitting the same text still produces a new key. Entries
/// from earlier triggers are evicted on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub category: Category,
    pub search_trigger: u64,
}

#[derive(Debug, Clone)]
enum ListEntry {
    Loaded(Vec<Movie>),
    Failed(FetchFailure),
}

/// Client-side "load more" window over the sorted list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    size: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self { size: PAGE_SIZE }
    }
}

impl PageWindow {
    pub fn reset(&mut self) {
        self.size = PAGE_SIZE;
    }

    pub fn can_load_more(&self, total: usize) -> bool {
        total > self.size
    }

    /// Grows by one page if there is anything left to show
    pub fn grow(&mut self, total: usize) -> bool {
        if !self.can_load_more(total) {
            return false;
        }
        self.size += PAGE_SIZE;
        true
    }

    pub fn visible(&self, total: usize) -> usize {
        self.size.min(total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HomePhase {
    Restoring,
    Fetching,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster_url: Option<String>,
}

impl From<Movie> for MovieCard {
    fn from(movie: Movie) -> Self {
        let poster_url = image_url(movie.poster_path.as_deref());
        Self { movie, poster_url }
    }
}

/// What the home screen renders
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub category: Category,
    pub category_label: &'static str,
    pub sort: SortOrder,
    pub sort_label: &'static str,
    pub search: String,
    pub selected_movie_id: Option<i64>,
    pub phase: HomePhase,
    pub has_restored: bool,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub is_error: bool,
    pub error: Option<String>,
    pub movies: Vec<MovieCard>,
    pub total_results: usize,
    pub visible_count: usize,
    pub can_load_more: bool,
}

#[derive(Default)]
struct HomeState {
    restored: bool,
    search_trigger: u64,
    window: PageWindow,
    cache: HashMap<ListKey, ListEntry>,
    in_flight: HashSet<ListKey>,
}

type PendingWrite = (PreferenceKey, &'static str);

pub struct HomeMovies {
    catalog: Arc<dyn MovieCatalog>,
    filters: Arc<FilterStore>,
    preferences: PreferenceStore,
    state: Mutex<HomeState>,
    writer: OnceLock<mpsc::UnboundedSender<PendingWrite>>,
}

impl HomeMovies {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        filters: Arc<FilterStore>,
        preferences: PreferenceStore,
    ) -> Self {
        Self {
            catalog,
            filters,
            preferences,
            state: Mutex::new(HomeState::default()),
            writer: OnceLock::new(),
        }
    }

    pub fn is_restored(&self) -> bool {
        self.state.lock().map(|s| s.restored).unwrap_or(false)
    }

    pub fn current_key(&self) -> ListKey {
        let search_trigger = self.state.lock().map(|s| s.search_trigger).unwrap_or(0);
        ListKey {
            category: self.filters.category(),
            search_trigger,
        }
    }

    /// Applies the persisted category and sort, keeping defaults for
    /// anything missing or invalid. Runs once; later calls do nothing.
    pub async fn restore(&self) {
        if self.is_restored() {
            return;
        }

        let (category, sort) = self.preferences.load_filters().await;
        if let Some(category) = category {
            self.filters.set_category(category);
        }
        if let Some(sort) = sort {
            self.filters.set_sort(sort);
        }

        if let Ok(mut state) = self.state.lock() {
            state.restored = true;
        }
        debug!(
            "Restored filters: category={}, sort={}",
            self.filters.category().as_str(),
            self.filters.sort().as_str()
        );
    }

    /// Restores if needed, fetches the current list unless it is already
    /// cached, and returns the resulting view.
    pub async fn load(&self) -> HomeView {
        self.restore().await;
        self.fetch_current(false).await;
        self.view()
    }

    /// Re-runs the current query even if cached. Doubles as the retry action.
    pub async fn refresh(&self) -> HomeView {
        self.fetch_current(true).await;
        if let Ok(mut state) = self.state.lock() {
            state.window.reset();
        }
        self.view()
    }

    async fn fetch_current(&self, force: bool) {
        let (key, search) = {
            let Ok(mut state) = self.state.lock() else {
                return;
            };
            if !state.restored {
                return;
            }
            let key = ListKey {
                category: self.filters.category(),
                search_trigger: state.search_trigger,
            };
            if !force && (state.cache.contains_key(&key) || state.in_flight.contains(&key)) {
                return;
            }
            state.in_flight.insert(key);
            (key, self.filters.search())
        };

        let entry = match query_movies(self.catalog.as_ref(), key.category, &search).await {
            FetchOutcome::Loaded(list) => ListEntry::Loaded(list.results),
            FetchOutcome::Empty => ListEntry::Loaded(Vec::new()),
            FetchOutcome::Failed(failure) => ListEntry::Failed(failure),
        };

        // Stored under the key the request was made for; a response for a
        // category the user has since left is kept but not shown. Responses
        // for an older search submit are dropped.
        if let Ok(mut state) = self.state.lock() {
            state.in_flight.remove(&key);
            if key.search_trigger == state.search_trigger {
                state.cache.insert(key, entry);
            }
        }
    }

    pub fn set_category(&self, category: Category) {
        self.filters.set_category(category);
        self.reset_window();
        self.persist(PreferenceKey::Category, category.as_str());
    }

    pub fn set_sort(&self, sort: SortOrder) {
        self.filters.set_sort(sort);
        self.reset_window();
        self.persist(PreferenceKey::Sort, sort.as_str());
    }

    /// Updates the search text only; nothing is fetched until [`Self::submit_search`]
    pub fn set_search(&self, search: impl Into<String>) {
        self.filters.set_search(search);
        self.reset_window();
    }

    pub fn submit_search(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.search_trigger += 1;
            let current = state.search_trigger;
            state.cache.retain(|key, _| key.search_trigger == current);
            state.window.reset();
        }
    }

    pub fn select_movie(&self, id: i64) {
        self.filters.select_movie(id);
    }

    /// Shows one more page. Returns `false` when everything is already visible.
    pub fn load_more(&self) -> bool {
        let total = self.sorted_movies().len();
        self.state
            .lock()
            .map(|mut s| s.window.grow(total))
            .unwrap_or(false)
    }

    /// The full sorted list for the current key (empty when not loaded or failed)
    pub fn sorted_movies(&self) -> Vec<Movie> {
        let key = self.current_key();
        let sort = self.filters.sort();
        match self.entry(&key) {
            Some(ListEntry::Loaded(movies)) => sort_movies(&movies, sort),
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> HomeView {
        let FilterState {
            category,
            sort,
            search,
            selected_movie_id,
        } = self.filters.snapshot();
        let key = self.current_key();

        let (restored, window, in_flight, entry) = match self.state.lock() {
            Ok(state) => (
                state.restored,
                state.window,
                state.in_flight.contains(&key),
                state.cache.get(&key).cloned(),
            ),
            Err(_) => (false, PageWindow::default(), false, None),
        };

        let (phase, movies, error) = match (restored, entry) {
            (false, _) => (HomePhase::Restoring, Vec::new(), None),
            (true, None) => (HomePhase::Fetching, Vec::new(), None),
            (true, Some(ListEntry::Failed(failure))) => {
                (HomePhase::Error, Vec::new(), Some(failure.to_string()))
            }
            (true, Some(ListEntry::Loaded(movies))) => {
                (HomePhase::Ready, sort_movies(&movies, sort), None)
            }
        };

        let total = movies.len();
        let visible = window.visible(total);

        HomeView {
            category,
            category_label: category.label(),
            sort,
            sort_label: sort.label(),
            search,
            selected_movie_id,
            phase,
            has_restored: restored,
            is_loading: matches!(phase, HomePhase::Restoring | HomePhase::Fetching),
            is_refreshing: in_flight && !matches!(phase, HomePhase::Fetching),
            is_error: phase == HomePhase::Error,
            error,
            movies: movies.into_iter().take(visible).map(MovieCard::from).collect(),
            total_results: total,
            visible_count: visible,
            can_load_more: window.can_load_more(total),
        }
    }

    fn entry(&self, key: &ListKey) -> Option<ListEntry> {
        self.state.lock().ok().and_then(|s| s.cache.get(key).cloned())
    }

    fn reset_window(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.window.reset();
        }
    }

    /// Queues a preference write once the restore has finished. Not awaited.
    /// Writes are applied one at a time in call order, so the last change
    /// always wins; a failed write is logged at debug level and dropped.
    fn persist(&self, key: PreferenceKey, value: &'static str) {
        if !self.is_restored() {
            return;
        }
        let writer = match self.writer.get() {
            Some(writer) => writer,
            None => {
                let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                    debug!("No runtime available, skipping write of {}", key.as_str());
                    return;
                };
                self.writer
                    .get_or_init(|| spawn_preference_writer(&runtime, self.preferences.clone()))
            }
        };
        if writer.send((key, value)).is_err() {
            debug!("Preference writer stopped, dropping write of {}", key.as_str());
        }
    }
}

/// Single background task that drains queued preference writes in order.
/// Exits once the sending side is dropped.
fn spawn_preference_writer(
    runtime: &tokio::runtime::Handle,
    store: PreferenceStore,
) -> mpsc::UnboundedSender<PendingWrite> {
    let (tx, mut rx) = mpsc::unbounded_channel::<PendingWrite>();
    runtime.spawn(async move {
        while let Some((key, value)) = rx.recv().await {
            if let Err(e) = store.set(key, value).await {
                debug!("Failed to persist {}: {}", key.as_str(), e);
            }
        }
    });
    tx
}
