//! Test helpers: in-memory database, a scriptable catalog and movie fixtures

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use crate::db::DbPool;
use crate::models::{Category, ListResponse, Movie, MovieDetail};
use crate::services::catalog::MovieCatalog;
use crate::services::tmdb::{FetchFailure, FetchOutcome};

/// Creates an in-memory SQLite database with all migrations applied
pub async fn create_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./src/db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    NowPlaying,
    Popular,
    Upcoming,
    Search(String),
    Details(i64),
}

/// In-process [`MovieCatalog`] that records every call.
///
/// Lists default to empty (reported as `Empty`), unknown detail ids come
/// back `Empty` as well.
#[derive(Default)]
pub struct FakeCatalog {
    lists: Mutex<HashMap<Category, Vec<Movie>>>,
    search_results: Mutex<Vec<Movie>>,
    details: Mutex<HashMap<i64, MovieDetail>>,
    delays: Mutex<HashMap<Category, Duration>>,
    fail_lists: AtomicBool,
    fail_details: AtomicBool,
    calls: Mutex<Vec<CatalogCall>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_list(&self, category: Category, movies: Vec<Movie>) {
        self.lists.lock().unwrap().insert(category, movies);
    }

    pub fn set_search_results(&self, movies: Vec<Movie>) {
        *self.search_results.lock().unwrap() = movies;
    }

    pub fn set_detail(&self, detail: MovieDetail) {
        self.details.lock().unwrap().insert(detail.id, detail);
    }

    pub fn set_delay(&self, category: Category, delay: Duration) {
        self.delays.lock().unwrap().insert(category, delay);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_details(&self, fail: bool) {
        self.fail_details.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CatalogCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(path: &str) -> FetchFailure {
        FetchFailure {
            path: path.to_string(),
            status: Some(500),
            reason: "Internal Server Error".to_string(),
        }
    }

    async fn list(&self, category: Category, path: &str) -> FetchOutcome<ListResponse> {
        let delay = self.delays.lock().unwrap().get(&category).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let movies = self
            .lists
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default();
        self.list_outcome(path, movies)
    }

    fn list_outcome(&self, path: &str, movies: Vec<Movie>) -> FetchOutcome<ListResponse> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return FetchOutcome::Failed(Self::failure(path));
        }
        if movies.is_empty() {
            return FetchOutcome::Empty;
        }
        FetchOutcome::Loaded(ListResponse {
            page: 1,
            total_pages: 1,
            total_results: movies.len() as u64,
            results: movies,
        })
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    async fn now_playing(&self) -> FetchOutcome<ListResponse> {
        self.record(CatalogCall::NowPlaying);
        self.list(Category::NowPlaying, "/movie/now_playing").await
    }

    async fn popular(&self) -> FetchOutcome<ListResponse> {
        self.record(CatalogCall::Popular);
        self.list(Category::Popular, "/movie/popular").await
    }

    async fn upcoming(&self) -> FetchOutcome<ListResponse> {
        self.record(CatalogCall::Upcoming);
        self.list(Category::Upcoming, "/movie/upcoming").await
    }

    async fn search(&self, query: &str) -> FetchOutcome<ListResponse> {
        self.record(CatalogCall::Search(query.to_string()));
        let movies = self.search_results.lock().unwrap().clone();
        self.list_outcome("/search/movie", movies)
    }

    async fn details_full(&self, id: i64) -> FetchOutcome<MovieDetail> {
        self.record(CatalogCall::Details(id));
        if self.fail_details.load(Ordering::SeqCst) {
            return FetchOutcome::Failed(Self::failure(&format!("/movie/{}", id)));
        }
        match self.details.lock().unwrap().get(&id) {
            Some(detail) => FetchOutcome::Loaded(detail.clone()),
            None => FetchOutcome::Empty,
        }
    }
}

/// Test fixtures for common test data
pub mod fixtures {
    use serde_json::json;

    use crate::models::{Movie, MovieDetail};

    pub fn movie(id: i64, title: &str, vote_average: f64, release_date: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: release_date.to_string(),
            vote_average,
            vote_count: 100,
            popularity: 1.0,
        }
    }

    /// `count` movies titled "Movie 01", "Movie 02", ...
    pub fn numbered_movies(count: i64) -> Vec<Movie> {
        (1..=count)
            .map(|i| movie(i, &format!("Movie {:02}", i), 5.0, "2020-01-01"))
            .collect()
    }

    pub fn detail(id: i64, title: &str, adult: Option<bool>) -> MovieDetail {
        let mut value = json!({
            "id": id,
            "title": title,
            "overview": "",
            "release_date": "1995-12-15",
            "runtime": 170,
            "vote_average": 8.3,
            "vote_count": 7000,
            "popularity": 40.5,
            "status": "Released",
            "original_language": "en",
            "genres": [{"id": 80, "name": "Crime"}],
            "credits": {"cast": [], "crew": []},
            "recommendations": {"page": 1, "results": []}
        });
        if let Some(adult) = adult {
            value["adult"] = json!(adult);
        }
        serde_json::from_value(value).expect("Invalid detail fixture")
    }
}
