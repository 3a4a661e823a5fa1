//! Loopback JSON bridge between the webview shell and the core.
//!
//! Every route is a thin translation of a screen action (home list, movie
//! details, watchlist) into a core call.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use movie_browser_core::{
    Config,
    db::{DbPool, create_pool},
    services::{
        DetailService, FilterStore, HomeMovies, MovieCatalog, PreferenceStore, TmdbClient,
        Watchlist,
    },
};

pub mod error;
pub mod routes;

pub use error::{ApiError, ApiResult};

use routes::{home, movies, watchlist};

pub struct AppState {
    pub home: HomeMovies,
    pub details: DetailService,
    pub watchlist: Watchlist,
}

impl AppState {
    pub fn new(catalog: Arc<dyn MovieCatalog>, pool: DbPool) -> Self {
        Self {
            home: HomeMovies::new(
                catalog.clone(),
                Arc::new(FilterStore::new()),
                PreferenceStore::new(pool),
            ),
            details: DetailService::new(catalog),
            watchlist: Watchlist::new(),
        }
    }
}

/// Creates the application state with all services initialized
pub async fn create_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Preference storage ready");

    let catalog = TmdbClient::from_config(config)?;
    tracing::info!("TMDB client configured for {}", config.tmdb_base_url);

    Ok(Arc::new(AppState::new(Arc::new(catalog), pool)))
}

/// Creates the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Home list
        .route("/home", get(home::get))
        .route("/home/category", put(home::set_category))
        .route("/home/sort", put(home::set_sort))
        .route(
            "/home/search",
            put(home::set_search).post(home::submit_search),
        )
        .route("/home/load-more", post(home::load_more))
        .route("/home/refresh", post(home::refresh))
        .route("/home/selected", put(home::select_movie))
        // Movie details
        .route("/movies/{id}", get(movies::get))
        .route("/movies/{id}/refresh", post(movies::refresh))
        .route("/movies/{id}/watchlist", post(movies::toggle_watchlist))
        // Watchlist
        .route("/watchlist", get(watchlist::list))
        .route("/watchlist/{id}", delete(watchlist::remove))
}

async fn health_check() -> &'static str {
    "OK"
}

/// Starts the bridge and blocks until shutdown
pub async fn start_bridge(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting movie browser bridge...");

    let state = create_app_state(&config).await?;

    // Restore persisted filters before accepting requests
    state.home.restore().await;

    let app = create_router(state);

    let addr = config.server_addr();
    tracing::info!("Bridge listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
