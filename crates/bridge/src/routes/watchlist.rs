use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use movie_browser_core::services::home::MovieCard;

use crate::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<MovieCard>> {
    Json(
        state
            .watchlist
            .items()
            .into_iter()
            .map(MovieCard::from)
            .collect(),
    )
}

/// Removing a movie that is not saved is not an error
pub async fn remove(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> StatusCode {
    state.watchlist.remove(id);
    StatusCode::NO_CONTENT
}
