use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use movie_browser_core::services::DetailView;

use crate::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct WatchlistToggle {
    pub id: i64,
    pub in_watchlist: bool,
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DetailView>> {
    let detail = state.details.get_details(id).await?;
    Ok(Json(DetailView::build(&detail, state.watchlist.has(id))))
}

/// Bypasses the detail cache; the retry action of the detail screen
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DetailView>> {
    let detail = state.details.refetch(id).await?;
    Ok(Json(DetailView::build(&detail, state.watchlist.has(id))))
}

pub async fn toggle_watchlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<WatchlistToggle>> {
    let detail = state.details.get_details(id).await?;
    let in_watchlist = state.watchlist.toggle(&detail);
    tracing::debug!("Watchlist toggle for {}: {}", id, in_watchlist);
    Ok(Json(WatchlistToggle { id, in_watchlist }))
}
