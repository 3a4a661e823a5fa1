use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;

use movie_browser_core::models::{Category, SortOrder};
use movie_browser_core::services::HomeView;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct SortInput {
    pub sort: SortOrder,
}

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectInput {
    pub id: i64,
}

pub async fn get(State(state): State<Arc<AppState>>) -> Json<HomeView> {
    Json(state.home.load().await)
}

pub async fn set_category(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CategoryInput>,
) -> Json<HomeView> {
    state.home.set_category(input.category);
    Json(state.home.load().await)
}

pub async fn set_sort(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SortInput>,
) -> Json<HomeView> {
    state.home.set_sort(input.sort);
    Json(state.home.load().await)
}

/// Stores the text only; the list changes on submit
pub async fn set_search(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SearchInput>,
) -> Json<HomeView> {
    state.home.set_search(input.query);
    Json(state.home.view())
}

pub async fn submit_search(State(state): State<Arc<AppState>>) -> Json<HomeView> {
    state.home.submit_search();
    Json(state.home.load().await)
}

pub async fn load_more(State(state): State<Arc<AppState>>) -> Json<HomeView> {
    state.home.load_more();
    Json(state.home.view())
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<HomeView> {
    Json(state.home.refresh().await)
}

pub async fn select_movie(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SelectInput>,
) -> Json<HomeView> {
    state.home.select_movie(input.id);
    Json(state.home.view())
}
