use std::sync::Arc;

use axum::{body::Body, http::Request, http::StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};
use tower::ServiceExt;

use movie_browser_bridge::{AppState, create_router};
use movie_browser_core::models::Category;
use movie_browser_core::test_helpers::fixtures::{detail, movie, numbered_movies};
use movie_browser_core::test_helpers::{CatalogCall, FakeCatalog, create_test_db};

async fn setup() -> (Arc<FakeCatalog>, TestServer) {
    let catalog = Arc::new(FakeCatalog::new());
    let state = Arc::new(AppState::new(catalog.clone(), create_test_db().await));
    let server = TestServer::new(create_router(state)).unwrap();
    (catalog, server)
}

fn ids(view: &Value) -> Vec<i64> {
    view["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let catalog = Arc::new(FakeCatalog::new());
    let state = Arc::new(AppState::new(catalog, create_test_db().await));

    let response = create_router(state)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_defaults_to_now_playing() {
    let (catalog, server) = setup().await;
    catalog.set_list(Category::NowPlaying, vec![movie(1, "Heat", 8.3, "1995-12-15")]);

    let response = server.get("/api/v1/home").await;
    response.assert_status_ok();

    let view: Value = response.json();
    assert_eq!(view["category"], "now_playing");
    assert_eq!(view["sort"], "alphabet");
    assert_eq!(view["has_restored"], true);
    assert_eq!(view["is_error"], false);
    assert_eq!(view["movies"][0]["title"], "Heat");
    assert_eq!(catalog.calls(), vec![CatalogCall::NowPlaying]);
}

#[tokio::test]
async fn test_popular_sorted_by_rating() {
    let (catalog, server) = setup().await;
    catalog.set_list(
        Category::Popular,
        vec![movie(1, "One", 7.2, ""), movie(2, "Two", 8.5, "")],
    );

    server
        .put("/api/v1/home/category")
        .json(&json!({ "category": "popular" }))
        .await
        .assert_status_ok();
    let view: Value = server
        .put("/api/v1/home/sort")
        .json(&json!({ "sort": "rating" }))
        .await
        .json();

    assert_eq!(view["category"], "popular");
    assert_eq!(ids(&view), vec![2, 1]);
}

#[tokio::test]
async fn test_invalid_category_is_rejected() {
    let (_, server) = setup().await;

    let response = server
        .put("/api/v1/home/category")
        .json(&json!({ "category": "bogus" }))
        .await;

    assert!(response.status_code().is_client_error());
    let view: Value = server.get("/api/v1/home").await.json();
    assert_eq!(view["category"], "now_playing");
}

#[tokio::test]
async fn test_search_submit_refetches_each_time() {
    let (catalog, server) = setup().await;
    catalog.set_search_results(vec![movie(9, "Alien", 8.5, "1979-05-25")]);
    server.get("/api/v1/home").await;

    let typed: Value = server
        .put("/api/v1/home/search")
        .json(&json!({ "query": "alien" }))
        .await
        .json();
    assert_eq!(typed["search"], "alien");

    let first: Value = server.post("/api/v1/home/search").await.json();
    server.post("/api/v1/home/search").await.assert_status_ok();

    assert_eq!(ids(&first), vec![9]);
    assert_eq!(
        catalog.calls(),
        vec![
            CatalogCall::NowPlaying,
            CatalogCall::Search("alien".to_string()),
            CatalogCall::Search("alien".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_load_more_pages_through_results() {
    let (catalog, server) = setup().await;
    catalog.set_list(Category::NowPlaying, numbered_movies(25));

    let view: Value = server.get("/api/v1/home").await.json();
    assert_eq!(view["visible_count"], 10);
    assert_eq!(view["can_load_more"], true);

    let view: Value = server.post("/api/v1/home/load-more").await.json();
    assert_eq!(view["visible_count"], 20);
    assert_eq!(view["can_load_more"], true);

    let view: Value = server.post("/api/v1/home/load-more").await.json();
    assert_eq!(view["visible_count"], 25);
    assert_eq!(view["total_results"], 25);
    assert_eq!(view["can_load_more"], false);
}

#[tokio::test]
async fn test_failed_list_offers_retry() {
    let (catalog, server) = setup().await;
    catalog.fail_lists(true);

    let view: Value = server.get("/api/v1/home").await.json();
    assert_eq!(view["is_error"], true);
    assert_eq!(view["phase"], "error");

    catalog.fail_lists(false);
    catalog.set_list(Category::NowPlaying, vec![movie(1, "Heat", 8.3, "")]);
    let view: Value = server.post("/api/v1/home/refresh").await.json();
    assert_eq!(view["is_error"], false);
    assert_eq!(ids(&view), vec![1]);
}

#[tokio::test]
async fn test_selected_movie_is_reported() {
    let (_, server) = setup().await;

    let view: Value = server
        .put("/api/v1/home/selected")
        .json(&json!({ "id": 42 }))
        .await
        .json();

    assert_eq!(view["selected_movie_id"], 42);
}

#[tokio::test]
async fn test_movie_detail_view() {
    let (catalog, server) = setup().await;
    catalog.set_detail(detail(949, "Heat", Some(true)));

    let response = server.get("/api/v1/movies/949").await;
    response.assert_status_ok();

    let view: Value = response.json();
    assert_eq!(view["movie"]["title"], "Heat");
    assert_eq!(view["certification"], "18+");
    assert_eq!(view["runtime"], "2h 50m");
    assert_eq!(view["year"], "1995");
    assert_eq!(view["in_watchlist"], false);
}

#[tokio::test]
async fn test_movie_detail_errors() {
    let (catalog, server) = setup().await;

    server
        .get("/api/v1/movies/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    catalog.fail_details(true);
    let response = server.get("/api/v1/movies/2").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("/movie/2"));
}

#[tokio::test]
async fn test_watchlist_toggle_and_remove() {
    let (catalog, server) = setup().await;
    catalog.set_detail(detail(949, "Heat", Some(false)));

    let toggled: Value = server.post("/api/v1/movies/949/watchlist").await.json();
    assert_eq!(toggled["in_watchlist"], true);

    let view: Value = server.get("/api/v1/movies/949").await.json();
    assert_eq!(view["in_watchlist"], true);

    let items: Value = server.get("/api/v1/watchlist").await.json();
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["id"], 949);
    assert_eq!(items[0]["vote_average"], 8.3);

    server
        .delete("/api/v1/watchlist/949")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/api/v1/watchlist/949")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let items: Value = server.get("/api/v1/watchlist").await.json();
    assert!(items.as_array().unwrap().is_empty());

    let toggled: Value = server.post("/api/v1/movies/949/watchlist").await.json();
    assert_eq!(toggled["in_watchlist"], true);
    let toggled: Value = server.post("/api/v1/movies/949/watchlist").await.json();
    assert_eq!(toggled["in_watchlist"], false);
}
