use async_trait::async_trait;

use crate::models::{ListResponse, MovieDetail};
use crate::services::tmdb::{FetchOutcome, TmdbClient};

/// The catalog queries the list and detail views depend on.
///
/// [`TmdbClient`] is the production implementation; tests substitute a fake.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn now_playing(&self) -> FetchOutcome<ListResponse>;

    async fn popular(&self) -> FetchOutcome<ListResponse>;

    async fn upcoming(&self) -> FetchOutcome<ListResponse>;

    async fn search(&self, query: &str) -> FetchOutcome<ListResponse>;

    async fn details_full(&self, id: i64) -> FetchOutcome<MovieDetail>;
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn now_playing(&self) -> FetchOutcome<ListResponse> {
        TmdbClient::now_playing(self).await
    }

    async fn popular(&self) -> FetchOutcome<ListResponse> {
        TmdbClient::popular(self).await
    }

    async fn upcoming(&self) -> FetchOutcome<ListResponse> {
        TmdbClient::upcoming(self).await
    }

    async fn search(&self, query: &str) -> FetchOutcome<ListResponse> {
        self.search_movies(query).await
    }

    async fn details_full(&self, id: i64) -> FetchOutcome<MovieDetail> {
        self.movie_details_full(id).await
    }
}
