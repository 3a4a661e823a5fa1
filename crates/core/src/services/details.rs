use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Credits, CrewMember, Movie, MovieDetail};
use crate::services::catalog::MovieCatalog;
use crate::services::tmdb::image_url;

const WRITER_JOBS: [&str; 4] = ["Writer", "Screenplay", "Story", "Author"];

/// `"2h 50m"`, `"45m"`, or `"-"` when the runtime is unknown
pub fn format_runtime(minutes: Option<i64>) -> String {
    match minutes {
        Some(total) if total > 0 => {
            let (hours, mins) = (total / 60, total % 60);
            if hours == 0 {
                format!("{}m", mins)
            } else {
                format!("{}h {}m", hours, mins)
            }
        }
        _ => "-".to_string(),
    }
}

/// First four characters of the release date, or empty
pub fn release_year(date: Option<&str>) -> String {
    date.map(|d| d.chars().take(4).collect())
        .unwrap_or_default()
}

/// Coarse age label derived only from the adult flag
pub fn certification(adult: Option<bool>) -> &'static str {
    match adult {
        Some(true) => "18+",
        _ => "PG13",
    }
}

pub fn director(credits: &Credits) -> Option<&CrewMember> {
    credits.crew.iter().find(|c| c.job == "Director")
}

pub fn writer(credits: &Credits) -> Option<&CrewMember> {
    credits
        .crew
        .iter()
        .find(|c| WRITER_JOBS.contains(&c.job.as_str()))
}

#[derive(Debug, Clone, Serialize)]
pub struct CastView {
    pub id: i64,
    pub name: String,
    pub character: String,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub id: i64,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
}

/// Everything the detail screen renders, already derived
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub movie: Movie,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub year: String,
    pub runtime: String,
    pub certification: String,
    pub tagline: Option<String>,
    pub status: String,
    pub original_language: String,
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub cast: Vec<CastView>,
    pub recommendations: Vec<RecommendationView>,
    pub in_watchlist: bool,
}

impl DetailView {
    pub fn build(detail: &MovieDetail, in_watchlist: bool) -> Self {
        Self {
            movie: detail.to_movie(),
            poster_url: image_url(detail.poster_path.as_deref()),
            backdrop_url: image_url(detail.backdrop_path.as_deref()),
            year: release_year(detail.release_date.as_deref()),
            runtime: format_runtime(detail.runtime),
            certification: certification(detail.adult).to_string(),
            tagline: detail.tagline.clone().filter(|t| !t.is_empty()),
            status: detail.status.clone(),
            original_language: detail.original_language.clone(),
            genres: detail.genres.iter().map(|g| g.name.clone()).collect(),
            director: director(&detail.credits).map(|c| c.name.clone()),
            writer: writer(&detail.credits).map(|c| c.name.clone()),
            cast: detail
                .credits
                .cast
                .iter()
                .map(|c| CastView {
                    id: c.id,
                    name: c.name.clone(),
                    character: c.character.clone(),
                    profile_url: image_url(c.profile_path.as_deref()),
                })
                .collect(),
            recommendations: detail
                .recommendations
                .results
                .iter()
                .map(|m| RecommendationView {
                    id: m.id,
                    title: m.title.clone(),
                    year: release_year(Some(m.release_date.as_str())),
                    poster_url: image_url(m.poster_path.as_deref()),
                })
                .collect(),
            in_watchlist,
        }
    }
}

/// Fetches full movie details and keeps them cached by movie id
pub struct DetailService {
    catalog: Arc<dyn MovieCatalog>,
    cache: RwLock<HashMap<i64, MovieDetail>>,
}

impl DetailService {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            catalog,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Cached detail if present, otherwise one combined catalog round trip
    pub async fn get_details(&self, id: i64) -> Result<MovieDetail> {
        if let Some(detail) = self.cached(id) {
            return Ok(detail);
        }
        self.refetch(id).await
    }

    /// Always goes to the catalog; replaces the cached entry on success
    pub async fn refetch(&self, id: i64) -> Result<MovieDetail> {
        let detail = self
            .catalog
            .details_full(id)
            .await
            .into_result()?
            .ok_or(Error::NotFound)?;

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(id, detail.clone());
        }

        Ok(detail)
    }

    pub fn cached(&self, id: i64) -> Option<MovieDetail> {
        self.cache.read().ok().and_then(|c| c.get(&id).cloned())
    }
}
