use serde::{Deserialize, Serialize};

use super::common::{
    lenient_f64, lenient_opt_bool, lenient_opt_f64, lenient_opt_i64, lenient_opt_string,
    lenient_opt_u64, lenient_string, lenient_u64, null_as_default,
};

/// A movie as it appears in catalog lists and in the watchlist.
///
/// Only `id` is required; every other field falls back to its empty value
/// when TMDB omits it or sends something unexpected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overview: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub backdrop_path: Option<String>,
    /// ISO date (`YYYY-MM-DD`) or empty
    #[serde(default, deserialize_with = "lenient_string")]
    pub release_date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub popularity: f64,
}

/// Paged list envelope used by every list endpoint (now playing, search, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Movie>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_results: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub character: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crew: Vec<CrewMember>,
}

/// Full movie detail as returned by
/// `/movie/{id}?append_to_response=credits,recommendations`.
///
/// Fields that the list shape treats as plain values stay optional here so
/// that [`MovieDetail::to_movie`] can apply its own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub popularity: Option<f64>,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub runtime: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub original_language: String,
    #[serde(default, deserialize_with = "lenient_opt_bool")]
    pub adult: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: Credits,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: ListResponse,
}

impl MovieDetail {
    /// Reduces a detail to the list shape stored in the watchlist.
    ///
    /// Never fails: absent numbers become `0`, absent strings become `""`.
    pub fn to_movie(&self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.clone().unwrap_or_default(),
            overview: self.overview.clone().unwrap_or_default(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            release_date: self.release_date.clone().unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            popularity: self.popularity.unwrap_or(0.0),
        }
    }
}

impl From<&MovieDetail> for Movie {
    fn from(detail: &MovieDetail) -> Self {
        detail.to_movie()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_from_list_entry() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "id": 550,
                "title": "Fight Club",
                "overview": "An insomniac office worker...",
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "backdrop_path": null,
                "release_date": "1999-10-15",
                "vote_average": 8.4,
                "vote_count": 29000,
                "popularity": 61.4,
                "genre_ids": [18]
            }"#,
        )
        .unwrap();

        assert_eq!(movie.id, 550);
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.backdrop_path, None);
        assert_eq!(movie.vote_count, 29000);
    }

    #[test]
    fn test_list_response_with_null_results() {
        let list: ListResponse = serde_json::from_str(r#"{"page": 1, "results": null}"#).unwrap();
        assert!(list.results.is_empty());
        assert_eq!(list.page, 1);
    }

    #[test]
    fn test_detail_to_movie_defaults_missing_fields() {
        let detail: MovieDetail = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        let movie = detail.to_movie();

        assert_eq!(movie.id, 7);
        assert_eq!(movie.title, "");
        assert_eq!(movie.overview, "");
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.vote_count, 0);
        assert_eq!(movie.popularity, 0.0);
    }

    #[test]
    fn test_detail_to_movie_zeroes_non_numeric_scores() {
        let detail: MovieDetail = serde_json::from_str(
            r#"{"id": 7, "title": "Heat", "vote_average": "n/a", "vote_count": null, "popularity": {}}"#,
        )
        .unwrap();
        let movie = Movie::from(&detail);

        assert_eq!(movie.title, "Heat");
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.vote_count, 0);
        assert_eq!(movie.popularity, 0.0);
    }

    #[test]
    fn test_full_detail_with_appended_responses() {
        let detail: MovieDetail = serde_json::from_str(
            r#"{
                "id": 949,
                "title": "Heat",
                "runtime": 170,
                "adult": false,
                "genres": [{"id": 80, "name": "Crime"}],
                "credits": {
                    "cast": [{"id": 1158, "name": "Al Pacino", "character": "Vincent Hanna", "profile_path": null}],
                    "crew": [{"id": 638, "name": "Michael Mann", "job": "Director", "department": "Directing"}]
                },
                "recommendations": {"page": 1, "results": [{"id": 680, "title": "Pulp Fiction"}]}
            }"#,
        )
        .unwrap();

        assert_eq!(detail.runtime, Some(170));
        assert_eq!(detail.genres[0].name, "Crime");
        assert_eq!(detail.credits.cast[0].character, "Vincent Hanna");
        assert_eq!(detail.credits.crew[0].job, "Director");
        assert_eq!(detail.recommendations.results[0].id, 680);
    }
}
