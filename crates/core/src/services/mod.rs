pub mod catalog;
pub mod details;
pub mod filters;
pub mod home;
pub mod preferences;
pub mod sorting;
pub mod tmdb;
pub mod watchlist;

pub use catalog::MovieCatalog;
pub use details::{DetailService, DetailView};
pub use filters::FilterStore;
pub use home::{HomeMovies, HomeView};
pub use preferences::{PreferenceKey, PreferenceStore};
pub use sorting::sort_movies;
pub use tmdb::{FetchFailure, FetchOutcome, TmdbClient, image_url};
pub use watchlist::Watchlist;
