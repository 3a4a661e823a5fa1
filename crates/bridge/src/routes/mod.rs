pub mod home;
pub mod movies;
pub mod watchlist;
