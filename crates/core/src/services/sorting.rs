use std::cmp::Ordering;

use chrono::NaiveDate;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::models::{Movie, SortOrder};

/// Returns a sorted copy of `movies`; the input is left untouched.
///
/// - `Alphabet`: title order ignoring case and accents; on a tie the
///   unaccented spelling comes first, then lowercase before uppercase
/// - `Rating`: highest `vote_average` first
/// - `Release`: newest `release_date` first; missing or unparsable dates
///   go last
///
/// The sort is stable, so equal keys keep their fetched order.
pub fn sort_movies(movies: &[Movie], order: SortOrder) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    match order {
        SortOrder::Alphabet => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOrder::Rating => sorted.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average)),
        SortOrder::Release => {
            sorted.sort_by_key(|m| std::cmp::Reverse(release_day(&m.release_date)))
        }
    }
    sorted
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().nfd().cmp(b.to_lowercase().nfd()))
        .then_with(|| b.cmp(a))
}

/// Lowercased, decomposed title with combining marks stripped ("Élite" -> "elite")
fn base_letters(title: &str) -> String {
    title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn release_day(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}
