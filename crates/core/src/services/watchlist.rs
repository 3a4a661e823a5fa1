use std::sync::RwLock;

use crate::models::{Movie, MovieDetail};

/// In-memory, insertion-ordered set of saved movie snapshots keyed by id.
///
/// Snapshots are whatever was captured when the movie was added; they are
/// never refreshed from the catalog.
#[derive(Default)]
pub struct Watchlist {
    items: RwLock<Vec<Movie>>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `movie` unless one with the same id is already saved.
    /// Returns whether anything was added.
    pub fn add(&self, movie: Movie) -> bool {
        let Ok(mut items) = self.items.write() else {
            return false;
        };
        if items.iter().any(|m| m.id == movie.id) {
            return false;
        }
        items.push(movie);
        true
    }

    /// Removes the movie with `id`. Returns whether anything was removed.
    pub fn remove(&self, id: i64) -> bool {
        let Ok(mut items) = self.items.write() else {
            return false;
        };
        let before = items.len();
        items.retain(|m| m.id != id);
        items.len() != before
    }

    pub fn has(&self, id: i64) -> bool {
        self.items
            .read()
            .map(|items| items.iter().any(|m| m.id == id))
            .unwrap_or(false)
    }

    /// Flips membership for the movie behind `detail`.
    /// Returns `true` if the movie is saved afterwards.
    pub fn toggle(&self, detail: &MovieDetail) -> bool {
        let Ok(mut items) = self.items.write() else {
            return false;
        };
        if let Some(index) = items.iter().position(|m| m.id == detail.id) {
            items.remove(index);
            false
        } else {
            items.push(detail.to_movie());
            true
        }
    }

    pub fn items(&self) -> Vec<Movie> {
        self.items.read().map(|i| i.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
