use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::models::{Category, FilterState, SortOrder};

/// Process-wide holder of the home list filters.
///
/// All mutation goes through the setters; readers get copies. A poisoned
/// lock is logged and recovered with the last written state.
#[derive(Default)]
pub struct FilterStore {
    state: RwLock<FilterState>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FilterState {
        self.read().clone()
    }

    pub fn category(&self) -> Category {
        self.read().category
    }

    pub fn sort(&self) -> SortOrder {
        self.read().sort
    }

    pub fn search(&self) -> String {
        self.read().search.clone()
    }

    pub fn set_category(&self, category: Category) {
        self.write().category = category;
    }

    pub fn set_sort(&self, sort: SortOrder) {
        self.write().sort = sort;
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.write().search = search.into();
    }

    pub fn select_movie(&self, id: i64) {
        self.write().selected_movie_id = Some(id);
    }

    fn read(&self) -> RwLockReadGuard<'_, FilterState> {
        self.state.read().unwrap_or_else(|poisoned| {
            debug!("Filter state lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, FilterState> {
        self.state.write().unwrap_or_else(|poisoned| {
            debug!("Filter state lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_defaults() {
        let store = FilterStore::new();
        assert_eq!(store.snapshot(), FilterState::default());
    }

    #[test]
    fn test_setters_apply_immediately() {
        let store = FilterStore::new();

        store.set_category(Category::Popular);
        store.set_sort(SortOrder::Rating);
        store.set_search("alien");
        store.select_movie(348);

        let state = store.snapshot();
        assert_eq!(state.category, Category::Popular);
        assert_eq!(state.sort, SortOrder::Rating);
        assert_eq!(state.search, "alien");
        assert_eq!(state.selected_movie_id, Some(348));
        assert_eq!(store.category(), Category::Popular);
        assert_eq!(store.sort(), SortOrder::Rating);
        assert_eq!(store.search(), "alien");
    }

    #[test]
    fn test_state_survives_poisoned_lock() {
        let store = FilterStore::new();
        store.set_category(Category::Upcoming);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.state.write().unwrap();
            panic!("writer panicked");
        }));
        assert!(result.is_err());
        assert!(store.state.is_poisoned());

        assert_eq!(store.category(), Category::Upcoming);
        store.set_sort(SortOrder::Release);
        assert_eq!(store.sort(), SortOrder::Release);
    }
}
