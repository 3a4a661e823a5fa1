use crate::db::DbPool;
use crate::models::{Category, SortOrder};
use crate::Result;

/// Durable key/value slots for the user's list preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Category,
    Sort,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::Category => "movie.category",
            PreferenceKey::Sort => "movie.sort",
        }
    }
}

#[derive(Clone)]
pub struct PreferenceStore {
    pool: DbPool,
}

impl PreferenceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: PreferenceKey) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    pub async fn set(&self, key: PreferenceKey, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads the persisted category and sort.
    ///
    /// Read failures and values that are not a known variant both come back
    /// as `None`, leaving the caller's defaults in place.
    pub async fn load_filters(&self) -> (Option<Category>, Option<SortOrder>) {
        let category = self
            .get(PreferenceKey::Category)
            .await
            .ok()
            .flatten()
            .and_then(|v| Category::parse(&v));
        let sort = self
            .get(PreferenceKey::Sort)
            .await
            .ok()
            .flatten()
            .and_then(|v| SortOrder::parse(&v));

        (category, sort)
    }
}
