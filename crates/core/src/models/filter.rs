use serde::{Deserialize, Serialize};

/// The three canonical catalog list buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    NowPlaying,
    Upcoming,
    Popular,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::NowPlaying, Category::Upcoming, Category::Popular];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NowPlaying => "now_playing",
            Category::Upcoming => "upcoming",
            Category::Popular => "popular",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::NowPlaying => "Now Playing",
            Category::Upcoming => "Upcoming",
            Category::Popular => "Popular",
        }
    }

    /// Parses a stored value; anything that is not an exact variant name is `None`
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Client-side ordering of a fetched list. Never sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Alphabet,
    Rating,
    Release,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Alphabet, SortOrder::Rating, SortOrder::Release];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Alphabet => "alphabet",
            SortOrder::Rating => "rating",
            SortOrder::Release => "release",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Alphabet => "By alphabetical order",
            SortOrder::Rating => "By rating",
            SortOrder::Release => "By release date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Category,
    pub sort: SortOrder,
    pub search: String,
    /// Last opened movie, for highlighting only. Not persisted.
    pub selected_movie_id: Option<i64>,
}
