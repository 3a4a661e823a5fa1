use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Item not found")]
    NotFound,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound => 404,
            Error::ExternalApi(_) => 502,
            _ => 500,
        }
    }
}
