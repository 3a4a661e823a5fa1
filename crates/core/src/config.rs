use serde::Deserialize;

use crate::services::tmdb::TMDB_BASE_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// TMDB v4 read access token, sent as `Authorization: Bearer <token>`
    pub tmdb_token: String,

    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_base_url() -> String {
    TMDB_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_database_url() -> String {
    "sqlite:./data/movie-browser.db?mode=rwc".to_string()
}

// Loopback only
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
