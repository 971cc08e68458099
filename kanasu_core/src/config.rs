//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PREDICT_DELAY_MS: u64 = 600;
pub const DEFAULT_CHAT_DELAY_MS: u64 = 700;
pub const DEFAULT_ROADMAP_DELAY_MS: u64 = 0;

/// Which in-process recommender answers predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommenderKind {
    /// Fixed three-entry list
    #[default]
    Mock,
    /// Keyword scoring over the career catalog
    Catalog,
}

impl RecommenderKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "mock" => Some(RecommenderKind::Mock),
            "catalog" => Some(RecommenderKind::Catalog),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// When unset, the client uses in-process providers.
    pub api_url: Option<String>,
    pub predict_delay: Duration,
    pub chat_delay: Duration,
    pub roadmap_delay: Duration,
    pub recommender: RecommenderKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable source; unparsable values fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let millis = |name: &str, default: u64| {
            Duration::from_millis(
                non_empty(name)
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(default),
            )
        };

        Self {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: non_empty("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            db_path: non_empty("KANASU_DB")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            api_url: non_empty("KANASU_API_URL").map(|u| u.trim_end_matches('/').to_string()),
            predict_delay: millis("KANASU_PREDICT_DELAY_MS", DEFAULT_PREDICT_DELAY_MS),
            chat_delay: millis("KANASU_CHAT_DELAY_MS", DEFAULT_CHAT_DELAY_MS),
            roadmap_delay: millis("KANASU_ROADMAP_DELAY_MS", DEFAULT_ROADMAP_DELAY_MS),
            recommender: non_empty("KANASU_RECOMMENDER")
                .and_then(|v| RecommenderKind::from_name(&v))
                .unwrap_or_default(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `<local data dir>/kanasu/kanasu.db`, or `kanasu.db` in the working
/// directory when the platform has no data dir.
pub fn default_db_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("kanasu").join("kanasu.db"),
        None => PathBuf::from("kanasu.db"),
    }
}
