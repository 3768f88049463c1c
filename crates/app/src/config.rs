//! Runtime configuration, read from the environment (and `.env` outside tests).

use quiz_core::model::DEFAULT_QUESTION_COUNT;

pub const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone)]
pub struct Config {
    pub db_url: String,
    pub admin_password: String,
    pub default_question_count: usize,
    pub log_filter: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_url", &self.db_url)
            .field("admin_password", &"<redacted>")
            .field("default_question_count", &self.default_question_count)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

impl Config {
    /// Load configuration from `QUIZ_DB_URL`, `QUIZ_ADMIN_PASSWORD`,
    /// `QUIZ_DEFAULT_COUNT` and `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `QUIZ_DEFAULT_COUNT` is not a positive number.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_url = lookup("QUIZ_DB_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

        // An unset password only matches an empty attempt.
        let admin_password = lookup("QUIZ_ADMIN_PASSWORD").unwrap_or_default();

        let default_question_count = match lookup("QUIZ_DEFAULT_COUNT") {
            None => DEFAULT_QUESTION_COUNT,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "QUIZ_DEFAULT_COUNT".to_string(),
                        format!("'{raw}' is not a positive whole number"),
                    ));
                }
            },
        };

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            db_url,
            admin_password,
            default_question_count,
            log_filter,
        })
    }
}
