use std::env;
use std::path::PathBuf;

use crate::catalog::Category;
use crate::feedback::Band;

/// Runtime settings for the binaries.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub history_path: PathBuf,
    pub report_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Loads `.env` if present, then reads `READINESS_*` variables, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            history_path: path_var("READINESS_HISTORY_PATH", "readiness-history.json")?,
            report_dir: path_var("READINESS_REPORT_DIR", ".")?,
            log_level: env::var("READINESS_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn path_var(name: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyVar(name)),
        Ok(value) => Ok(PathBuf::from(value)),
        Err(_) => Ok(PathBuf::from(default)),
    }
}

/// Problems that keep the assessment from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyVar(&'static str),
    #[error("instrument data is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("category `{0}` is listed more than once")]
    DuplicateCategory(Category),
    #[error("category `{0}` has no label or weight")]
    MissingCategory(Category),
    #[error("category `{0}` must have a finite, non-negative weight")]
    InvalidWeight(Category),
    #[error("category `{0}` has no questions")]
    EmptyCategory(Category),
    #[error("question id `{0}` is used more than once")]
    DuplicateQuestion(String),
    #[error("question `{0}` has no options")]
    NoOptions(String),
    #[error("question `{question}` repeats option value {value}")]
    DuplicateOption { question: String, value: u8 },
    #[error("question `{question}` has option value {value} beyond the answer scale")]
    OptionOutOfScale { question: String, value: u8 },
    #[error("no feedback for category `{category}` in the {band} band")]
    MissingFeedback { category: Category, band: Band },
    #[error("feedback for category `{category}` in the {band} band is listed more than once")]
    DuplicateFeedback { category: Category, band: Band },
}
