//! Interview readiness self-assessment.
//!
//! A fixed battery of multiple-choice questions grouped into weighted categories is scored into
//! a composite readiness score, per-category feedback, a prep-time estimate and a short action
//! plan. Past results can be kept in a bounded history and exported as a report.

use once_cell::sync::OnceCell;

pub mod answers;
pub mod bulk;
pub mod catalog;
pub mod config;
pub mod feedback;
pub mod history;
pub mod report;
pub mod scoring;
pub mod telemetry;

pub use answers::Answers;
pub use bulk::read_bulk;
pub use catalog::{AnswerOption, Catalog, Category, CategoryInfo, Question};
pub use config::{AppConfig, ConfigError};
pub use feedback::{Band, Feedback, FeedbackCorpus};
pub use history::{trend, HistoryEntry, HistoryStore, JsonFileHistory, MemoryHistory, Trend};
pub use scoring::{AssessmentResult, CategoryScore, Engine, ReadinessLevel};

/// 設問マスタ (reference instrument)
const QUESTIONS_JSON: &str = include_str!("../resources/questions.json");
/// カテゴリ×帯ごとのフィードバック文面
const FEEDBACK_JSON: &str = include_str!("../resources/feedback.json");

static STANDARD: OnceCell<Engine> = OnceCell::new();

/// Returns the validated reference instrument.
///
/// The embedded catalog and feedback corpus are parsed and checked on first use. A broken
/// instrument is reported here, at startup, and never while scoring.
pub fn standard() -> Result<&'static Engine> {
    STANDARD.get_or_try_init(|| -> Result<Engine> {
        let catalog = Catalog::from_json(QUESTIONS_JSON)?;
        let feedback = FeedbackCorpus::from_json(FEEDBACK_JSON)?;
        Ok(Engine::new(catalog, feedback))
    })
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 設問マスタに存在しない設問
    #[error("question `{0}` is not part of the assessment")]
    UnknownQuestion(String),
    /// 回答選択肢が違反
    #[error("`{value}` is not an option of question `{question}`")]
    IllegalAnswer { question: String, value: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
