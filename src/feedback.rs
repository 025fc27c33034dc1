use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::config::ConfigError;

/// Qualitative tier of a category percentage, used to pick feedback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Medium, Band::High];

    /// `low` below 40, `medium` from 40 to 69, `high` from 70.
    pub fn of(percentage: u8) -> Band {
        match percentage {
            0..=39 => Band::Low,
            40..=69 => Band::Medium,
            _ => Band::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FeedbackRecord {
    category: Category,
    band: Band,
    #[serde(flatten)]
    feedback: Feedback,
}

#[derive(Debug, Deserialize)]
struct RawCorpus {
    entries: Vec<FeedbackRecord>,
}

/// Static feedback text for every (category, band) pair.
#[derive(Debug, Clone)]
pub struct FeedbackCorpus {
    entries: Vec<Feedback>,
}

impl FeedbackCorpus {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let raw: RawCorpus = serde_json::from_str(source).map_err(ConfigError::Malformed)?;
        Self::new(
            raw.entries
                .into_iter()
                .map(|record| ((record.category, record.band), record.feedback)),
        )
    }

    /// Builds the corpus, rejecting duplicates and any missing (category, band) pair.
    pub fn new(
        records: impl IntoIterator<Item = ((Category, Band), Feedback)>,
    ) -> Result<Self, ConfigError> {
        let mut table = HashMap::new();
        for ((category, band), feedback) in records {
            if table.insert((category, band), feedback).is_some() {
                return Err(ConfigError::DuplicateFeedback { category, band });
            }
        }

        let mut entries = Vec::with_capacity(Category::ALL.len() * Band::ALL.len());
        for category in Category::ALL {
            for band in Band::ALL {
                let feedback = table
                    .remove(&(category, band))
                    .ok_or(ConfigError::MissingFeedback { category, band })?;
                entries.push(feedback);
            }
        }
        Ok(Self { entries })
    }

    pub fn feedback(&self, category: Category, band: Band) -> &Feedback {
        &self.entries[category.index() * Band::ALL.len() + band as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn feedback(text: &str) -> Feedback {
        Feedback {
            summary: text.to_string(),
            strengths: vec![format!("{} strength", text)],
            improvements: vec![format!("{} improvement", text)],
        }
    }

    fn full() -> Vec<((Category, Band), Feedback)> {
        Category::ALL
            .iter()
            .flat_map(|&category| {
                Band::ALL.iter().map(move |&band| {
                    ((category, band), feedback(&format!("{} {}", category, band)))
                })
            })
            .collect()
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::of(0), Band::Low);
        assert_eq!(Band::of(39), Band::Low);
        assert_eq!(Band::of(40), Band::Medium);
        assert_eq!(Band::of(69), Band::Medium);
        assert_eq!(Band::of(70), Band::High);
        assert_eq!(Band::of(100), Band::High);
    }

    #[test]
    fn test_lookup() {
        let corpus = FeedbackCorpus::new(full()).unwrap();
        assert_eq!(
            corpus.feedback(Category::Resume, Band::Medium).summary,
            "resume medium"
        );
        assert_eq!(
            corpus.feedback(Category::Portfolio, Band::High).summary,
            "portfolio high"
        );
    }

    #[test]
    fn test_missing_entry_rejected() {
        let records = full()
            .into_iter()
            .filter(|((category, band), _)| {
                !(*category == Category::Communication && *band == Band::Low)
            })
            .collect::<Vec<_>>();
        assert!(matches!(
            FeedbackCorpus::new(records),
            Err(ConfigError::MissingFeedback {
                category: Category::Communication,
                band: Band::Low
            })
        ));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let mut records = full();
        records.push(((Category::Technical, Band::High), feedback("again")));
        assert!(matches!(
            FeedbackCorpus::new(records),
            Err(ConfigError::DuplicateFeedback { .. })
        ));
    }

    #[test]
    fn test_standard_corpus() {
        let engine = crate::standard().unwrap();
        let low = engine.feedback().feedback(Category::Technical, Band::Low);
        assert_eq!(low.summary, "Focus on building your technical foundation.");
        assert_eq!(low.improvements.len(), 4);
        assert_eq!(
            low.improvements[0],
            "Master one programming language thoroughly"
        );
        let high = engine.feedback().feedback(Category::Portfolio, Band::High);
        assert_eq!(high.strengths.len(), 3);
    }
}
