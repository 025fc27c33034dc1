use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::answers::Answers;
use crate::catalog::{Catalog, Category, Question, SCALE_MAX};
use crate::feedback::{Band, FeedbackCorpus};

/// Advice appended after the weakest-category suggestions.
pub const GENERAL_ADVICE: [&str; 2] = [
    "Schedule mock interviews to practice",
    "Set a target application date and work backwards",
];

/// Upper bound on the next-steps list.
pub const MAX_NEXT_STEPS: usize = 4;

/// How many of the weakest categories contribute a suggestion.
const FOCUS_CATEGORIES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ReadinessLevel {
    /// `expert` from 80, `advanced` from 60, `intermediate` from 40.
    pub fn from_score(overall: u8) -> Self {
        match overall {
            80.. => ReadinessLevel::Expert,
            60..=79 => ReadinessLevel::Advanced,
            40..=59 => ReadinessLevel::Intermediate,
            _ => ReadinessLevel::Beginner,
        }
    }

    /// Estimated preparation time for this level.
    pub fn prep_time(self) -> &'static str {
        match self {
            ReadinessLevel::Expert => "1-2 weeks",
            ReadinessLevel::Advanced => "3-4 weeks",
            ReadinessLevel::Intermediate => "6-8 weeks",
            ReadinessLevel::Beginner => "2-3 months",
        }
    }

    /// Headline shown next to the overall score.
    pub fn label(self) -> &'static str {
        match self {
            ReadinessLevel::Expert => "Interview Ready",
            ReadinessLevel::Advanced => "Almost There",
            ReadinessLevel::Intermediate => "Making Progress",
            ReadinessLevel::Beginner => "Getting Started",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReadinessLevel::Expert => "expert",
            ReadinessLevel::Advanced => "advanced",
            ReadinessLevel::Intermediate => "intermediate",
            ReadinessLevel::Beginner => "beginner",
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    /// Percentage, 0 to 100.
    pub score: u8,
    pub max_score: u8,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl CategoryScore {
    pub fn band(&self) -> Band {
        Band::of(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub overall_score: u8,
    /// One entry per category, catalog order.
    pub category_scores: Vec<CategoryScore>,
    pub readiness_level: ReadinessLevel,
    pub estimated_prep_time: String,
    pub next_steps: Vec<String>,
}

impl AssessmentResult {
    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.category_scores
            .iter()
            .find(|score| score.category == category)
    }
}

/// Scores answers against a validated catalog and feedback corpus.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    feedback: FeedbackCorpus,
}

impl Engine {
    pub fn new(catalog: Catalog, feedback: FeedbackCorpus) -> Self {
        Self { catalog, feedback }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn feedback(&self) -> &FeedbackCorpus {
        &self.feedback
    }

    /// Maps answers to an assessment result.
    ///
    /// Unanswered questions, and values that are not one of the question's options, count as
    /// 0 but stay in the denominator, so partial answers give a lower score instead of an
    /// error. The overall score is the weighted sum of the category percentages, rounded once
    /// at the end.
    pub fn score(&self, answers: &Answers) -> AssessmentResult {
        let category_scores = self
            .catalog
            .categories()
            .iter()
            .map(|info| self.category_score(info.category, answers))
            .collect::<Vec<CategoryScore>>();

        let weighted: f64 = category_scores
            .iter()
            .map(|cs| f64::from(cs.score) * self.catalog.weight(cs.category))
            .sum();
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;

        let readiness_level = ReadinessLevel::from_score(overall_score);
        let next_steps = next_steps(&category_scores);

        debug!(
            overall_score,
            level = %readiness_level,
            answered = answers.len(),
            "scored assessment"
        );

        AssessmentResult {
            overall_score,
            category_scores,
            readiness_level,
            estimated_prep_time: readiness_level.prep_time().to_string(),
            next_steps,
        }
    }

    fn category_score(&self, category: Category, answers: &Answers) -> CategoryScore {
        let questions = self.catalog.questions_in(category).collect::<Vec<&Question>>();
        let actual: u32 = questions
            .iter()
            .map(|question| answered_value(question, answers))
            .sum();
        let score = percentage(actual, questions.len());
        let feedback = self.feedback.feedback(category, Band::of(score));

        CategoryScore {
            category,
            score,
            max_score: 100,
            feedback: feedback.summary.clone(),
            strengths: feedback.strengths.clone(),
            improvements: feedback.improvements.clone(),
        }
    }
}

fn answered_value(question: &Question, answers: &Answers) -> u32 {
    answers
        .get(&question.id)
        .filter(|&value| question.accepts(value))
        .map(u32::from)
        .unwrap_or(0)
}

/// `round(100 * actual / (SCALE_MAX * questions))`; catalog validation rules out zero questions.
fn percentage(actual: u32, questions: usize) -> u8 {
    let max = f64::from(SCALE_MAX) * questions as f64;
    if max == 0.0 {
        return 0;
    }
    ((f64::from(actual) / max) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// The first improvement of each of the two weakest categories, then the general advice.
fn next_steps(scores: &[CategoryScore]) -> Vec<String> {
    let mut ranked = scores.iter().collect::<Vec<&CategoryScore>>();
    // stable: ties keep catalog order
    ranked.sort_by_key(|cs| cs.score);

    ranked
        .into_iter()
        .take(FOCUS_CATEGORIES)
        .filter_map(|cs| cs.improvements.first().cloned())
        .chain(GENERAL_ADVICE.iter().map(|advice| advice.to_string()))
        .take(MAX_NEXT_STEPS)
        .collect()
}
