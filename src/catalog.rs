use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Every option value must fit on this scale. A category's maximum is
/// `SCALE_MAX * question count`.
pub const SCALE_MAX: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technical,
    Resume,
    Communication,
    Portfolio,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Technical,
        Category::Resume,
        Category::Communication,
        Category::Portfolio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Resume => "resume",
            Category::Communication => "communication",
            Category::Portfolio => "portfolio",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub value: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: Category,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// 回答値から選択肢を引く
    pub fn option(&self, value: u8) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }

    pub fn accepts(&self, value: u8) -> bool {
        self.option(value).is_some()
    }
}

/// Display label and weight of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    categories: Vec<CategoryInfo>,
    questions: Vec<Question>,
}

/// The ordered question battery together with its category table.
///
/// A `Catalog` can only be built through [`Catalog::from_json`] or [`Catalog::new`], both of
/// which reject instruments the scoring engine could not score: a category without questions,
/// a category missing from the table, duplicate question ids or option values, options beyond
/// [`SCALE_MAX`] and negative weights.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<CategoryInfo>,
    questions: Vec<Question>,
    /// position in `categories`, indexed by `Category::index`
    slots: [usize; Category::ALL.len()],
}

impl Catalog {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalog = serde_json::from_str(source).map_err(ConfigError::Malformed)?;
        Self::new(raw.categories, raw.questions)
    }

    pub fn new(categories: Vec<CategoryInfo>, questions: Vec<Question>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for info in &categories {
            if !seen.insert(info.category) {
                return Err(ConfigError::DuplicateCategory(info.category));
            }
            if !info.weight.is_finite() || info.weight < 0.0 {
                return Err(ConfigError::InvalidWeight(info.category));
            }
        }
        if let Some(&missing) = Category::ALL.iter().find(|c| !seen.contains(c)) {
            return Err(ConfigError::MissingCategory(missing));
        }

        let mut ids = HashSet::new();
        for question in &questions {
            if !ids.insert(question.id.as_str()) {
                return Err(ConfigError::DuplicateQuestion(question.id.clone()));
            }
            if question.options.is_empty() {
                return Err(ConfigError::NoOptions(question.id.clone()));
            }
            let mut values = HashSet::new();
            for option in &question.options {
                if option.value > SCALE_MAX {
                    return Err(ConfigError::OptionOutOfScale {
                        question: question.id.clone(),
                        value: option.value,
                    });
                }
                if !values.insert(option.value) {
                    return Err(ConfigError::DuplicateOption {
                        question: question.id.clone(),
                        value: option.value,
                    });
                }
            }
        }

        if let Some(empty) = categories
            .iter()
            .map(|info| info.category)
            .find(|&category| !questions.iter().any(|q| q.category == category))
        {
            return Err(ConfigError::EmptyCategory(empty));
        }

        let mut slots = [0; Category::ALL.len()];
        for (position, info) in categories.iter().enumerate() {
            slots[info.category.index()] = position;
        }

        Ok(Self {
            categories,
            questions,
            slots,
        })
    }

    /// 全設問を取得する
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// 設問IDを指定して設問を取得する
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Categories in catalog order.
    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    /// Questions of one category, catalog order preserved.
    pub fn questions_in(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |question| question.category == category)
    }

    pub fn label(&self, category: Category) -> &str {
        self.info(category).label.as_str()
    }

    pub fn weight(&self, category: Category) -> f64 {
        self.info(category).weight
    }

    fn info(&self, category: Category) -> &CategoryInfo {
        &self.categories[self.slots[category.index()]]
    }
}
