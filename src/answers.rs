use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::{Error, Result};

/// Selected option value per question id.
///
/// Answers may be partial. Scoring treats a missing answer as 0 rather than rejecting it, so
/// callers who need every question answered check [`Answers::is_complete`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: HashMap<String, u8>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設問IDを指定して回答を格納する
    /// 設問の選択肢にない値は認めない。
    pub fn insert(&mut self, catalog: &Catalog, question_id: &str, value: u8) -> Result<()> {
        let question = catalog
            .question(question_id)
            .ok_or_else(|| Error::UnknownQuestion(question_id.to_string()))?;
        if !question.accepts(value) {
            return Err(Error::IllegalAnswer {
                question: question_id.to_string(),
                value: value.to_string(),
            });
        }
        self.values.insert(question.id.clone(), value);
        Ok(())
    }

    /// Stores a value without checking it against a catalog.
    pub fn record(&mut self, question_id: impl Into<String>, value: u8) {
        self.values.insert(question_id.into(), value);
    }

    pub fn get(&self, question_id: &str) -> Option<u8> {
        self.values.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Catalog questions that have no answer yet, in catalog order.
    pub fn missing<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        catalog
            .questions()
            .iter()
            .filter(|question| !self.values.contains_key(&question.id))
            .map(|question| question.id.as_str())
            .collect()
    }

    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        self.missing(catalog).is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u8)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, u8)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(id, value)| (id.into(), value)).collect(),
        }
    }
}

impl From<HashMap<String, u8>> for Answers {
    fn from(values: HashMap<String, u8>) -> Self {
        Self { values }
    }
}
