// src/domain/flashcard.rs
use crate::domain::CardColors;
use serde::{Deserialize, Serialize};

/// A caller's request for a set of flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRequest {
    #[serde(rename = "text")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_color: Option<String>,
}

impl FlashcardRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            front_color: None,
            back_color: None,
        }
    }

    pub fn with_colors(mut self, front: impl Into<String>, back: impl Into<String>) -> Self {
        self.front_color = Some(front.into());
        self.back_color = Some(back.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRecord {
    pub front: String,
    pub back: String,
    pub front_color: String,
    pub back_color: String,
}

impl FlashcardRecord {
    pub fn new(front: impl Into<String>, back: impl Into<String>, colors: &CardColors) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            front_color: colors.front.clone(),
            back_color: colors.back.clone(),
        }
    }
}

/// Ordered records produced by one generation, in upstream order.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GenerationResult {
    records: Vec<FlashcardRecord>,
}

impl GenerationResult {
    pub fn new(records: Vec<FlashcardRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FlashcardRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<FlashcardRecord> {
        self.records
    }
}

impl IntoIterator for GenerationResult {
    type Item = FlashcardRecord;
    type IntoIter = std::vec::IntoIter<FlashcardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
