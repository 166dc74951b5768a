// src/application/validator.rs
use crate::domain::{CardColors, DomainError, FlashcardRecord, GenerationResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawFlashcards {
    flashcards: Vec<RawFlashcard>,
}

#[derive(Debug, Deserialize)]
struct RawFlashcard {
    front: String,
    back: String,
}

/// Turn completion text into a typed result, or reject it whole.
///
/// The text must be a JSON object `{"flashcards": [{"front", "back"}, ...]}`
/// with at least one record, and every record needs a non-blank front and
/// back. Records keep their upstream order. The count is not checked against
/// the number the instruction asked for.
pub fn parse_flashcards(content: &str, colors: &CardColors) -> Result<GenerationResult, DomainError> {
    let raw: RawFlashcards = serde_json::from_str(content.trim())
        .map_err(|e| DomainError::MalformedResponse(format!("unexpected flashcard JSON: {e}")))?;

    if raw.flashcards.is_empty() {
        return Err(DomainError::MalformedResponse(
            "response contained no flashcards".to_string(),
        ));
    }

    let mut records = Vec::with_capacity(raw.flashcards.len());
    for (index, card) in raw.flashcards.into_iter().enumerate() {
        if card.front.trim().is_empty() || card.back.trim().is_empty() {
            return Err(DomainError::MalformedResponse(format!(
                "flashcard {index} has an empty front or back"
            )));
        }
        records.push(FlashcardRecord::new(card.front, card.back, colors));
    }

    Ok(GenerationResult::new(records))
}
