// src/domain/mod.rs
pub mod color;
pub mod error;
pub mod flashcard;

pub use color::CardColors;
pub use error::DomainError;
pub use flashcard::{FlashcardRecord, FlashcardRequest, GenerationResult};
