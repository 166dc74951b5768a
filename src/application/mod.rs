// src/application/mod.rs
pub mod completion;
pub mod generator;
pub mod prompt;
pub mod validator;

pub use completion::{CompletionClient, CompletionRequest};
pub use generator::{FlashcardGenerator, GenerationSettings};
pub use prompt::PromptTemplate;
