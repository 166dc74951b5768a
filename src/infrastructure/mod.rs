// src/infrastructure/mod.rs
pub mod config;
pub mod openai;

pub use config::Config;
pub use openai::OpenAiClient;
