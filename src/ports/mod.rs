// src/ports/mod.rs
pub mod http;

pub use http::{router, AppError};
