// src/constants.rs
//
// Application-wide constants for generation, colors and the HTTP surface.

/// Number of question/answer pairs the system instruction asks for.
///
/// This is an instruction to the completion service only. The generator accepts
/// any non-zero number of records the service returns.
///
/// Used in: `application/prompt.rs`
pub const FLASHCARD_COUNT: usize = 10;

/// Color applied to the front of every card when the caller does not pick one.
pub const DEFAULT_FRONT_COLOR: &str = "#1E1E1E";

/// Color applied to the back of every card when the caller does not pick one.
pub const DEFAULT_BACK_COLOR: &str = "#FF2D55";

/// Chat completions endpoint used when no override is configured.
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Model identifier used when no override is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Route serving flashcard generation.
pub const GENERATE_ROUTE: &str = "/api/generate";

/// Upper bound on upstream error body characters kept in logs and error details.
///
/// Used in: `infrastructure/openai.rs`
pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// Max age for CORS preflight caching, in seconds.
pub const CORS_MAX_AGE_SECS: u64 = 60 * 60;
