// src/domain/color.rs
use crate::constants::{DEFAULT_BACK_COLOR, DEFAULT_FRONT_COLOR};
use crate::domain::DomainError;
use regex::Regex;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid")
});

/// Display colors merged onto every record of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardColors {
    pub front: String,
    pub back: String,
}

impl CardColors {
    /// Resolve caller-supplied colors, falling back to the defaults.
    ///
    /// Absent or blank values take the default; anything else must be a CSS
    /// hex color (`#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`).
    pub fn resolve(front: Option<&str>, back: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self {
            front: resolve_one("frontColor", front, DEFAULT_FRONT_COLOR)?,
            back: resolve_one("backColor", back, DEFAULT_BACK_COLOR)?,
        })
    }
}

impl Default for CardColors {
    fn default() -> Self {
        Self {
            front: DEFAULT_FRONT_COLOR.to_string(),
            back: DEFAULT_BACK_COLOR.to_string(),
        }
    }
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

fn resolve_one(field: &str, value: Option<&str>, default: &str) -> Result<String, DomainError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default.to_string()),
        Some(color) if is_hex_color(color) => Ok(color.to_string()),
        Some(color) => Err(DomainError::Validation(format!(
            "{field} must be a hex color like #1E1E1E, got '{color}'"
        ))),
    }
}
