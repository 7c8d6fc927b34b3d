use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidLayout,
    InvalidTyping,
}

/// Serializable error payload printed by tools that report over JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteError {
    pub code: ErrorCode,
    pub message: String,
}

impl SiteError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
