//! Error types for memprompt
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while building prompts
#[derive(Debug, Error)]
pub enum PromptError {
    /// One or more placeholders in the template received no value
    #[error("Missing values for variables: {}", .0.join(", "))]
    MissingVariable(Vec<String>),

    /// One or more supplied values have no placeholder in the template
    #[error("Unexpected variables: {}", .0.join(", "))]
    UnexpectedVariable(Vec<String>),

    /// A serializable context could not be flattened into variables
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    /// Named template not found on disk
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Memory store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PromptError {
    /// Names of the offending variables for validation errors, empty otherwise
    pub fn variables(&self) -> &[String] {
        match self {
            PromptError::MissingVariable(names) | PromptError::UnexpectedVariable(names) => names,
            _ => &[],
        }
    }
}

/// Result type alias for memprompt operations
pub type Result<T> = std::result::Result<T, PromptError>;
