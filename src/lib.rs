//! memprompt - Prompt templates with question/answer memory
//!
//! Fill flat `{placeholder}` templates with validated variables, and ground
//! new questions on a history of earlier questions and answers.

pub mod error;
pub mod memory;
pub mod prompt;

pub use error::{PromptError, Result};
pub use memory::{MemPrompt, MemoryItem, MemorySource};
pub use prompt::{PromptLoader, PromptTemplate};
