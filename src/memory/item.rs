//! Question/answer records that make up a memory.

use serde::{Deserialize, Serialize};

/// One past exchange: a question and the answer it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub question: String,
    pub answer: String,
}

/// Ordered past exchanges, oldest or most relevant first as the source returns them.
pub type Memory = Vec<MemoryItem>;

impl MemoryItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Render as a history block, including the trailing newline.
    pub fn render(&self) -> String {
        format!("question: {}\nanswer: {}\n", self.question, self.answer)
    }
}
