//! Memory System - Question/answer history and memory-augmented prompts
//!
//! A `MemorySource` supplies past exchanges; `MemPrompt` renders them into a
//! history section and fills it, with the new question, into an outer template.

mod item;
mod jsonl;
mod prompt;
mod source;

pub use item::{Memory, MemoryItem};
pub use jsonl::JsonlMemory;
pub use prompt::{CURRENT_QUESTION, DEFAULT_MEM_PROMPT_TEMPLATE, HISTORY_SECTION, MemPrompt, render_history};
pub use source::{InMemorySource, MemorySource, NoMemory};
