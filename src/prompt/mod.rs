//! Prompt System - Template parsing, filling and loading
//!
//! Templates use flat `{variable}` placeholders. A template knows which
//! variables it needs and refuses to fill with any more or any fewer.

mod loader;
mod template;

pub use loader::PromptLoader;
pub use template::PromptTemplate;
