//! Memory-augmented prompts.
//!
//! `MemPrompt` wraps a question with the history held by a `MemorySource`.
//! With no history the question passes through untouched; otherwise the
//! history and question are filled into an outer template that must contain
//! exactly `{current_question}` and `{history_section}`.

use std::collections::HashMap;

use log::debug;

use super::item::{Memory, MemoryItem};
use super::source::MemorySource;
use crate::error::Result;
use crate::prompt::PromptTemplate;

/// Placeholder for the question being asked.
pub const CURRENT_QUESTION: &str = "current_question";

/// Placeholder for the rendered history.
pub const HISTORY_SECTION: &str = "history_section";

/// Default outer template. Ends on `CURRENT_ANSWER: ` with no newline so a
/// model continues straight from it.
pub const DEFAULT_MEM_PROMPT_TEMPLATE: &str = "\
In order to answer the CURRENT_QUESTION, you have to take into consideration the questions and answers in the HISTORY
section.

--------
HISTORY:

{history_section}
--------
CURRENT_QUESTION: {current_question}
CURRENT_ANSWER: ";

/// Render memory items as a history section: each block joined by a newline.
pub fn render_history(memory: &[MemoryItem]) -> String {
    memory.iter().map(MemoryItem::render).collect::<Vec<_>>().join("\n")
}

/// Builds prompts for questions, grounded on the history of a memory source.
pub struct MemPrompt<S: MemorySource> {
    source: S,
    template: PromptTemplate,
}

impl<S: MemorySource> MemPrompt<S> {
    /// Use the default outer template.
    pub fn new(source: S) -> Self {
        Self::with_template(source, PromptTemplate::new(DEFAULT_MEM_PROMPT_TEMPLATE))
    }

    /// Use a custom outer template.
    ///
    /// The template is not checked here; a template lacking either
    /// placeholder fails on the first `complete_prompt` that has history.
    pub fn with_template(source: S, template: impl Into<PromptTemplate>) -> Self {
        Self {
            source,
            template: template.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn get_memory(&self) -> Result<Option<Memory>> {
        self.source.get_memory()
    }

    pub fn save_memory(&self, memory: Memory) -> Result<()> {
        self.source.save_memory(memory)
    }

    /// Complete the prompt for `current_question` using the available memory.
    ///
    /// Returns the question verbatim when memory is empty or absent.
    pub fn complete_prompt(&self, current_question: &str) -> Result<String> {
        let memory = match self.source.get_memory()? {
            Some(memory) if !memory.is_empty() => memory,
            _ => {
                debug!("No memory available, passing question through");
                return Ok(current_question.to_string());
            }
        };

        debug!("Completing prompt with {} memory item(s)", memory.len());
        let variables = HashMap::from([
            (CURRENT_QUESTION.to_string(), current_question.to_string()),
            (HISTORY_SECTION.to_string(), render_history(&memory)),
        ]);
        self.template.fill_variables(&variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::memory::{InMemorySource, NoMemory};

    const QUESTION: &str = "How many apples Mary and John have together?";

    fn apples() -> Memory {
        vec![
            MemoryItem::new("How many apples does Mary have?", "Mary has two apples"),
            MemoryItem::new("How many apples does John have?", "John has four apples"),
        ]
    }

    #[test]
    fn test_default_template_variables() {
        let prompt = MemPrompt::new(NoMemory);
        assert_eq!(
            prompt.template().expected_variables(),
            [HISTORY_SECTION.to_string(), CURRENT_QUESTION.to_string()]
        );
        assert!(prompt.template().template().ends_with("CURRENT_ANSWER: "));
    }

    #[test]
    fn test_absent_memory_passes_through() {
        let prompt = MemPrompt::new(InMemorySource::new());
        assert_eq!(prompt.complete_prompt(QUESTION).unwrap(), QUESTION);
    }

    #[test]
    fn test_empty_memory_passes_through() {
        let prompt = MemPrompt::new(InMemorySource::with_memory(Vec::new()));
        assert_eq!(prompt.complete_prompt(QUESTION).unwrap(), QUESTION);
    }

    #[test]
    fn test_passthrough_skips_template_entirely() {
        let prompt = MemPrompt::with_template(NoMemory, "no placeholders");
        assert_eq!(prompt.complete_prompt("{odd} question").unwrap(), "{odd} question");
    }

    #[test]
    fn test_complete_prompt_with_memory() {
        let prompt = MemPrompt::new(InMemorySource::new());
        prompt.save_memory(apples()).unwrap();

        let expected = "\
In order to answer the CURRENT_QUESTION, you have to take into consideration the questions and answers in the HISTORY
section.

--------
HISTORY:

question: How many apples does Mary have?
answer: Mary has two apples

question: How many apples does John have?
answer: John has four apples

--------
CURRENT_QUESTION: How many apples Mary and John have together?
CURRENT_ANSWER: ";

        assert_eq!(prompt.complete_prompt(QUESTION).unwrap(), expected);
    }

    #[test]
    fn test_render_history_delimiter() {
        assert_eq!(
            render_history(&apples()),
            "question: How many apples does Mary have?\nanswer: Mary has two apples\n\
             \nquestion: How many apples does John have?\nanswer: John has four apples\n"
        );
        assert_eq!(render_history(&[]), "");
    }

    #[test]
    fn test_custom_template() {
        let prompt = MemPrompt::with_template(
            InMemorySource::with_memory(vec![MemoryItem::new("a?", "b")]),
            "Q={current_question}|H={history_section}",
        );
        assert_eq!(prompt.complete_prompt("c?").unwrap(), "Q=c?|H=question: a?\nanswer: b\n");
    }

    #[test]
    fn test_custom_template_without_history_placeholder() {
        let prompt = MemPrompt::with_template(
            InMemorySource::with_memory(apples()),
            "Only {current_question} and {extra}",
        );
        let err = prompt.complete_prompt(QUESTION).unwrap_err();
        assert!(matches!(err, PromptError::UnexpectedVariable(ref names) if names == &[HISTORY_SECTION.to_string()]));
    }

    #[test]
    fn test_custom_template_lacking_both_placeholders() {
        let prompt = MemPrompt::with_template(InMemorySource::with_memory(apples()), "static");
        let err = prompt.complete_prompt(QUESTION).unwrap_err();
        assert_eq!(
            err.variables(),
            [CURRENT_QUESTION.to_string(), HISTORY_SECTION.to_string()]
        );
    }

    #[test]
    fn test_custom_template_with_unknown_placeholder() {
        let prompt = MemPrompt::with_template(
            InMemorySource::with_memory(apples()),
            "{current_question}{history_section}{footer}",
        );
        let err = prompt.complete_prompt(QUESTION).unwrap_err();
        assert!(matches!(err, PromptError::MissingVariable(ref names) if names == &["footer".to_string()]));
    }

    #[test]
    fn test_question_braces_not_expanded() {
        let prompt = MemPrompt::with_template(
            InMemorySource::with_memory(vec![MemoryItem::new("q", "a")]),
            "{history_section}>> {current_question}",
        );
        assert_eq!(
            prompt.complete_prompt("{history_section}?").unwrap(),
            "question: q\nanswer: a\n>> {history_section}?"
        );
    }

    struct FailingSource;

    impl MemorySource for FailingSource {
        fn get_memory(&self) -> Result<Option<Memory>> {
            Err(PromptError::Storage("backend down".to_string()))
        }

        fn save_memory(&self, _memory: Memory) -> Result<()> {
            Err(PromptError::Storage("backend down".to_string()))
        }
    }

    #[test]
    fn test_source_errors_propagate() {
        let prompt = MemPrompt::new(FailingSource);
        let err = prompt.complete_prompt(QUESTION).unwrap_err();
        assert!(matches!(err, PromptError::Storage(ref msg) if msg == "backend down"));
        assert!(prompt.save_memory(apples()).is_err());
    }
}
