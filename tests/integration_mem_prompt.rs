//! Memory-augmented prompt integration tests
//!
//! Exercises templates loaded from disk and prompts completed from a
//! JSONL memory file through the public API.

use std::collections::HashMap;
use std::fs;

use memprompt::error::{PromptError, Result};
use memprompt::memory::{DEFAULT_MEM_PROMPT_TEMPLATE, JsonlMemory, MemPrompt, MemoryItem, MemorySource};
use memprompt::{PromptLoader, PromptTemplate};
use tempfile::TempDir;

const QUESTION: &str = "How many apples Mary and John have together?";

/// Integration test: introspect a template from disk, then fill it
#[test]
fn test_loaded_template_introspect_then_fill() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("greeting.txt"), "Hello, {name}! Today is {day}.")?;

    let loader = PromptLoader::new(temp_dir.path());
    let template = loader.load("greeting")?;
    assert_eq!(template.expected_variables(), ["name".to_string(), "day".to_string()]);

    let values: HashMap<String, String> = template
        .expected_variables()
        .iter()
        .map(|name| (name.clone(), name.to_uppercase()))
        .collect();
    assert_eq!(template.fill_variables(&values)?, "Hello, NAME! Today is DAY.");

    Ok(())
}

/// Integration test: validation failures name the offending variables
#[test]
fn test_fill_validation_errors() {
    let template = PromptTemplate::new("Hello, {name}! Today is {day}.");

    let missing = template.fill([("name", "John")]).unwrap_err();
    assert!(matches!(missing, PromptError::MissingVariable(_)));
    assert!(missing.to_string().contains("day"));

    let extra = template
        .fill([("name", "John"), ("day", "Monday"), ("extra", "Extra value")])
        .unwrap_err();
    assert!(matches!(extra, PromptError::UnexpectedVariable(_)));
    assert!(extra.to_string().contains("extra"));
}

/// Integration test: question passes through until memory is recorded
#[test]
fn test_jsonl_memory_prompt_flow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let memory = JsonlMemory::new(temp_dir.path().join("memory.jsonl"));
    let prompt = MemPrompt::new(memory);

    assert_eq!(prompt.complete_prompt(QUESTION)?, QUESTION);

    prompt
        .source()
        .append(&MemoryItem::new("How many apples does Mary have?", "Mary has two apples"))?;
    prompt
        .source()
        .append(&MemoryItem::new("How many apples does John have?", "John has four apples"))?;

    let completed = prompt.complete_prompt(QUESTION)?;
    assert!(completed.starts_with("In order to answer the CURRENT_QUESTION"));
    assert!(completed.contains(
        "HISTORY:\n\nquestion: How many apples does Mary have?\nanswer: Mary has two apples\n\n\
         question: How many apples does John have?\nanswer: John has four apples\n\n--------\n"
    ));
    assert!(completed.ends_with(&format!("CURRENT_QUESTION: {}\nCURRENT_ANSWER: ", QUESTION)));

    Ok(())
}

/// Integration test: memory persists across source instances and honors limits
#[test]
fn test_jsonl_memory_persistence_with_limit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("memory.jsonl");

    {
        let memory = JsonlMemory::new(&path);
        memory.save_memory(vec![
            MemoryItem::new("q1", "a1"),
            MemoryItem::new("q2", "a2"),
            MemoryItem::new("q3", "a3"),
        ])?;
    }

    let prompt = MemPrompt::with_template(
        JsonlMemory::new(&path).with_limit(1),
        "{history_section}=> {current_question}",
    );
    assert_eq!(prompt.complete_prompt("q4")?, "question: q3\nanswer: a3\n=> q4");

    prompt.save_memory(Vec::new())?;
    assert_eq!(prompt.complete_prompt("q4")?, "q4");

    Ok(())
}

/// Integration test: a boxed source chosen at runtime works the same way
#[test]
fn test_dynamic_memory_source() -> Result<()> {
    let source: Box<dyn MemorySource> = Box::new(memprompt::memory::InMemorySource::with_memory(vec![
        MemoryItem::new("q", "a"),
    ]));
    let prompt = MemPrompt::with_template(source, DEFAULT_MEM_PROMPT_TEMPLATE);

    let completed = prompt.complete_prompt("next?")?;
    assert!(completed.contains("question: q\nanswer: a\n\n--------"));

    Ok(())
}
