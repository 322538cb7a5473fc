//! Memory source trait and the in-process variants.

use std::sync::RwLock;

use super::item::Memory;
use crate::error::{PromptError, Result};

/// Where a `MemPrompt` fetches and stores its question/answer history.
///
/// Errors from a source are returned to the caller untouched; nothing above
/// this trait retries or falls back.
pub trait MemorySource: Send + Sync {
    /// Fetch the current memory. `None` means no memory is available.
    fn get_memory(&self) -> Result<Option<Memory>>;

    /// Replace the memory seen by later `get_memory` calls.
    fn save_memory(&self, memory: Memory) -> Result<()>;
}

impl<S: MemorySource + ?Sized> MemorySource for Box<S> {
    fn get_memory(&self) -> Result<Option<Memory>> {
        (**self).get_memory()
    }

    fn save_memory(&self, memory: Memory) -> Result<()> {
        (**self).save_memory(memory)
    }
}

/// Memory held in process.
#[derive(Debug, Default)]
pub struct InMemorySource {
    memory: RwLock<Option<Memory>>,
}

impl InMemorySource {
    /// Start with no memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given memory.
    pub fn with_memory(memory: Memory) -> Self {
        Self {
            memory: RwLock::new(Some(memory)),
        }
    }
}

impl MemorySource for InMemorySource {
    fn get_memory(&self) -> Result<Option<Memory>> {
        let memory = self.memory.read().map_err(|e| PromptError::Storage(e.to_string()))?;
        Ok(memory.clone())
    }

    fn save_memory(&self, memory: Memory) -> Result<()> {
        let mut current = self.memory.write().map_err(|e| PromptError::Storage(e.to_string()))?;
        *current = Some(memory);
        Ok(())
    }
}

/// A source that never remembers anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMemory;

impl MemorySource for NoMemory {
    fn get_memory(&self) -> Result<Option<Memory>> {
        Ok(None)
    }

    fn save_memory(&self, _memory: Memory) -> Result<()> {
        Ok(())
    }
}
