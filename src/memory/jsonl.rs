//! JSONL-backed memory: one `MemoryItem` per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::item::{Memory, MemoryItem};
use super::source::MemorySource;
use crate::error::{PromptError, Result};

/// Memory persisted to a JSONL file.
///
/// A missing file reads as absent memory. With a limit set, only the most
/// recent `limit` items are returned.
#[derive(Debug, Clone)]
pub struct JsonlMemory {
    path: PathBuf,
    limit: Option<usize>,
}

impl JsonlMemory {
    /// Use the file at `path`. Nothing is created until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            limit: None,
        }
    }

    /// Only return the last `limit` items from `get_memory`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one more exchange at the end of the file.
    pub fn append(&self, item: &MemoryItem) -> Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(item)?)?;
        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn read_all(&self) -> Result<Option<Memory>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut items = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let item: MemoryItem = serde_json::from_str(&line).map_err(|e| {
                PromptError::Storage(format!("{}:{}: {}", self.path.display(), index + 1, e))
            })?;
            items.push(item);
        }
        Ok(Some(items))
    }
}

impl MemorySource for JsonlMemory {
    fn get_memory(&self) -> Result<Option<Memory>> {
        let Some(mut items) = self.read_all()? else {
            return Ok(None);
        };

        if let Some(limit) = self.limit
            && items.len() > limit
        {
            let excess = items.len() - limit;
            items.drain(..excess);
        }

        debug!("Read {} memory item(s) from {}", items.len(), self.path.display());
        Ok(Some(items))
    }

    fn save_memory(&self, memory: Memory) -> Result<()> {
        self.ensure_parent()?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for item in &memory {
            writeln!(writer, "{}", serde_json::to_string(item)?)?;
        }
        writer.flush()?;
        debug!("Saved {} memory item(s) to {}", memory.len(), self.path.display());
        Ok(())
    }
}
