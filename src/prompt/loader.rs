//! Prompt Loader - Load and cache prompt templates from files
//!
//! Templates live as `<name>.txt` files in a single directory. Each one is
//! parsed into a `PromptTemplate` on first load and kept in memory afterwards.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::debug;

use super::template::PromptTemplate;
use crate::error::{PromptError, Result};

const TEMPLATE_EXTENSION: &str = "txt";

/// Loads and caches prompt templates from a directory
pub struct PromptLoader {
    /// Base directory containing template files
    templates_dir: PathBuf,
    /// Parsed templates keyed by name
    cache: RwLock<HashMap<String, PromptTemplate>>,
}

impl PromptLoader {
    /// Create a new PromptLoader with the given templates directory
    pub fn new(templates_dir: impl AsRef<Path>) -> Self {
        Self {
            templates_dir: templates_dir.as_ref().to_path_buf(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load a template by name, reading it from disk on the first call
    ///
    /// # Errors
    /// `TemplateNotFound` if `<name>.txt` does not exist
    pub fn load(&self, name: &str) -> Result<PromptTemplate> {
        if let Some(template) = self.get(name) {
            return Ok(template);
        }

        let path = self.template_path(name);
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PromptError::TemplateNotFound(name.to_string()),
            _ => PromptError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to load template '{}' from {:?}: {}", name, path, e),
            )),
        })?;
        debug!("Loaded template '{}' from {}", name, path.display());

        let template = PromptTemplate::new(content);
        self.cache
            .write()
            .map_err(|e| PromptError::Storage(format!("Failed to acquire write lock: {}", e)))?
            .insert(name.to_string(), template.clone());

        Ok(template)
    }

    /// Get a cached template without touching the disk
    pub fn get(&self, name: &str) -> Option<PromptTemplate> {
        let cache = self.cache.read().ok()?;
        cache.get(name).cloned()
    }

    /// Check if a template file exists
    pub fn exists(&self, name: &str) -> bool {
        self.template_path(name).exists()
    }

    fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
    }

    /// List template names available in the directory, sorted
    ///
    /// A missing directory lists as empty.
    pub fn list_available(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.templates_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut templates = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION)
                && let Some(stem) = path.file_stem()
                && let Some(name) = stem.to_str()
            {
                templates.push(name.to_string());
            }
        }

        templates.sort();
        Ok(templates)
    }

    /// Load every available template into the cache
    pub fn preload_all(&self) -> Result<usize> {
        let available = self.list_available()?;
        for name in &available {
            self.load(name)?;
        }
        Ok(available.len())
    }

    /// Drop all cached templates
    pub fn clear_cache(&self) -> Result<()> {
        self.cache
            .write()
            .map_err(|e| PromptError::Storage(format!("Failed to acquire write lock: {}", e)))?
            .clear();
        Ok(())
    }

    /// Get the templates directory path
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }
}
