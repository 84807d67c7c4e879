//! Registry mapping annotation keys to their processors

use std::collections::HashMap;

use thiserror::Error;

use crate::processor::RichTextProcessor;

/// Errors that can occur during processor registration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessorError {
    /// A processor is already registered under this key
    #[error("duplicate processor registration: {key}")]
    Duplicate { key: String },
}

/// Registry of processors keyed by their unique annotation key
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: HashMap<String, Box<dyn RichTextProcessor>>,
}

impl ProcessorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under its own key.
    ///
    /// Registration of a duplicate key is rejected rather than overwriting
    /// the existing processor.
    pub fn register(&mut self, processor: Box<dyn RichTextProcessor>) -> Result<(), ProcessorError> {
        let key = processor.key().to_string();
        if self.processors.contains_key(&key) {
            return Err(ProcessorError::Duplicate { key });
        }
        self.processors.insert(key, processor);
        Ok(())
    }

    /// Get a mutable reference to the processor for a key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Box<dyn RichTextProcessor>> {
        self.processors.get_mut(key)
    }

    /// Check if a key has a registered processor
    pub fn contains(&self, key: &str) -> bool {
        self.processors.contains_key(key)
    }

    /// All registered keys
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.processors.keys().map(|s| s.as_str())
    }

    /// Number of registered processors
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}
