//! Engine configuration
//!
//! Loaded from YAML; every field has a default so an empty document is a
//! valid config.
//!
//! ```yaml
//! sequence_step: 10000
//! unroutable: fallback
//! journal_capacity: 256
//! writer_queue: 64
//! ```

use crate::error::{KanbanError, Result};
use crate::types::sequence::DEFAULT_SEQUENCE_STEP;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a task whose grouping field is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnroutablePolicy {
    /// Route to the dimension's "no value" section when the board has one
    #[default]
    Fallback,
    /// Drop the task until the next full reload
    Drop,
}

/// Configuration for a board store and its writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Gap between consecutive appended tasks
    pub sequence_step: f64,
    /// Routing for tasks with an empty grouping field
    pub unroutable: UnroutablePolicy,
    /// Maximum number of journal entries kept by the processor
    pub journal_capacity: usize,
    /// Command queue capacity of the board writer
    pub writer_queue: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sequence_step: DEFAULT_SEQUENCE_STEP,
            unroutable: UnroutablePolicy::Fallback,
            journal_capacity: 256,
            writer_queue: 64,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Set the sequence step
    pub fn with_sequence_step(mut self, step: f64) -> Self {
        self.sequence_step = step;
        self
    }

    /// Set the unroutable policy
    pub fn with_unroutable(mut self, policy: UnroutablePolicy) -> Self {
        self.unroutable = policy;
        self
    }

    /// Set the journal capacity
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !self.sequence_step.is_finite() || self.sequence_step <= 0.0 {
            return Err(KanbanError::invalid_value(
                "sequence_step",
                format!("must be a positive number, got {}", self.sequence_step),
            ));
        }
        if self.journal_capacity == 0 {
            return Err(KanbanError::invalid_value("journal_capacity", "must be at least 1"));
        }
        if self.writer_queue == 0 {
            return Err(KanbanError::invalid_value("writer_queue", "must be at least 1"));
        }
        Ok(())
    }
}
