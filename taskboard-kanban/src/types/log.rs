//! Journal entries for applied board commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record of one command applied to the board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique ID for this entry (ULID format)
    pub id: String,

    /// When the command was applied
    pub timestamp: DateTime<Utc>,

    /// Canonical op string (e.g., "add task", "move task")
    pub op: String,

    /// The command as submitted
    pub input: Value,

    /// The outcome
    pub output: Value,

    /// Board revision after the command
    pub revision: u64,

    /// How long the command took (microseconds)
    pub duration_us: u64,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(
        op: impl Into<String>,
        input: Value,
        output: Value,
        revision: u64,
        duration_us: u64,
    ) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            revision,
            duration_us,
        }
    }
}
