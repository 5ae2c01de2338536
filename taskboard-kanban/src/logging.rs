//! Logging helpers
//!
//! The crate logs through `tracing` and never installs a subscriber; that is
//! left to the embedding application.

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing values in logs as YAML
///
/// ```ignore
/// use taskboard_kanban::logging::Pretty;
/// tracing::trace!("outcome: {}", Pretty(&outcome));
/// ```
///
/// Outputs YAML with a leading newline, falling back to `Debug` output if
/// serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}
