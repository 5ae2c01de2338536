//! Explicit results of board mutations.
//!
//! A mutation that cannot be applied leaves the board untouched and says why.
//! Nothing here is an error by default; [`Outcome::into_result`] turns an
//! ignored outcome into one for callers that want strictness.

use crate::error::{KanbanError, Result};
use crate::types::{GroupKey, Location, StateId, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board shape an operation needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Grouped,
    Ungrouped,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Grouped => f.write_str("grouped"),
            Shape::Ungrouped => f.write_str("ungrouped"),
        }
    }
}

/// Why a mutation left the board unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The task is not on the board
    TaskNotFound { id: TaskId },
    /// The destination column (or its section) does not exist
    TargetNotFound {
        state: StateId,
        #[serde(skip_serializing_if = "Option::is_none")]
        group: Option<GroupKey>,
    },
    /// No group section matches the task
    Unroutable { id: TaskId },
    /// The board has the other shape
    ShapeMismatch { expected: Shape },
    /// A task with this id is already on the board
    DuplicateTask { id: TaskId },
    /// A placement neighbor is not on the board
    NeighborNotFound { id: TaskId },
}

impl From<IgnoreReason> for KanbanError {
    fn from(reason: IgnoreReason) -> Self {
        match reason {
            IgnoreReason::TaskNotFound { id } => KanbanError::TaskNotFound { id: id.to_string() },
            IgnoreReason::TargetNotFound { state, group } => KanbanError::ColumnNotFound {
                state: state.to_string(),
                group: group.map(|g| g.to_string()),
            },
            IgnoreReason::Unroutable { id } => KanbanError::Unroutable { id: id.to_string() },
            IgnoreReason::ShapeMismatch { expected } => KanbanError::ShapeMismatch {
                expected: expected.to_string(),
            },
            IgnoreReason::DuplicateTask { id } => KanbanError::DuplicateTask { id: id.to_string() },
            IgnoreReason::NeighborNotFound { id } => {
                KanbanError::NeighborNotFound { id: id.to_string() }
            }
        }
    }
}

/// The result of one mutation
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A top-level slice (catalog, board, selector or filters) was replaced
    Replaced,
    /// Fields were merged into the task where it sits
    Merged { location: Location, changed: bool },
    /// The task was removed from one column and inserted into another
    Relocated { from: Location, to: Location },
    /// A new task was inserted
    Inserted { location: Location },
    /// Several tasks were moved to one state
    Bulk {
        moved: Vec<TaskId>,
        missing: Vec<TaskId>,
        skipped: Vec<TaskId>,
    },
    /// Nothing happened
    Ignored { reason: IgnoreReason },
}

impl Outcome {
    /// An ignored outcome
    pub fn ignored(reason: IgnoreReason) -> Self {
        Outcome::Ignored { reason }
    }

    /// Check if the mutation was applied
    pub fn is_applied(&self) -> bool {
        !self.is_ignored()
    }

    /// Check if the mutation was ignored
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored { .. })
    }

    /// Why the mutation was ignored, if it was
    pub fn reason(&self) -> Option<&IgnoreReason> {
        match self {
            Outcome::Ignored { reason } => Some(reason),
            _ => None,
        }
    }

    /// Check if the store's state actually changed
    pub fn changed(&self) -> bool {
        match self {
            Outcome::Replaced | Outcome::Relocated { .. } | Outcome::Inserted { .. } => true,
            Outcome::Merged { changed, .. } => *changed,
            Outcome::Bulk { moved, .. } => !moved.is_empty(),
            Outcome::Ignored { .. } => false,
        }
    }

    /// Where the affected task ended up, for single-task mutations
    pub fn location(&self) -> Option<Location> {
        match self {
            Outcome::Merged { location, .. } | Outcome::Inserted { location } => Some(*location),
            Outcome::Relocated { to, .. } => Some(*to),
            _ => None,
        }
    }

    /// Extract the result (Ok, or Err for ignored outcomes)
    pub fn into_result(self) -> Result<Outcome> {
        match self {
            Outcome::Ignored { reason } => Err(reason.into()),
            outcome => Ok(outcome),
        }
    }
}
