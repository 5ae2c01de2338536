//! MoveTask command

use super::{relocate, section_key, Neighbors};
use crate::operation::{Execute, Operation};
use crate::outcome::{IgnoreReason, Outcome};
use crate::store::BoardStore;
use crate::types::{StateId, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};

/// Move a task to another column.
///
/// On a grouped board the task stays in its current section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    /// The task to move
    pub id: TaskId,
    /// The destination state
    pub state: StateId,
    /// Fields to merge while moving
    #[serde(default)]
    pub patch: TaskPatch,
    #[serde(flatten)]
    neighbors: Neighbors,
}

impl MoveTask {
    /// Create a MoveTask command (appends to the end of the column)
    pub fn new(id: impl Into<TaskId>, state: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            state: state.into(),
            patch: TaskPatch::default(),
            neighbors: Neighbors::default(),
        }
    }

    pub fn with_patch(mut self, patch: TaskPatch) -> Self {
        self.patch = patch;
        self
    }

    /// Place the task right after `previous`
    pub fn after(mut self, previous: impl Into<TaskId>) -> Self {
        self.neighbors.previous = Some(previous.into());
        self
    }

    /// Place the task right before `next`
    pub fn before(mut self, next: impl Into<TaskId>) -> Self {
        self.neighbors.next = Some(next.into());
        self
    }
}

impl Operation for MoveTask {
    fn verb(&self) -> &'static str {
        "move"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Execute for MoveTask {
    fn execute(self, store: &mut BoardStore) -> Outcome {
        let step = store.config().sequence_step;
        let board = store.board_mut();

        let Some(from) = board.locate(&self.id) else {
            return Outcome::ignored(IgnoreReason::TaskNotFound { id: self.id });
        };
        let Some(column) = board.find_column(from.section, &self.state) else {
            return Outcome::ignored(IgnoreReason::TargetNotFound {
                group: section_key(board, from.section),
                state: self.state,
            });
        };

        relocate(
            board,
            &self.id,
            from,
            (from.section, column),
            &self.patch,
            &self.neighbors,
            step,
        )
    }
}
