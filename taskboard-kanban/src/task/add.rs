//! AddTask command

use crate::config::UnroutablePolicy;
use crate::operation::{Execute, Operation};
use crate::outcome::{IgnoreReason, Outcome};
use crate::store::BoardStore;
use crate::types::{Board, Task};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Insert a newly created task into its column.
///
/// On a grouped board the section is chosen from the task's value for the
/// grouping dimension. A task with no matching section is not inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTask {
    pub task: Task,
}

impl AddTask {
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

impl Operation for AddTask {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Execute for AddTask {
    fn execute(self, store: &mut BoardStore) -> Outcome {
        let policy = store.config().unroutable;
        let board = store.board_mut();
        let task = self.task;

        if board.locate(&task.id).is_some() {
            return Outcome::ignored(IgnoreReason::DuplicateTask { id: task.id });
        }

        let section = match &*board {
            Board::Ungrouped(_) => None,
            Board::Grouped(grouped) => {
                let key = match (task.group_value(grouped.group_by), policy) {
                    (Some(key), _) => Some(key),
                    (None, UnroutablePolicy::Fallback) => grouped.group_by.fallback_key(),
                    (None, UnroutablePolicy::Drop) => None,
                };
                match key.and_then(|k| grouped.section_index(&k)) {
                    Some(section) => Some(section),
                    None => {
                        warn!(task = %task.id, group_by = %grouped.group_by, "task has no group section, not inserted");
                        return Outcome::ignored(IgnoreReason::Unroutable { id: task.id });
                    }
                }
            }
        };

        let Some(column) = board.find_column(section, &task.state_id) else {
            return Outcome::ignored(IgnoreReason::TargetNotFound {
                group: super::section_key(board, section),
                state: task.state_id,
            });
        };

        match board.insert_at(section, column, task) {
            Ok(location) => Outcome::Inserted { location },
            Err(task) => Outcome::ignored(IgnoreReason::TargetNotFound {
                state: task.state_id,
                group: None,
            }),
        }
    }
}
