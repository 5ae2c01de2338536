//! MoveTasksToState command

use crate::operation::{Execute, Operation};
use crate::outcome::Outcome;
use crate::store::BoardStore;
use crate::types::{sequence, StateId, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Move several tasks to the end of one state, in the given order.
///
/// Sequences continue from the highest sequence already in that state
/// anywhere on the board. On a grouped board each task stays in its own
/// section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTasksToState {
    pub ids: Vec<TaskId>,
    pub state: StateId,
}

impl MoveTasksToState {
    /// Create the command. Repeated ids are moved once.
    pub fn new(ids: impl IntoIterator<Item = TaskId>, state: impl Into<StateId>) -> Self {
        Self {
            ids: unique(ids),
            state: state.into(),
        }
    }
}

/// First occurrence of each id, in order
fn unique(ids: impl IntoIterator<Item = TaskId>) -> Vec<TaskId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

impl Operation for MoveTasksToState {
    fn verb(&self) -> &'static str {
        "move"
    }

    fn noun(&self) -> &'static str {
        "tasks"
    }
}

impl Execute for MoveTasksToState {
    fn execute(self, store: &mut BoardStore) -> Outcome {
        let step = store.config().sequence_step;
        let board = store.board_mut();

        let mut next = sequence::after_last(
            board
                .columns()
                .filter(|(_, column)| column.id == self.state)
                .flat_map(|(_, column)| column.tasks.iter()),
            step,
        );

        let mut moved = Vec::new();
        let mut missing = Vec::new();
        let mut skipped = Vec::new();

        // Commands decoded from JSON bypass `new`
        for id in unique(self.ids) {
            let Some(from) = board.locate(&id) else {
                missing.push(id);
                continue;
            };
            let Some(column) = board.find_column(from.section, &self.state) else {
                skipped.push(id);
                continue;
            };
            let Some(mut task) = board.take_at(from) else {
                missing.push(id);
                continue;
            };

            task.state_id = self.state.clone();
            task.sequence = next;
            next += step;

            match board.insert_at(from.section, column, task) {
                Ok(_) => moved.push(id),
                Err(task) => {
                    let _ = board.insert_at(from.section, from.column, task);
                    skipped.push(id);
                }
            }
        }

        Outcome::Bulk {
            moved,
            missing,
            skipped,
        }
    }
}
