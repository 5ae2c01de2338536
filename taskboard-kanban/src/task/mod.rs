//! Task operations

mod add;
mod bulk;
mod mv;
mod regroup;
mod update;

pub use add::AddTask;
pub use bulk::MoveTasksToState;
pub use mv::MoveTask;
pub use regroup::MoveTaskToGroup;
pub use update::{GroupChange, UpdateTask};

use crate::outcome::{IgnoreReason, Outcome};
use crate::types::{sequence, Board, GroupKey, Location, TaskId, TaskPatch};

/// Neighbors a moved task should land between
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Neighbors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<TaskId>,
}

impl Neighbors {
    fn sequence_of(board: &Board, id: &Option<TaskId>) -> Result<Option<f64>, IgnoreReason> {
        match id {
            None => Ok(None),
            Some(id) => board
                .find_task(id)
                .map(|t| Some(t.sequence))
                .ok_or_else(|| IgnoreReason::NeighborNotFound { id: id.clone() }),
        }
    }
}

/// Key of a section by index
pub(crate) fn section_key(board: &Board, section: Option<usize>) -> Option<GroupKey> {
    match (board, section) {
        (Board::Grouped(g), Some(s)) => g.sections.get(s).map(|sec| sec.group_key.clone()),
        _ => None,
    }
}

/// Move the task at `from` into the given column, merging `patch`.
///
/// The destination column must already be resolved. The sequence comes from
/// the patch if set, else from the neighbors; with neither the task keeps the
/// sequence it had. The board is only touched once every lookup has succeeded.
pub(crate) fn relocate(
    board: &mut Board,
    id: &TaskId,
    from: Location,
    target: (Option<usize>, usize),
    patch: &TaskPatch,
    neighbors: &Neighbors,
    step: f64,
) -> Outcome {
    let (section, column) = target;
    let Some(target_state) = board.column_at(section, column).map(|c| c.id.clone()) else {
        return Outcome::ignored(IgnoreReason::TaskNotFound { id: id.clone() });
    };

    let sequence = match patch.sequence {
        Some(sequence) => Some(sequence),
        None => {
            let previous = match Neighbors::sequence_of(board, &neighbors.previous) {
                Ok(s) => s,
                Err(reason) => return Outcome::ignored(reason),
            };
            let next = match Neighbors::sequence_of(board, &neighbors.next) {
                Ok(s) => s,
                Err(reason) => return Outcome::ignored(reason),
            };
            sequence::between(previous, next, step)
        }
    };

    let Some(mut task) = board.take_at(from) else {
        return Outcome::ignored(IgnoreReason::TaskNotFound { id: id.clone() });
    };
    patch.apply(&mut task);
    task.state_id = target_state.clone();
    if let Some(sequence) = sequence {
        task.sequence = sequence;
    }

    match board.insert_at(section, column, task) {
        Ok(to) => Outcome::Relocated { from, to },
        Err(task) => {
            // Put it back where it was so nothing is lost
            let _ = board.insert_at(from.section, from.column, task);
            Outcome::ignored(IgnoreReason::TargetNotFound {
                state: target_state,
                group: None,
            })
        }
    }
}
