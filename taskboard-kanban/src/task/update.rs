//! UpdateTask command

use crate::config::UnroutablePolicy;
use crate::operation::{Execute, Operation};
use crate::outcome::{IgnoreReason, Outcome};
use crate::store::BoardStore;
use crate::types::{Board, GroupBy, GroupKey, Location, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};

/// A change to one grouping dimension carried alongside a patch.
///
/// `target` is the new group value; `None` means the field was cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChange {
    pub dimension: GroupBy,
    #[serde(default)]
    pub target: Option<GroupKey>,
}

impl GroupChange {
    pub fn new(dimension: GroupBy, target: Option<GroupKey>) -> Self {
        Self { dimension, target }
    }

    /// Change to a concrete group value
    pub fn to(dimension: GroupBy, target: impl Into<GroupKey>) -> Self {
        Self::new(dimension, Some(target.into()))
    }

    /// The field was cleared
    pub fn cleared(dimension: GroupBy) -> Self {
        Self::new(dimension, None)
    }
}

/// Merge a patch into a task wherever it sits.
///
/// When `group_change` names the dimension the board is grouped by, the task
/// is moved to the matching section instead of being merged in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub id: TaskId,
    #[serde(default)]
    pub patch: TaskPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_change: Option<GroupChange>,
}

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            patch: TaskPatch::default(),
            group_change: None,
        }
    }

    pub fn with_patch(mut self, patch: TaskPatch) -> Self {
        self.patch = patch;
        self
    }

    pub fn with_group_change(mut self, change: GroupChange) -> Self {
        self.group_change = Some(change);
        self
    }

    /// The group change, if it targets the board's active grouping
    fn relocation<'a>(&'a self, board: &Board) -> Option<&'a GroupChange> {
        self.group_change
            .as_ref()
            .filter(|change| board.group_by() == Some(change.dimension))
    }
}

impl Operation for UpdateTask {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Execute for UpdateTask {
    fn execute(self, store: &mut BoardStore) -> Outcome {
        let policy = store.config().unroutable;
        let board = store.board_mut();

        let Some(from) = board.locate(&self.id) else {
            return Outcome::ignored(IgnoreReason::TaskNotFound { id: self.id });
        };

        match self.relocation(board) {
            Some(change) => regroup(board, &self.id, from, change, &self.patch, policy),
            None => merge(board, from, &self.patch),
        }
    }
}

/// Merge fields in place, re-sorting the column if the sequence moved.
///
/// The task never changes column here, even when the patch sets `state_id`.
/// Column changes go through the move operations.
fn merge(board: &mut Board, at: Location, patch: &TaskPatch) -> Outcome {
    let Some(task) = board.task_at_mut(at) else {
        return Outcome::Merged {
            location: at,
            changed: false,
        };
    };
    let id = task.id.clone();
    let before = task.sequence;
    let changed = patch.apply(task);
    let resequenced = task.sequence.total_cmp(&before).is_ne();

    let mut location = at;
    if resequenced {
        if let Some(column) = board.column_at_mut(at.section, at.column) {
            column.sort();
            if let Some(index) = column.position_of(&id) {
                location.index = index;
            }
        }
    }

    Outcome::Merged { location, changed }
}

/// Move the task into the section named by the change, keeping its sequence.
/// A task already in the resolved column is merged in place.
fn regroup(
    board: &mut Board,
    id: &TaskId,
    from: Location,
    change: &GroupChange,
    patch: &TaskPatch,
    policy: UnroutablePolicy,
) -> Outcome {
    let key = match (&change.target, policy) {
        (Some(key), _) => Some(key.clone()),
        (None, UnroutablePolicy::Fallback) => change.dimension.fallback_key(),
        (None, UnroutablePolicy::Drop) => None,
    };
    let Some(section) = key.as_ref().and_then(|k| board.find_section(k)) else {
        return Outcome::ignored(IgnoreReason::Unroutable { id: id.clone() });
    };

    let state = match &patch.state_id {
        Some(state) => state.clone(),
        None => match board.task_at(from) {
            Some(task) => task.state_id.clone(),
            None => return Outcome::ignored(IgnoreReason::TaskNotFound { id: id.clone() }),
        },
    };
    let Some(column) = board.find_column(Some(section), &state) else {
        return Outcome::ignored(IgnoreReason::TargetNotFound { state, group: key });
    };
    if from.section == Some(section) && from.column == column {
        return merge(board, from, patch);
    }

    let Some(mut task) = board.take_at(from) else {
        return Outcome::ignored(IgnoreReason::TaskNotFound { id: id.clone() });
    };
    patch.apply(&mut task);
    task.state_id = state;

    match board.insert_at(Some(section), column, task) {
        Ok(to) => Outcome::Relocated { from, to },
        Err(task) => {
            let state = task.state_id.clone();
            let _ = board.insert_at(from.section, from.column, task);
            Outcome::ignored(IgnoreReason::TargetNotFound { state, group: key })
        }
    }
}
