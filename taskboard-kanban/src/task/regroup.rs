//! MoveTaskToGroup command

use super::{relocate, Neighbors};
use crate::operation::{Execute, Operation};
use crate::outcome::{IgnoreReason, Outcome, Shape};
use crate::store::BoardStore;
use crate::types::{GroupKey, StateId, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};

/// Move a task to a column inside a given group section, from wherever it
/// is on the board. Only valid on grouped boards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskToGroup {
    pub id: TaskId,
    pub state: StateId,
    pub group: GroupKey,
    #[serde(default)]
    pub patch: TaskPatch,
    #[serde(flatten)]
    neighbors: Neighbors,
}

impl MoveTaskToGroup {
    pub fn new(
        id: impl Into<TaskId>,
        state: impl Into<StateId>,
        group: impl Into<GroupKey>,
    ) -> Self {
        Self {
            id: id.into(),
            state: state.into(),
            group: group.into(),
            patch: TaskPatch::default(),
            neighbors: Neighbors::default(),
        }
    }

    pub fn with_patch(mut self, patch: TaskPatch) -> Self {
        self.patch = patch;
        self
    }

    pub fn after(mut self, previous: impl Into<TaskId>) -> Self {
        self.neighbors.previous = Some(previous.into());
        self
    }

    pub fn before(mut self, next: impl Into<TaskId>) -> Self {
        self.neighbors.next = Some(next.into());
        self
    }
}

impl Operation for MoveTaskToGroup {
    fn verb(&self) -> &'static str {
        "regroup"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Execute for MoveTaskToGroup {
    fn execute(self, store: &mut BoardStore) -> Outcome {
        let step = store.config().sequence_step;
        let board = store.board_mut();

        if !board.is_grouped() {
            return Outcome::ignored(IgnoreReason::ShapeMismatch {
                expected: Shape::Grouped,
            });
        }
        let Some(from) = board.locate(&self.id) else {
            return Outcome::ignored(IgnoreReason::TaskNotFound { id: self.id });
        };
        let Some((section, column)) = board
            .find_section(&self.group)
            .and_then(|s| board.find_column(Some(s), &self.state).map(|c| (s, c)))
        else {
            return Outcome::ignored(IgnoreReason::TargetNotFound {
                state: self.state,
                group: Some(self.group),
            });
        };

        relocate(
            board,
            &self.id,
            from,
            (Some(section), column),
            &self.patch,
            &self.neighbors,
            step,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::fixtures::{flat_store, sprint_store};
    use crate::types::SprintId;

    #[test]
    fn test_op_string() {
        assert_eq!(MoveTaskToGroup::new("a", "1", "s2").op_string(), "regroup task");
    }

    #[test]
    fn test_cross_group_move() {
        let mut store = sprint_store();
        let count = store.task_count();
        let outcome = store.apply(
            MoveTaskToGroup::new("a", "2", "s2")
                .with_patch(TaskPatch::new().with_sprint(Some(SprintId::from("s2")))),
        );

        let Outcome::Relocated { from, to } = outcome else {
            panic!("expected relocation, got {outcome:?}");
        };
        assert_eq!(from.section, Some(0));
        assert_eq!(to.section, Some(1));
        assert_eq!(to.column, 1);
        assert_eq!(store.task_count(), count);

        let task = store.find_task(&TaskId::from("a")).unwrap();
        assert_eq!(task.state_id, StateId::from("2"));
        assert_eq!(task.sprint_id, Some(SprintId::from("s2")));
        assert!(store.board().verify().is_ok());
    }

    #[test]
    fn test_place_after_neighbor_in_other_group() {
        let mut store = sprint_store();
        let _ = store.apply(MoveTaskToGroup::new("a", "1", "s2").after("c"));

        let task = store.find_task(&TaskId::from("a")).unwrap();
        assert_eq!(task.sequence, 20000.0);
    }

    #[test]
    fn test_cross_group_move_keeps_sequence() {
        let mut store = sprint_store();
        let outcome = store.apply(MoveTaskToGroup::new("a", "1", "s2"));
        assert!(matches!(outcome, Outcome::Relocated { .. }));

        let task = store.find_task(&TaskId::from("a")).unwrap();
        assert_eq!(task.sequence, 10000.0);
        let ids: Vec<_> = store
            .board()
            .column_at(Some(1), 0)
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_missing_section_keeps_task() {
        let mut store = sprint_store();
        let before = store.board().clone();
        let outcome = store.apply(MoveTaskToGroup::new("a", "1", "s9"));

        assert_eq!(
            outcome.reason(),
            Some(&IgnoreReason::TargetNotFound {
                state: StateId::from("1"),
                group: Some(GroupKey::from("s9")),
            })
        );
        assert_eq!(store.board(), &before);
    }

    #[test]
    fn test_flat_board_is_shape_mismatch() {
        let mut store = flat_store();
        let outcome = store.apply(MoveTaskToGroup::new("t1", "2", "s1"));
        assert_eq!(
            outcome.reason(),
            Some(&IgnoreReason::ShapeMismatch { expected: Shape::Grouped })
        );
    }

    #[test]
    fn test_unknown_task_is_ignored() {
        let mut store = sprint_store();
        let revision = store.revision();
        let outcome = store.apply(MoveTaskToGroup::new("zz", "1", "s2"));
        assert!(outcome.is_ignored());
        assert_eq!(store.revision(), revision);
    }
}
