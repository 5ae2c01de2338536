//! Property tests: board invariants hold across arbitrary command sequences

use proptest::prelude::*;
use taskboard_kanban::{
    AddTask, Board, BoardCommand, BoardStore, Column, GroupBy, GroupChange, GroupSection,
    MoveTask, MoveTaskToGroup, MoveTasksToState, Outcome, SprintId, Task, TaskId, TaskPatch,
    UpdateTask,
};

const STATES: [&str; 4] = ["1", "2", "3", "404"];
const GROUPS: [&str; 4] = ["s1", "s2", "no_sprint", "s404"];
const TASK_POOL: usize = 12;

fn task_id(index: usize) -> TaskId {
    TaskId::from(format!("t{index}"))
}

fn columns(tasks: &[(usize, usize, f64)], group: Option<usize>, placed: &[usize]) -> Vec<Column> {
    STATES[..3]
        .iter()
        .enumerate()
        .map(|(s, state)| {
            Column::new(*state, *state).with_tasks(
                placed
                    .iter()
                    .filter(|i| tasks[**i].0 == s)
                    .filter(|i| group.is_none_or(|g| tasks[**i].1 == g))
                    .map(|i| {
                        let mut task = Task::new(task_id(*i), *state).with_sequence(tasks[*i].2);
                        if let Some(g) = group.filter(|g| *g < 2) {
                            task = task.with_sprint(GROUPS[g]);
                        }
                        task
                    }),
            )
        })
        .collect()
}

/// Tasks t0..t7 spread over three states and, when grouped, three sections
fn board_strategy() -> impl Strategy<Value = Board> {
    (
        any::<bool>(),
        prop::collection::vec((0..3usize, 0..3usize, 0.0..100000.0f64), 8),
        prop::collection::vec(any::<bool>(), 8),
    )
        .prop_map(|(grouped, tasks, present)| {
            let placed: Vec<usize> = (0..8).filter(|i| present[*i]).collect();
            if grouped {
                Board::grouped(
                    GroupBy::Sprint,
                    (0..3)
                        .map(|g| GroupSection::new(GROUPS[g], columns(&tasks, Some(g), &placed)))
                        .collect(),
                )
            } else {
                Board::ungrouped(columns(&tasks, None, &placed))
            }
        })
}

fn sprint_patch(sprint: Option<usize>) -> TaskPatch {
    TaskPatch::new().with_sprint(sprint.map(|g| SprintId::from(GROUPS[g])))
}

fn command_strategy() -> impl Strategy<Value = BoardCommand> {
    let id = 0..TASK_POOL;
    let state = 0..STATES.len();
    let group = 0..GROUPS.len();
    prop_oneof![
        (id.clone(), prop::option::of(0.0..100000.0f64), prop::option::of(prop::option::of(0..3usize)))
            .prop_map(|(i, sequence, sprint)| {
                let mut patch = TaskPatch::new();
                if let Some(sequence) = sequence {
                    patch = patch.with_sequence(sequence);
                }
                let mut op = UpdateTask::new(task_id(i));
                if let Some(sprint) = sprint {
                    patch.sprint_id = sprint_patch(sprint).sprint_id;
                    op = op.with_group_change(GroupChange::new(
                        GroupBy::Sprint,
                        sprint.map(|g| GROUPS[g].into()),
                    ));
                }
                op.with_patch(patch).into()
            }),
        (id.clone(), state.clone(), prop::option::of(0..TASK_POOL))
            .prop_map(|(i, s, after)| {
                let op = MoveTask::new(task_id(i), STATES[s]);
                match after {
                    Some(a) => op.after(task_id(a)).into(),
                    None => op.into(),
                }
            }),
        (id.clone(), state.clone(), group.clone(), prop::option::of(0..TASK_POOL))
            .prop_map(|(i, s, g, before)| {
                let op = MoveTaskToGroup::new(task_id(i), STATES[s], GROUPS[g])
                    .with_patch(sprint_patch(Some(g.min(2))));
                match before {
                    Some(b) => op.before(task_id(b)).into(),
                    None => op.into(),
                }
            }),
        (id.clone(), state.clone(), prop::option::of(0..3usize), 0.0..100000.0f64)
            .prop_map(|(i, s, sprint, sequence)| {
                let mut task = Task::new(task_id(i), STATES[s]).with_sequence(sequence);
                if let Some(g) = sprint.filter(|g| *g < 2) {
                    task = task.with_sprint(GROUPS[g]);
                }
                AddTask::new(task).into()
            }),
        (prop::collection::vec(id, 0..5), state)
            .prop_map(|(ids, s)| {
                MoveTasksToState::new(ids.into_iter().map(task_id), STATES[s]).into()
            }),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(
        board in board_strategy(),
        commands in prop::collection::vec(command_strategy(), 1..40),
    ) {
        let mut store = BoardStore::default();
        let _ = store.initialize_kanban(board);
        prop_assert!(store.verify().is_ok());

        for command in commands {
            let before = store.board().clone();
            let count = store.task_count();
            let revision = store.revision();

            let outcome = store.apply(command.clone());

            // Uniqueness and sort order
            prop_assert!(store.verify().is_ok(), "{:?} broke the board", command);

            // Nothing is lost or duplicated
            let expected = match outcome {
                Outcome::Inserted { .. } => count + 1,
                _ => count,
            };
            prop_assert_eq!(store.task_count(), expected);

            // Misses leave the board exactly as it was
            if outcome.is_ignored() {
                prop_assert_eq!(store.board(), &before);
                prop_assert_eq!(store.revision(), revision);
            }
        }
    }

    #[test]
    fn unknown_ids_never_change_the_board(
        board in board_strategy(),
        state in 0..STATES.len(),
        group in 0..GROUPS.len(),
    ) {
        let mut store = BoardStore::default();
        let _ = store.initialize_kanban(board);
        let before = store.board().clone();

        let ghost = TaskId::from("ghost");
        let outcomes = [
            store.update_task(ghost.clone(), TaskPatch::new().with_sequence(1.0), None),
            store.update_task_position(ghost.clone(), STATES[state], TaskPatch::new()),
            store.update_task_position_by_group(ghost.clone(), STATES[state], GROUPS[group], TaskPatch::new()),
        ];

        for outcome in outcomes {
            prop_assert!(outcome.is_ignored());
        }
        prop_assert_eq!(store.board(), &before);
    }
}
