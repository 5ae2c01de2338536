//! Serializable commands covering every board mutation.
//!
//! The `op` field carries the canonical op string, so a journaled command can
//! be fed back in as-is:
//!
//! ```json
//! { "op": "move task", "id": "t1", "state": "2", "previous": "t7" }
//! ```

use crate::board::Snapshot;
use crate::filter::FilterDimension;
use crate::operation::{Execute, Operation};
use crate::outcome::Outcome;
use crate::store::BoardStore;
use crate::task::{AddTask, MoveTask, MoveTaskToGroup, MoveTasksToState, UpdateTask};
use crate::types::SprintId;
use serde::{Deserialize, Serialize};

/// One board mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum BoardCommand {
    #[serde(rename = "initialize")]
    Initialize(Snapshot),
    #[serde(rename = "update task")]
    UpdateTask(UpdateTask),
    #[serde(rename = "move task")]
    MoveTask(MoveTask),
    #[serde(rename = "regroup task")]
    MoveTaskToGroup(MoveTaskToGroup),
    #[serde(rename = "add task")]
    AddTask(AddTask),
    #[serde(rename = "move tasks")]
    MoveTasksToState(MoveTasksToState),
    #[serde(rename = "set sprint")]
    SetActiveSprint { sprint: SprintId },
    #[serde(rename = "clear filters")]
    ClearFilters,
    #[serde(rename = "select filter")]
    SelectFilter {
        dimension: FilterDimension,
        #[serde(default)]
        values: Vec<String>,
    },
}

impl Operation for BoardCommand {
    fn verb(&self) -> &'static str {
        match self {
            BoardCommand::Initialize(op) => op.verb(),
            BoardCommand::UpdateTask(op) => op.verb(),
            BoardCommand::MoveTask(op) => op.verb(),
            BoardCommand::MoveTaskToGroup(op) => op.verb(),
            BoardCommand::AddTask(op) => op.verb(),
            BoardCommand::MoveTasksToState(op) => op.verb(),
            BoardCommand::SetActiveSprint { .. } => "set",
            BoardCommand::ClearFilters => "clear",
            BoardCommand::SelectFilter { .. } => "select",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            BoardCommand::Initialize(op) => op.noun(),
            BoardCommand::UpdateTask(op) => op.noun(),
            BoardCommand::MoveTask(op) => op.noun(),
            BoardCommand::MoveTaskToGroup(op) => op.noun(),
            BoardCommand::AddTask(op) => op.noun(),
            BoardCommand::MoveTasksToState(op) => op.noun(),
            BoardCommand::SetActiveSprint { .. } => "sprint",
            BoardCommand::ClearFilters => "filters",
            BoardCommand::SelectFilter { .. } => "filter",
        }
    }
}

impl Execute for BoardCommand {
    fn execute(self, store: &mut BoardStore) -> Outcome {
        match self {
            BoardCommand::Initialize(op) => op.execute(store),
            BoardCommand::UpdateTask(op) => op.execute(store),
            BoardCommand::MoveTask(op) => op.execute(store),
            BoardCommand::MoveTaskToGroup(op) => op.execute(store),
            BoardCommand::AddTask(op) => op.execute(store),
            BoardCommand::MoveTasksToState(op) => op.execute(store),
            BoardCommand::SetActiveSprint { sprint } => {
                store.filters_mut().set_active_sprint(&sprint);
                Outcome::Replaced
            }
            BoardCommand::ClearFilters => {
                store.filters_mut().clear();
                Outcome::Replaced
            }
            BoardCommand::SelectFilter { dimension, values } => {
                store.filters_mut().select(dimension, values);
                Outcome::Replaced
            }
        }
    }
}

macro_rules! impl_from_op {
    ($($op:ident),* $(,)?) => {
        $(
            impl From<$op> for BoardCommand {
                fn from(op: $op) -> Self {
                    BoardCommand::$op(op)
                }
            }
        )*
    };
}

impl_from_op!(UpdateTask, MoveTask, MoveTaskToGroup, AddTask, MoveTasksToState);

impl From<Snapshot> for BoardCommand {
    fn from(snapshot: Snapshot) -> Self {
        BoardCommand::Initialize(snapshot)
    }
}
