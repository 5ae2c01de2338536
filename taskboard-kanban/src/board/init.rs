//! Snapshot loads: wholesale replacement of one top-level slice

use crate::operation::{Execute, Operation};
use crate::outcome::Outcome;
use crate::store::BoardStore;
use crate::types::{Board, Estimate, GroupBy, Label, Member, Priority, Sprint, WorkflowState};
use serde::{Deserialize, Serialize};

/// One slice of board state, as fetched from the API.
///
/// No validation and no merging: the new value replaces the old one. A loaded
/// board is re-sorted so every column starts out ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slice", content = "data", rename_all = "snake_case")]
pub enum Snapshot {
    States(Vec<WorkflowState>),
    Members(Vec<Member>),
    Priorities(Vec<Priority>),
    Sprints(Vec<Sprint>),
    Estimates(Vec<Estimate>),
    Labels(Vec<Label>),
    Kanban(Board),
    GroupBy(Option<GroupBy>),
}

impl Operation for Snapshot {
    fn verb(&self) -> &'static str {
        "initialize"
    }

    fn noun(&self) -> &'static str {
        match self {
            Snapshot::States(_) => "states",
            Snapshot::Members(_) => "members",
            Snapshot::Priorities(_) => "priorities",
            Snapshot::Sprints(_) => "sprints",
            Snapshot::Estimates(_) => "estimates",
            Snapshot::Labels(_) => "labels",
            Snapshot::Kanban(_) => "kanban",
            Snapshot::GroupBy(_) => "group_by",
        }
    }
}

impl Execute for Snapshot {
    fn execute(self, store: &mut BoardStore) -> Outcome {
        let snapshot = match self {
            Snapshot::Kanban(mut board) => {
                board.sort_all();
                Snapshot::Kanban(board)
            }
            other => other,
        };
        store.replace_snapshot(snapshot);
        Outcome::Replaced
    }
}
