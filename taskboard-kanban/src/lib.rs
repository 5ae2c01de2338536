//! In-memory kanban state engine
//!
//! This crate keeps a project's board in memory and applies the mutations a
//! kanban view needs: optimistic updates, drag-and-drop moves, inserts from
//! task-created events and filter selection. It owns no I/O; boards are
//! loaded from the backend's kanban response and discarded on navigation.
//!
//! ## Overview
//!
//! - **Two board shapes** - [`Board::Ungrouped`] is a flat list of columns,
//!   [`Board::Grouped`] a list of sections (by assignee, sprint, priority or
//!   task type), each holding the same set of columns
//! - **Ordered columns** - tasks are kept sorted by `sequence`, and each task
//!   id appears at most once on the board
//! - **Explicit outcomes** - a mutation that cannot be applied leaves the
//!   board untouched and returns [`Outcome::Ignored`] with the reason
//! - **Single writer** - [`BoardWriter`] serializes commands from many
//!   callers onto one store
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskboard_kanban::{load_kanban, BoardStore, Outcome, TaskPatch};
//! use serde_json::json;
//!
//! # fn example() -> taskboard_kanban::Result<()> {
//! let board = load_kanban(
//!     json!({ "results": [
//!         { "id": 1, "name": "Todo", "tasks": [{ "id": "t1", "stateId": 1, "sequence": 1 }] },
//!         { "id": 2, "name": "Done", "tasks": [] }
//!     ]}),
//!     None,
//! )?;
//!
//! let mut store = BoardStore::default();
//! let _ = store.initialize_kanban(board);
//!
//! let outcome = store.update_task_position("t1", "2", TaskPatch::new().with_sequence(1.0));
//! assert!(matches!(outcome, Outcome::Relocated { .. }));
//!
//! // Unknown ids are ignored, not errors
//! assert!(store.update_task_position("nope", "2", TaskPatch::new()).is_ignored());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Commands
//!
//! Every mutation is also a [`BoardCommand`], tagged with its op string
//! (`"move task"`, `"add task"`, ...). [`BoardProcessor`] applies commands
//! and keeps a bounded journal of [`LogEntry`] records.

pub mod board;
mod command;
pub mod config;
mod error;
pub mod filter;
pub mod logging;
mod operation;
mod outcome;
mod processor;
mod store;
pub mod task;
pub mod types;
mod writer;

pub use board::{load_kanban, load_kanban_str, Snapshot};
pub use command::BoardCommand;
pub use config::{EngineConfig, UnroutablePolicy};
pub use error::{KanbanError, Result};
pub use filter::{FilterDimension, FilterSelection};
pub use operation::{Execute, Operation};
pub use outcome::{IgnoreReason, Outcome, Shape};
pub use processor::BoardProcessor;
pub use store::BoardStore;
pub use task::{AddTask, GroupChange, MoveTask, MoveTaskToGroup, MoveTasksToState, UpdateTask};
pub use writer::{BoardHandle, BoardWriter};

// Re-export commonly used types
pub use types::{
    Board, Column, Estimate, GroupBy, GroupKey, GroupSection, GroupedBoard, Label, Location,
    LogEntry, Member, MemberId, Priority, PriorityId, Sprint, SprintId, StateId, Task, TaskId,
    TaskPatch, WorkflowState,
};
