//! Core types for the kanban state engine

mod board;
mod catalog;
mod ids;
mod log;
pub mod sequence;
mod task;

// Re-export all types
pub use board::{Board, Column, GroupBy, GroupSection, GroupedBoard, Location};
pub use catalog::{Estimate, Label, Member, Priority, Sprint, WorkflowState};
pub use ids::{EstimateId, GroupKey, LabelId, MemberId, PriorityId, SprintId, StateId, TaskId};
pub use log::LogEntry;
pub use task::{Task, TaskPatch};
