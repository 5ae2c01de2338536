//! The board store: owner of the board structure and every slice loaded with it.
//!
//! All mutation goes through [`BoardStore::apply`], which runs one operation to
//! completion, bumps the revision when state changed and logs the outcome.

use crate::board::Snapshot;
use crate::command::BoardCommand;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::filter::{FilterDimension, FilterSelection};
use crate::logging::Pretty;
use crate::operation::{Execute, Operation};
use crate::outcome::Outcome;
use crate::task::{AddTask, GroupChange, MoveTask, MoveTaskToGroup, MoveTasksToState, UpdateTask};
use crate::types::{
    Board, Estimate, GroupBy, GroupKey, Label, Location, Member, Priority, Sprint, SprintId,
    StateId, Task, TaskId, TaskPatch, WorkflowState,
};
use tracing::{debug, trace};

/// In-memory state for one open board
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    config: EngineConfig,
    states: Vec<WorkflowState>,
    members: Vec<Member>,
    priorities: Vec<Priority>,
    sprints: Vec<Sprint>,
    estimates: Vec<Estimate>,
    labels: Vec<Label>,
    board: Board,
    group_by: Option<GroupBy>,
    filters: FilterSelection,
    revision: u64,
}

impl BoardStore {
    /// Create an empty store
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Apply an operation and record its effect
    pub fn apply<O: Operation + Execute>(&mut self, op: O) -> Outcome {
        let op_string = op.op_string();
        let outcome = op.execute(self);

        if outcome.changed() {
            self.revision += 1;
            debug!(op = %op_string, revision = self.revision, "applied");
            trace!("{op_string} outcome:{}", Pretty(&outcome));
        } else if let Some(reason) = outcome.reason() {
            debug!(op = %op_string, ?reason, "ignored");
        } else {
            trace!(op = %op_string, "applied without change");
        }

        outcome
    }

    // Snapshot loads

    /// Replace the workflow states
    pub fn initialize_states(&mut self, states: Vec<WorkflowState>) -> Outcome {
        self.apply(Snapshot::States(states))
    }

    /// Replace the member list
    pub fn initialize_members(&mut self, members: Vec<Member>) -> Outcome {
        self.apply(Snapshot::Members(members))
    }

    /// Replace the priority list
    pub fn initialize_priorities(&mut self, priorities: Vec<Priority>) -> Outcome {
        self.apply(Snapshot::Priorities(priorities))
    }

    /// Replace the sprint list
    pub fn initialize_sprints(&mut self, sprints: Vec<Sprint>) -> Outcome {
        self.apply(Snapshot::Sprints(sprints))
    }

    /// Replace the estimate list
    pub fn initialize_estimates(&mut self, estimates: Vec<Estimate>) -> Outcome {
        self.apply(Snapshot::Estimates(estimates))
    }

    /// Replace the label list
    pub fn initialize_labels(&mut self, labels: Vec<Label>) -> Outcome {
        self.apply(Snapshot::Labels(labels))
    }

    /// Replace the whole board structure
    pub fn initialize_kanban(&mut self, board: Board) -> Outcome {
        self.apply(Snapshot::Kanban(board))
    }

    /// Replace the grouping selector
    pub fn initialize_group_by(&mut self, group_by: Option<GroupBy>) -> Outcome {
        self.apply(Snapshot::GroupBy(group_by))
    }

    // Task mutations

    /// Merge a patch into a task, relocating it when the change names the
    /// board's active grouping dimension
    pub fn update_task(
        &mut self,
        id: impl Into<TaskId>,
        patch: TaskPatch,
        group_change: Option<GroupChange>,
    ) -> Outcome {
        let mut op = UpdateTask::new(id).with_patch(patch);
        op.group_change = group_change;
        self.apply(op)
    }

    /// Move a task to another column of its current section (or the flat board)
    pub fn update_task_position(
        &mut self,
        id: impl Into<TaskId>,
        state: impl Into<StateId>,
        patch: TaskPatch,
    ) -> Outcome {
        self.apply(MoveTask::new(id, state).with_patch(patch))
    }

    /// Move a task to a column inside a given group section
    pub fn update_task_position_by_group(
        &mut self,
        id: impl Into<TaskId>,
        state: impl Into<StateId>,
        group: impl Into<GroupKey>,
        patch: TaskPatch,
    ) -> Outcome {
        self.apply(MoveTaskToGroup::new(id, state, group).with_patch(patch))
    }

    /// Insert a newly created task
    pub fn add_task(&mut self, task: Task) -> Outcome {
        self.apply(AddTask::new(task))
    }

    /// Move several tasks to the end of one state
    pub fn move_tasks_to_state(
        &mut self,
        ids: impl IntoIterator<Item = TaskId>,
        state: impl Into<StateId>,
    ) -> Outcome {
        self.apply(MoveTasksToState::new(ids, state))
    }

    // Filters

    /// Select exactly one sprint
    pub fn set_active_sprint(&mut self, sprint: impl Into<SprintId>) -> Outcome {
        self.apply(BoardCommand::SetActiveSprint {
            sprint: sprint.into(),
        })
    }

    /// Empty every filter dimension
    pub fn clear_filters(&mut self) -> Outcome {
        self.apply(BoardCommand::ClearFilters)
    }

    /// Replace one filter dimension
    pub fn select_filter(&mut self, dimension: FilterDimension, values: Vec<String>) -> Outcome {
        self.apply(BoardCommand::SelectFilter { dimension, values })
    }

    /// Query parameters for re-fetching the board under the current filters
    pub fn query_params(&self) -> Vec<(String, String)> {
        self.filters.query_params(self.group_by)
    }

    // Accessors

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn states(&self) -> &[WorkflowState] {
        &self.states
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    pub fn estimates(&self) -> &[Estimate] {
        &self.estimates
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The grouping selector as last initialized.
    ///
    /// Routing uses the board's own grouping, which can lag this value until
    /// the board is reloaded.
    pub fn group_by(&self) -> Option<GroupBy> {
        self.group_by
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Counter bumped by every mutation that changed state
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Find a task anywhere on the board
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.board.find_task(id)
    }

    /// Where a task sits on the board
    pub fn locate(&self, id: &TaskId) -> Option<Location> {
        self.board.locate(id)
    }

    /// Total number of tasks on the board
    pub fn task_count(&self) -> usize {
        self.board.task_count()
    }

    /// Check the board's uniqueness and ordering invariants
    pub fn verify(&self) -> Result<()> {
        self.board.verify()
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterSelection {
        &mut self.filters
    }

    pub(crate) fn replace_snapshot(&mut self, snapshot: Snapshot) {
        match snapshot {
            Snapshot::States(states) => self.states = states,
            Snapshot::Members(members) => self.members = members,
            Snapshot::Priorities(priorities) => self.priorities = priorities,
            Snapshot::Sprints(sprints) => self.sprints = sprints,
            Snapshot::Estimates(estimates) => self.estimates = estimates,
            Snapshot::Labels(labels) => self.labels = labels,
            Snapshot::Kanban(board) => self.board = board,
            Snapshot::GroupBy(group_by) => self.group_by = group_by,
        }
    }
}
