//! Task record and partial task updates

use super::board::GroupBy;
use super::ids::{GroupKey, MemberId, PriorityId, SprintId, StateId, TaskId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A task/card on the kanban board.
///
/// Only the fields the engine routes and orders by are typed. Everything else
/// the backend sends (name, summary, labels, ...) rides along in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,

    /// Owning column
    #[serde(alias = "state_id")]
    pub state_id: StateId,

    /// Ordering key within the column
    #[serde(default, deserialize_with = "super::sequence::deserialize")]
    pub sequence: f64,

    #[serde(default, alias = "assignee_id", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<MemberId>,

    #[serde(default, alias = "sprint_id", skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<SprintId>,

    #[serde(default, alias = "priority_id", skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<PriorityId>,

    #[serde(default, alias = "task_type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,

    /// Every other field, kept verbatim
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Task {
    /// Create a new task in the given state with sequence 0
    pub fn new(id: impl Into<TaskId>, state: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            state_id: state.into(),
            sequence: 0.0,
            assignee_id: None,
            sprint_id: None,
            priority_id: None,
            task_type: None,
            fields: Map::new(),
        }
    }

    /// Set the sequence
    pub fn with_sequence(mut self, sequence: f64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<MemberId>) -> Self {
        self.assignee_id = Some(assignee.into());
        self
    }

    /// Set the sprint
    pub fn with_sprint(mut self, sprint: impl Into<SprintId>) -> Self {
        self.sprint_id = Some(sprint.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: impl Into<PriorityId>) -> Self {
        self.priority_id = Some(priority.into());
        self
    }

    /// Set the task type
    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = Some(task_type.into());
        self
    }

    /// Set an untyped field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Value of the given grouping dimension on this task, if set
    pub fn group_value(&self, group_by: GroupBy) -> Option<GroupKey> {
        match group_by {
            GroupBy::Assignee => self.assignee_id.as_ref().map(|id| GroupKey::from(id.as_str())),
            GroupBy::Sprint => self.sprint_id.as_ref().map(|id| GroupKey::from(id.as_str())),
            GroupBy::Priority => self.priority_id.as_ref().map(|id| GroupKey::from(id.as_str())),
            GroupBy::TaskType => self.task_type.as_deref().map(GroupKey::from),
        }
    }
}

/// Deserialize a present key (including `null`) as `Some(..)`, so an absent
/// key stays `None` and `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial set of field updates for a task.
///
/// `None` = don't change. For the nullable grouping fields,
/// `Some(None)` = clear and `Some(Some(x))` = set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New workflow state. An in-place update only rewrites the field and
    /// leaves the task in its column; moves set it to the target column's id.
    #[serde(default, alias = "state_id", skip_serializing_if = "Option::is_none")]
    pub state_id: Option<StateId>,

    #[serde(
        default,
        deserialize_with = "super::sequence::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence: Option<f64>,

    #[serde(
        default,
        alias = "assignee_id",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee_id: Option<Option<MemberId>>,

    #[serde(
        default,
        alias = "sprint_id",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub sprint_id: Option<Option<SprintId>>,

    #[serde(
        default,
        alias = "priority_id",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority_id: Option<Option<PriorityId>>,

    #[serde(
        default,
        alias = "task_type",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_type: Option<Option<String>>,

    /// Untyped fields to overwrite
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TaskPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state
    pub fn with_state(mut self, state: impl Into<StateId>) -> Self {
        self.state_id = Some(state.into());
        self
    }

    /// Set the sequence
    pub fn with_sequence(mut self, sequence: f64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Set or clear the assignee
    pub fn with_assignee(mut self, assignee: Option<MemberId>) -> Self {
        self.assignee_id = Some(assignee);
        self
    }

    /// Set or clear the sprint
    pub fn with_sprint(mut self, sprint: Option<SprintId>) -> Self {
        self.sprint_id = Some(sprint);
        self
    }

    /// Set or clear the priority
    pub fn with_priority(mut self, priority: Option<PriorityId>) -> Self {
        self.priority_id = Some(priority);
        self
    }

    /// Set or clear the task type
    pub fn with_task_type(mut self, task_type: Option<String>) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Overwrite an untyped field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.state_id.is_none()
            && self.sequence.is_none()
            && self.assignee_id.is_none()
            && self.sprint_id.is_none()
            && self.priority_id.is_none()
            && self.task_type.is_none()
            && self.fields.is_empty()
    }

    /// Merge this patch into a task. Returns true if any field changed.
    pub fn apply(&self, task: &mut Task) -> bool {
        let mut changed = false;

        if let Some(state) = &self.state_id {
            changed |= replace(&mut task.state_id, state);
        }
        if let Some(sequence) = self.sequence {
            changed |= replace(&mut task.sequence, &sequence);
        }
        if let Some(assignee) = &self.assignee_id {
            changed |= replace(&mut task.assignee_id, assignee);
        }
        if let Some(sprint) = &self.sprint_id {
            changed |= replace(&mut task.sprint_id, sprint);
        }
        if let Some(priority) = &self.priority_id {
            changed |= replace(&mut task.priority_id, priority);
        }
        if let Some(task_type) = &self.task_type {
            changed |= replace(&mut task.task_type, task_type);
        }
        for (key, value) in &self.fields {
            if task.fields.get(key) != Some(value) {
                task.fields.insert(key.clone(), value.clone());
                changed = true;
            }
        }

        changed
    }
}

fn replace<T: PartialEq + Clone>(slot: &mut T, value: &T) -> bool {
    if slot == value {
        return false;
    }
    *slot = value.clone();
    true
}
