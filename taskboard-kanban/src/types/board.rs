//! Board structure: columns, group sections and the grouped/ungrouped variant

use super::ids::{GroupKey, StateId, TaskId};
use super::sequence;
use super::task::Task;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// The grouping dimension a board is split by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Assignee,
    Sprint,
    Priority,
    TaskType,
}

impl GroupBy {
    /// All grouping dimensions
    pub const ALL: [GroupBy; 4] = [
        GroupBy::Assignee,
        GroupBy::Sprint,
        GroupBy::Priority,
        GroupBy::TaskType,
    ];

    /// The selector value used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Assignee => "assignee",
            GroupBy::Sprint => "sprint",
            GroupBy::Priority => "priority",
            GroupBy::TaskType => "task_type",
        }
    }

    /// Key of the section holding tasks with no value for this dimension.
    ///
    /// Every task has a type, so `task_type` boards have no such section.
    pub fn fallback_key(&self) -> Option<GroupKey> {
        match self {
            GroupBy::Assignee => Some(GroupKey::from("no_assignee")),
            GroupBy::Sprint => Some(GroupKey::from("no_sprint")),
            GroupBy::Priority => Some(GroupKey::from("no_priority")),
            GroupBy::TaskType => None,
        }
    }

    /// Parse a selector value
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column holds the tasks of one workflow state, ordered by sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: StateId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Display metadata (description, category, ...)
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: impl Into<StateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks: Vec::new(),
            meta: Map::new(),
        }
    }

    /// Add tasks, keeping the column sorted
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self.sort();
        self
    }

    /// Re-sort tasks by sequence (stable)
    pub fn sort(&mut self) {
        sequence::sort_tasks(&mut self.tasks);
    }

    /// Append a task and restore ordering
    pub fn insert_sorted(&mut self, task: Task) -> usize {
        let id = task.id.clone();
        self.tasks.push(task);
        self.sort();
        self.position_of(&id).unwrap_or(self.tasks.len() - 1)
    }

    /// Index of a task in this column
    pub fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }
}

/// One group's full set of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSection {
    #[serde(alias = "group_key")]
    pub group_key: GroupKey,
    #[serde(default)]
    pub states: Vec<Column>,
    /// Header metadata (member, sprint or priority record)
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl GroupSection {
    /// Create a section with the given columns
    pub fn new(group_key: impl Into<GroupKey>, states: Vec<Column>) -> Self {
        Self {
            group_key: group_key.into(),
            states,
            meta: Map::new(),
        }
    }

    /// Find a column by state id
    pub fn column(&self, state: &StateId) -> Option<&Column> {
        self.states.iter().find(|c| &c.id == state)
    }

    /// Index of the column for a state id
    pub fn column_index(&self, state: &StateId) -> Option<usize> {
        self.states.iter().position(|c| &c.id == state)
    }
}

/// A board split into group sections by one grouping dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedBoard {
    pub group_by: GroupBy,
    pub sections: Vec<GroupSection>,
}

impl GroupedBoard {
    /// Create a grouped board
    pub fn new(group_by: GroupBy, sections: Vec<GroupSection>) -> Self {
        Self { group_by, sections }
    }

    /// Index of the section with the given key
    pub fn section_index(&self, key: &GroupKey) -> Option<usize> {
        self.sections.iter().position(|s| &s.group_key == key)
    }

    /// Find a section by key
    pub fn section(&self, key: &GroupKey) -> Option<&GroupSection> {
        self.sections.iter().find(|s| &s.group_key == key)
    }
}

/// Where a task sits: optional section index, column index, task index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<usize>,
    pub column: usize,
    pub index: usize,
}

impl Location {
    fn new(section: Option<usize>, column: usize, index: usize) -> Self {
        Self {
            section,
            column,
            index,
        }
    }
}

/// The board: a flat list of columns, or a list of group sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Board {
    Ungrouped(Vec<Column>),
    Grouped(GroupedBoard),
}

impl Default for Board {
    fn default() -> Self {
        Board::Ungrouped(Vec::new())
    }
}

impl Board {
    /// Create an ungrouped board
    pub fn ungrouped(columns: Vec<Column>) -> Self {
        Board::Ungrouped(columns)
    }

    /// Create a grouped board
    pub fn grouped(group_by: GroupBy, sections: Vec<GroupSection>) -> Self {
        Board::Grouped(GroupedBoard::new(group_by, sections))
    }

    /// The grouping dimension, if grouped
    pub fn group_by(&self) -> Option<GroupBy> {
        match self {
            Board::Ungrouped(_) => None,
            Board::Grouped(g) => Some(g.group_by),
        }
    }

    /// Check if this board is split into sections
    pub fn is_grouped(&self) -> bool {
        matches!(self, Board::Grouped(_))
    }

    /// Every column, in board order, with its section index
    pub fn columns(&self) -> Box<dyn Iterator<Item = (Option<usize>, &Column)> + '_> {
        match self {
            Board::Ungrouped(columns) => Box::new(columns.iter().map(|c| (None, c))),
            Board::Grouped(g) => Box::new(
                g.sections
                    .iter()
                    .enumerate()
                    .flat_map(|(s, section)| section.states.iter().map(move |c| (Some(s), c))),
            ),
        }
    }

    /// Every task on the board
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns().flat_map(|(_, c)| c.tasks.iter())
    }

    /// Total number of tasks across the board
    pub fn task_count(&self) -> usize {
        self.columns().map(|(_, c)| c.tasks.len()).sum()
    }

    /// Find where a task sits
    pub fn locate(&self, id: &TaskId) -> Option<Location> {
        match self {
            Board::Ungrouped(columns) => locate_in(columns, id).map(|(c, i)| Location::new(None, c, i)),
            Board::Grouped(g) => g.sections.iter().enumerate().find_map(|(s, section)| {
                locate_in(&section.states, id).map(|(c, i)| Location::new(Some(s), c, i))
            }),
        }
    }

    /// Find a task anywhere on the board
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.locate(id).and_then(|loc| self.task_at(loc))
    }

    /// Task at a location
    pub fn task_at(&self, loc: Location) -> Option<&Task> {
        self.column_at(loc.section, loc.column)
            .and_then(|c| c.tasks.get(loc.index))
    }

    /// Mutable task at a location
    pub fn task_at_mut(&mut self, loc: Location) -> Option<&mut Task> {
        self.column_at_mut(loc.section, loc.column)
            .and_then(|c| c.tasks.get_mut(loc.index))
    }

    /// Column by section and column index
    pub fn column_at(&self, section: Option<usize>, column: usize) -> Option<&Column> {
        match (self, section) {
            (Board::Ungrouped(columns), None) => columns.get(column),
            (Board::Grouped(g), Some(s)) => g.sections.get(s).and_then(|sec| sec.states.get(column)),
            _ => None,
        }
    }

    /// Mutable column by section and column index
    pub fn column_at_mut(&mut self, section: Option<usize>, column: usize) -> Option<&mut Column> {
        match (self, section) {
            (Board::Ungrouped(columns), None) => columns.get_mut(column),
            (Board::Grouped(g), Some(s)) => g
                .sections
                .get_mut(s)
                .and_then(|sec| sec.states.get_mut(column)),
            _ => None,
        }
    }

    /// Remove and return the task at a location
    pub fn take_at(&mut self, loc: Location) -> Option<Task> {
        let column = self.column_at_mut(loc.section, loc.column)?;
        (loc.index < column.tasks.len()).then(|| column.tasks.remove(loc.index))
    }

    /// Column index for a state within a section (or the flat list)
    pub fn find_column(&self, section: Option<usize>, state: &StateId) -> Option<usize> {
        match (self, section) {
            (Board::Ungrouped(columns), None) => columns.iter().position(|c| &c.id == state),
            (Board::Grouped(g), Some(s)) => g.sections.get(s).and_then(|sec| sec.column_index(state)),
            _ => None,
        }
    }

    /// Section index for a group key (grouped boards only)
    pub fn find_section(&self, key: &GroupKey) -> Option<usize> {
        match self {
            Board::Ungrouped(_) => None,
            Board::Grouped(g) => g.section_index(key),
        }
    }

    /// Insert a task into a column and restore ordering. Returns its
    /// location, or hands the task back if the column does not exist.
    pub fn insert_at(
        &mut self,
        section: Option<usize>,
        column: usize,
        task: Task,
    ) -> std::result::Result<Location, Task> {
        match self.column_at_mut(section, column) {
            Some(c) => Ok(Location::new(section, column, c.insert_sorted(task))),
            None => Err(task),
        }
    }

    /// Check the uniqueness and ordering invariants
    pub fn verify(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (_, column) in self.columns() {
            if let Some(index) = sequence::first_unsorted(&column.tasks) {
                return Err(KanbanError::UnsortedColumn {
                    state: column.id.to_string(),
                    index,
                });
            }
            for task in &column.tasks {
                if !seen.insert(&task.id) {
                    return Err(KanbanError::DuplicateTask {
                        id: task.id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Re-sort every column
    pub fn sort_all(&mut self) {
        match self {
            Board::Ungrouped(columns) => columns.iter_mut().for_each(Column::sort),
            Board::Grouped(g) => g
                .sections
                .iter_mut()
                .flat_map(|s| s.states.iter_mut())
                .for_each(Column::sort),
        }
    }
}

fn locate_in(columns: &[Column], id: &TaskId) -> Option<(usize, usize)> {
    columns
        .iter()
        .enumerate()
        .find_map(|(c, column)| column.position_of(id).map(|i| (c, i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped_board() -> Board {
        Board::grouped(
            GroupBy::Sprint,
            vec![
                GroupSection::new(
                    "s1",
                    vec![
                        Column::new("1", "Todo").with_tasks([Task::new("a", "1").with_sequence(2.0)]),
                        Column::new("2", "Done"),
                    ],
                ),
                GroupSection::new(
                    "no_sprint",
                    vec![
                        Column::new("1", "Todo"),
                        Column::new("2", "Done").with_tasks([
                            Task::new("b", "2").with_sequence(5.0),
                            Task::new("c", "2").with_sequence(1.0),
                        ]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_group_by_round_trip_names() {
        for g in GroupBy::ALL {
            assert_eq!(GroupBy::parse(g.as_str()), Some(g));
        }
        assert_eq!(GroupBy::parse("label"), None);
        assert_eq!(serde_json::to_string(&GroupBy::TaskType).unwrap(), "\"task_type\"");
    }

    #[test]
    fn test_fallback_keys() {
        assert_eq!(GroupBy::Sprint.fallback_key(), Some(GroupKey::from("no_sprint")));
        assert_eq!(GroupBy::TaskType.fallback_key(), None);
    }

    #[test]
    fn test_column_with_tasks_sorts() {
        let column = Column::new("1", "Todo").with_tasks([
            Task::new("x", "1").with_sequence(3.0),
            Task::new("y", "1").with_sequence(1.0),
        ]);
        assert_eq!(column.tasks[0].id.as_str(), "y");
    }

    #[test]
    fn test_locate_grouped() {
        let board = grouped_board();
        let loc = board.locate(&TaskId::from("b")).unwrap();
        assert_eq!(loc, Location::new(Some(1), 1, 1));
        assert_eq!(board.task_at(loc).unwrap().id.as_str(), "b");
        assert!(board.locate(&TaskId::from("zz")).is_none());
    }

    #[test]
    fn test_task_count_and_iteration() {
        let board = grouped_board();
        assert_eq!(board.task_count(), 3);
        assert_eq!(board.columns().count(), 4);
        assert_eq!(board.tasks().count(), 3);
    }

    #[test]
    fn test_shape_mismatched_lookup() {
        let board = grouped_board();
        assert!(board.column_at(None, 0).is_none());
        assert!(board.find_column(None, &StateId::from("1")).is_none());
        assert_eq!(board.find_column(Some(0), &StateId::from("2")), Some(1));
    }

    #[test]
    fn test_take_and_insert() {
        let mut board = grouped_board();
        let loc = board.locate(&TaskId::from("a")).unwrap();
        let task = board.take_at(loc).unwrap();
        assert_eq!(board.task_count(), 2);

        let placed = board.insert_at(Some(1), 1, task.with_sequence(3.0)).unwrap();
        assert_eq!(placed, Location::new(Some(1), 1, 1));
        assert!(board.verify().is_ok());

        let orphan = Task::new("z", "9");
        let returned = board.insert_at(Some(7), 0, orphan).unwrap_err();
        assert_eq!(returned.id.as_str(), "z");
    }

    #[test]
    fn test_verify_detects_duplicates() {
        let board = Board::ungrouped(vec![
            Column::new("1", "A").with_tasks([Task::new("t", "1")]),
            Column::new("2", "B").with_tasks([Task::new("t", "2")]),
        ]);
        assert!(matches!(
            board.verify(),
            Err(KanbanError::DuplicateTask { id }) if id == "t"
        ));
    }

    #[test]
    fn test_verify_detects_unsorted() {
        let mut column = Column::new("1", "A");
        column.tasks = vec![
            Task::new("a", "1").with_sequence(2.0),
            Task::new("b", "1").with_sequence(1.0),
        ];
        let board = Board::ungrouped(vec![column]);
        assert!(matches!(
            board.verify(),
            Err(KanbanError::UnsortedColumn { index: 1, .. })
        ));
    }
}
