//! Filter selection state
//!
//! Selections are tracked locally and only ever turned into query parameters
//! for the next board fetch. The engine never filters tasks itself.

use crate::types::{GroupBy, SprintId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A filterable dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Assignee,
    TaskType,
    Priority,
    Label,
    Estimate,
    Sprint,
}

impl FilterDimension {
    /// All dimensions, in query order
    pub const ALL: [FilterDimension; 6] = [
        FilterDimension::Assignee,
        FilterDimension::TaskType,
        FilterDimension::Priority,
        FilterDimension::Label,
        FilterDimension::Estimate,
        FilterDimension::Sprint,
    ];

    /// Query parameter name understood by the kanban endpoint
    pub fn query_key(&self) -> &'static str {
        match self {
            FilterDimension::Assignee => "assignees[]",
            FilterDimension::TaskType => "task_types[]",
            FilterDimension::Priority => "priorities[]",
            FilterDimension::Label => "labels[]",
            FilterDimension::Estimate => "estimates[]",
            FilterDimension::Sprint => "sprints[]",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterDimension::Assignee => "assignee",
            FilterDimension::TaskType => "task_type",
            FilterDimension::Priority => "priority",
            FilterDimension::Label => "label",
            FilterDimension::Estimate => "estimate",
            FilterDimension::Sprint => "sprint",
        };
        f.write_str(name)
    }
}

/// Independent selection sets, one per dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub assignees: BTreeSet<String>,
    pub task_types: BTreeSet<String>,
    pub priorities: BTreeSet<String>,
    pub labels: BTreeSet<String>,
    pub estimates: BTreeSet<String>,
    pub sprints: BTreeSet<String>,
}

impl FilterSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection set for a dimension
    pub fn get(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Assignee => &self.assignees,
            FilterDimension::TaskType => &self.task_types,
            FilterDimension::Priority => &self.priorities,
            FilterDimension::Label => &self.labels,
            FilterDimension::Estimate => &self.estimates,
            FilterDimension::Sprint => &self.sprints,
        }
    }

    fn get_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Assignee => &mut self.assignees,
            FilterDimension::TaskType => &mut self.task_types,
            FilterDimension::Priority => &mut self.priorities,
            FilterDimension::Label => &mut self.labels,
            FilterDimension::Estimate => &mut self.estimates,
            FilterDimension::Sprint => &mut self.sprints,
        }
    }

    /// Replace the sprint selection with exactly one sprint
    pub fn set_active_sprint(&mut self, sprint: &SprintId) {
        self.sprints.clear();
        self.sprints.insert(sprint.to_string());
    }

    /// Empty every dimension
    pub fn clear(&mut self) {
        FilterDimension::ALL
            .into_iter()
            .for_each(|d| self.get_mut(d).clear());
    }

    /// Replace one dimension's selection
    pub fn select<I, S>(&mut self, dimension: FilterDimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.get_mut(dimension);
        set.clear();
        set.extend(values.into_iter().map(Into::into));
    }

    /// Add a value if absent, remove it if present. Returns true if now selected.
    pub fn toggle(&mut self, dimension: FilterDimension, value: impl Into<String>) -> bool {
        let value = value.into();
        let set = self.get_mut(dimension);
        if set.remove(&value) {
            false
        } else {
            set.insert(value);
            true
        }
    }

    /// Check if nothing is selected in any dimension
    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL.into_iter().all(|d| self.get(d).is_empty())
    }

    /// Query pairs for the kanban endpoint, in a stable order
    pub fn query_params(&self, group_by: Option<GroupBy>) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = FilterDimension::ALL
            .into_iter()
            .flat_map(|d| {
                self.get(d)
                    .iter()
                    .map(move |v| (d.query_key().to_string(), v.clone()))
            })
            .collect();
        if let Some(group_by) = group_by {
            params.push(("group_by".to_string(), group_by.as_str().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_active_sprint_replaces() {
        let mut filters = FilterSelection::new();
        filters.select(FilterDimension::Sprint, ["s1", "s2"]);
        filters.set_active_sprint(&SprintId::from("s3"));
        assert_eq!(filters.sprints.len(), 1);
        assert!(filters.sprints.contains("s3"));
    }

    #[test]
    fn test_clear_empties_all_dimensions() {
        let mut filters = FilterSelection::new();
        for d in FilterDimension::ALL {
            filters.toggle(d, "x");
        }
        assert!(!filters.is_empty());

        filters.clear();
        assert!(filters.is_empty());
        for d in FilterDimension::ALL {
            assert!(filters.get(d).is_empty(), "{d} not cleared");
        }
    }

    #[test]
    fn test_toggle() {
        let mut filters = FilterSelection::new();
        assert!(filters.toggle(FilterDimension::Label, "bug"));
        assert!(!filters.toggle(FilterDimension::Label, "bug"));
        assert!(filters.labels.is_empty());
    }

    #[test]
    fn test_query_params_order() {
        let mut filters = FilterSelection::new();
        filters.select(FilterDimension::Sprint, ["s1"]);
        filters.select(FilterDimension::Assignee, ["m2", "m1"]);

        let params = filters.query_params(Some(GroupBy::Priority));
        assert_eq!(
            params,
            vec![
                ("assignees[]".to_string(), "m1".to_string()),
                ("assignees[]".to_string(), "m2".to_string()),
                ("sprints[]".to_string(), "s1".to_string()),
                ("group_by".to_string(), "priority".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_empty() {
        assert!(FilterSelection::new().query_params(None).is_empty());
    }
}
