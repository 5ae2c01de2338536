//! Build a [`Board`] from the kanban endpoint's response

use crate::error::{KanbanError, Result};
use crate::types::{Board, Column, GroupBy, GroupSection};
use serde_json::Value;

/// Convert a kanban response into a board.
///
/// Accepts `{"results": [...]}` or a bare array. Without grouping each element
/// is a state with its `tasks`; with grouping each element is a section with
/// `groupKey` and `states`. Columns are sorted and duplicate task ids rejected.
pub fn load_kanban(response: Value, group_by: Option<GroupBy>) -> Result<Board> {
    let results = match response {
        Value::Object(mut map) => map
            .remove("results")
            .ok_or_else(|| KanbanError::parse("kanban response has no `results`"))?,
        array @ Value::Array(_) => array,
        other => {
            return Err(KanbanError::parse(format!(
                "kanban response must be an object or array, got {}",
                type_name(&other)
            )))
        }
    };

    let mut board = match group_by {
        None => Board::Ungrouped(serde_json::from_value::<Vec<Column>>(results)?),
        Some(group_by) => {
            let sections: Vec<GroupSection> = serde_json::from_value(results)?;
            for section in &sections {
                check_section_group(section, group_by)?;
            }
            Board::grouped(group_by, sections)
        }
    };

    board.sort_all();
    board.verify()?;
    Ok(board)
}

/// Parse a kanban response from text
pub fn load_kanban_str(response: &str, group_by: Option<GroupBy>) -> Result<Board> {
    load_kanban(serde_json::from_str(response)?, group_by)
}

fn check_section_group(section: &GroupSection, expected: GroupBy) -> Result<()> {
    let declared = section
        .meta
        .get("groupBy")
        .or_else(|| section.meta.get("group_by"))
        .and_then(Value::as_str);

    match declared {
        Some(name) if GroupBy::parse(name) != Some(expected) => Err(KanbanError::parse(format!(
            "section {} is grouped by {name}, expected {expected}",
            section.group_key
        ))),
        _ => Ok(()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroupKey, StateId, TaskId};
    use serde_json::json;

    #[test]
    fn test_load_ungrouped() {
        let board = load_kanban(
            json!({
                "results": [
                    {
                        "id": 1,
                        "name": "Todo",
                        "category": "unstarted",
                        "tasks": [
                            { "id": "t2", "stateId": 1, "sequence": 20000 },
                            { "id": "t1", "stateId": 1, "sequence": 10000 }
                        ]
                    },
                    { "id": 2, "name": "Done", "tasks": [] }
                ]
            }),
            None,
        )
        .unwrap();

        assert!(!board.is_grouped());
        assert_eq!(board.task_count(), 2);
        let first = board.column_at(None, 0).unwrap();
        assert_eq!(first.id, StateId::from("1"));
        assert_eq!(first.tasks[0].id, TaskId::from("t1"));
        assert_eq!(first.meta["category"], "unstarted");
    }

    #[test]
    fn test_load_grouped_snake_case() {
        let board = load_kanban(
            json!([
                {
                    "group_key": "s1",
                    "group_by": "sprint",
                    "sprint": { "id": "s1", "name": "Sprint 1" },
                    "states": [
                        { "id": 5, "name": "Todo", "tasks": [
                            { "id": "t1", "state_id": 5, "sprint_id": "s1", "sequence": 1 }
                        ]}
                    ]
                },
                {
                    "group_key": "no_sprint",
                    "group_by": "sprint",
                    "sprint": null,
                    "states": [ { "id": 5, "name": "Todo", "tasks": [] } ]
                }
            ]),
            Some(GroupBy::Sprint),
        )
        .unwrap();

        assert_eq!(board.group_by(), Some(GroupBy::Sprint));
        assert_eq!(board.find_section(&GroupKey::from("no_sprint")), Some(1));
        assert!(board.find_task(&TaskId::from("t1")).is_some());
    }

    #[test]
    fn test_load_rejects_group_mismatch() {
        let err = load_kanban(
            json!([{ "groupKey": "m1", "groupBy": "assignee", "states": [] }]),
            Some(GroupBy::Sprint),
        )
        .unwrap_err();
        assert!(matches!(err, KanbanError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let err = load_kanban(
            json!([
                { "id": 1, "name": "A", "tasks": [{ "id": "t", "stateId": 1 }] },
                { "id": 2, "name": "B", "tasks": [{ "id": "t", "stateId": 2 }] }
            ]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, KanbanError::DuplicateTask { .. }));
    }

    #[test]
    fn test_load_rejects_bad_shapes() {
        assert!(matches!(
            load_kanban(json!("nope"), None),
            Err(KanbanError::Parse { .. })
        ));
        assert!(matches!(
            load_kanban(json!({ "data": [] }), None),
            Err(KanbanError::Parse { .. })
        ));
        assert!(matches!(
            load_kanban_str("{not json", None),
            Err(KanbanError::Json(_))
        ));
    }
}
