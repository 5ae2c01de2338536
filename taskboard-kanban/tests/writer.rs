//! Integration tests for the single-writer queue

use serde_json::json;
use taskboard_kanban::{
    load_kanban, AddTask, BoardCommand, BoardStore, BoardWriter, EngineConfig, KanbanError,
    MoveTask, Outcome, Snapshot, Task, TaskId,
};

fn store() -> BoardStore {
    let board = load_kanban(
        json!([
            { "id": "todo", "name": "Todo", "tasks": [
                { "id": "t1", "stateId": "todo", "sequence": 10000 },
                { "id": "t2", "stateId": "todo", "sequence": 20000 }
            ]},
            { "id": "done", "name": "Done", "tasks": [] }
        ]),
        None,
    )
    .unwrap();
    let mut store = BoardStore::new(EngineConfig::default().with_journal_capacity(8));
    let _ = store.initialize_kanban(board);
    store
}

#[test_log::test(tokio::test)]
async fn test_concurrent_callers_share_one_board() {
    let handle = BoardWriter::spawn(store());

    let mut tasks = Vec::new();
    for i in 0..20 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            handle
                .apply(AddTask::new(Task::new(format!("n{i}"), "done")))
                .await
        }));
    }
    for task in tasks {
        let outcome = task.await.unwrap().unwrap();
        assert!(matches!(outcome, Outcome::Inserted { .. }));
    }

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.task_count(), 22);
    snapshot.verify().unwrap();
    assert_eq!(handle.revision(), snapshot.revision());
}

#[test_log::test(tokio::test)]
async fn test_journal_through_handle() {
    let handle = BoardWriter::spawn(store());

    let _ = handle.apply(MoveTask::new("t2", "done")).await.unwrap();
    let _ = handle.apply(BoardCommand::ClearFilters).await.unwrap();
    let _ = handle
        .apply(Snapshot::GroupBy(None))
        .await
        .unwrap();

    let journal = handle.journal(2).await.unwrap();
    let ops: Vec<_> = journal.iter().map(|e| e.op.as_str()).collect();
    assert_eq!(ops, vec!["initialize group_by", "clear filters"]);
}

#[test_log::test(tokio::test)]
async fn test_commands_from_json() {
    let handle = BoardWriter::spawn(store());

    let command: BoardCommand = serde_json::from_value(json!({
        "op": "move task",
        "id": "t1",
        "state": "done",
        "patch": { "title": "Ship it" }
    }))
    .unwrap();
    let outcome = handle.apply(command).await.unwrap();
    assert!(outcome.is_applied());

    let snapshot = handle.snapshot().await.unwrap();
    let task = snapshot.find_task(&TaskId::from("t1")).unwrap();
    assert_eq!(task.state_id.as_str(), "done");
    assert_eq!(task.fields["title"], "Ship it");
}

#[test]
fn test_closed_writer_reports_error() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let handle = runtime.block_on(async { BoardWriter::spawn(store()) });
    drop(runtime);

    let other = tokio::runtime::Runtime::new().unwrap();
    let result = other.block_on(handle.apply(BoardCommand::ClearFilters));
    assert!(matches!(result, Err(KanbanError::WriterClosed)));
}
