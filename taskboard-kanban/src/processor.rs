//! Command processor with an in-memory operation journal

use crate::command::BoardCommand;
use crate::operation::Operation;
use crate::outcome::Outcome;
use crate::store::BoardStore;
use crate::types::LogEntry;
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::warn;

/// Applies commands to a store and journals each one, newest first.
///
/// The journal is bounded; once full, the oldest entry is evicted. Ignored
/// commands are journaled as well so a caller can see why nothing happened.
#[derive(Debug, Clone)]
pub struct BoardProcessor {
    journal: VecDeque<LogEntry>,
    capacity: usize,
}

impl BoardProcessor {
    /// Create a processor keeping at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            journal: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Create a processor sized by the store's config
    pub fn for_store(store: &BoardStore) -> Self {
        Self::new(store.config().journal_capacity)
    }

    /// Apply one command and journal it
    pub fn process(&mut self, store: &mut BoardStore, command: BoardCommand) -> Outcome {
        let op = command.op_string();
        let input = to_value(&op, &command);

        let start = Instant::now();
        let outcome = store.apply(command);
        let duration_us = start.elapsed().as_micros() as u64;

        let output = to_value(&op, &outcome);
        self.record(LogEntry::new(op, input, output, store.revision(), duration_us));
        outcome
    }

    fn record(&mut self, entry: LogEntry) {
        self.journal.push_front(entry);
        self.journal.truncate(self.capacity);
    }

    /// Up to `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        self.journal.iter().take(limit).cloned().collect()
    }

    /// Number of journaled entries
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }
}

fn to_value<T: serde::Serialize>(op: &str, value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|error| {
        warn!(op, %error, "could not serialize journal entry");
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::MoveTask;
    use crate::task::fixtures::flat_store;

    #[test]
    fn test_process_journals_applied_and_ignored() {
        let mut store = flat_store();
        let mut processor = BoardProcessor::for_store(&store);

        let applied = processor.process(&mut store, MoveTask::new("t1", "2").into());
        let ignored = processor.process(&mut store, MoveTask::new("ghost", "2").into());
        assert!(applied.is_applied());
        assert!(ignored.is_ignored());

        let entries = processor.recent(10);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].op, "move task");
        assert_eq!(entries[0].output["status"], "ignored");
        assert_eq!(entries[0].output["reason"]["kind"], "task_not_found");
        assert_eq!(entries[1].output["status"], "relocated");
        assert_eq!(entries[1].input["id"], "t1");
        assert_eq!(entries[1].revision, entries[0].revision);
    }

    #[test]
    fn test_journal_is_bounded() {
        let mut store = flat_store();
        let mut processor = BoardProcessor::new(2);

        for _ in 0..5 {
            let _ = processor.process(&mut store, BoardCommand::ClearFilters);
        }

        assert_eq!(processor.len(), 2);
        let entries = processor.recent(5);
        assert!(entries[0].revision > entries[1].revision);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut store = flat_store();
        let mut processor = BoardProcessor::new(0);
        let _ = processor.process(&mut store, BoardCommand::ClearFilters);
        assert_eq!(processor.len(), 1);
    }
}
