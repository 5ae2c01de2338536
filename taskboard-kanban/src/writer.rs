//! Single-writer queue for a board store.
//!
//! One tokio task owns the [`BoardStore`] and applies commands strictly in
//! the order they are submitted. Any number of [`BoardHandle`]s can submit
//! commands and read snapshots. Each applied change publishes the new
//! revision on a watch channel, which is the signal for views to re-render.
//!
//! ```rust,no_run
//! use taskboard_kanban::{BoardStore, BoardWriter, MoveTask};
//!
//! # async fn example() -> taskboard_kanban::Result<()> {
//! let handle = BoardWriter::spawn(BoardStore::default());
//! let mut revisions = handle.subscribe();
//!
//! let outcome = handle.apply(MoveTask::new("t1", "done")).await?;
//! if outcome.changed() {
//!     revisions.changed().await.ok();
//! }
//! # Ok(())
//! # }
//! ```

use crate::command::BoardCommand;
use crate::error::{KanbanError, Result};
use crate::outcome::Outcome;
use crate::processor::BoardProcessor;
use crate::store::BoardStore;
use crate::types::LogEntry;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace};

/// Requests sent to the writer task
enum WriterRequest {
    Apply {
        command: BoardCommand,
        reply: oneshot::Sender<Outcome>,
    },
    Snapshot {
        reply: oneshot::Sender<BoardStore>,
    },
    Journal {
        limit: usize,
        reply: oneshot::Sender<Vec<LogEntry>>,
    },
}

/// Owner of a board store running on its own task
pub struct BoardWriter {
    store: BoardStore,
    processor: BoardProcessor,
    requests: mpsc::Receiver<WriterRequest>,
    revision: watch::Sender<u64>,
}

impl BoardWriter {
    /// Spawn the writer task and return a handle to it.
    ///
    /// Must be called from within a tokio runtime. The task stops once every
    /// handle has been dropped.
    pub fn spawn(store: BoardStore) -> BoardHandle {
        let config = store.config();
        let (tx, rx) = mpsc::channel(config.writer_queue.max(1));
        let (revision_tx, revision_rx) = watch::channel(store.revision());

        let writer = BoardWriter {
            processor: BoardProcessor::for_store(&store),
            store,
            requests: rx,
            revision: revision_tx,
        };
        tokio::spawn(writer.run());

        BoardHandle {
            sender: tx,
            revision: revision_rx,
        }
    }

    async fn run(mut self) {
        debug!(revision = self.store.revision(), "board writer started");

        while let Some(request) = self.requests.recv().await {
            match request {
                WriterRequest::Apply { command, reply } => {
                    let outcome = self.processor.process(&mut self.store, command);
                    if outcome.changed() {
                        self.revision.send_replace(self.store.revision());
                    }
                    // The caller may have stopped waiting
                    let _ = reply.send(outcome);
                }
                WriterRequest::Snapshot { reply } => {
                    let _ = reply.send(self.store.clone());
                }
                WriterRequest::Journal { limit, reply } => {
                    let _ = reply.send(self.processor.recent(limit));
                }
            }
        }

        trace!("board writer stopped");
    }
}

/// Cloneable handle for submitting commands to a [`BoardWriter`]
#[derive(Debug, Clone)]
pub struct BoardHandle {
    sender: mpsc::Sender<WriterRequest>,
    revision: watch::Receiver<u64>,
}

impl BoardHandle {
    /// Submit a command and wait for its outcome
    pub async fn apply(&self, command: impl Into<BoardCommand>) -> Result<Outcome> {
        let (reply, response) = oneshot::channel();
        self.send(WriterRequest::Apply {
            command: command.into(),
            reply,
        })
        .await?;
        response.await.map_err(|_| KanbanError::WriterClosed)
    }

    /// A copy of the store as of every command submitted before this call
    pub async fn snapshot(&self) -> Result<BoardStore> {
        let (reply, response) = oneshot::channel();
        self.send(WriterRequest::Snapshot { reply }).await?;
        response.await.map_err(|_| KanbanError::WriterClosed)
    }

    /// Up to `limit` journal entries, newest first
    pub async fn journal(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let (reply, response) = oneshot::channel();
        self.send(WriterRequest::Journal { limit, reply }).await?;
        response.await.map_err(|_| KanbanError::WriterClosed)
    }

    /// Watch the store revision
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.clone()
    }

    /// The last published revision
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    async fn send(&self, request: WriterRequest) -> Result<()> {
        self.sender
            .send(request)
            .await
            .map_err(|_| KanbanError::WriterClosed)
    }
}

impl std::fmt::Debug for WriterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriterRequest::Apply { command, .. } => f.debug_tuple("Apply").field(command).finish(),
            WriterRequest::Snapshot { .. } => f.write_str("Snapshot"),
            WriterRequest::Journal { limit, .. } => f.debug_tuple("Journal").field(limit).finish(),
        }
    }
}
