//! Board-level operations: snapshot loads and response loading

mod init;
mod load;

pub use init::Snapshot;
pub use load::{load_kanban, load_kanban_str};
