//! Operation traits
//!
//! Operations are structs where the fields are the parameters. Each one knows
//! its canonical op string and how to apply itself to a [`BoardStore`].

use crate::outcome::Outcome;
use crate::store::BoardStore;

/// Naming for an operation
pub trait Operation {
    /// The verb (e.g. "move")
    fn verb(&self) -> &'static str;

    /// The noun (e.g. "task")
    fn noun(&self) -> &'static str;

    /// Canonical op string (e.g. "move task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Apply an operation to the store.
///
/// Implementations run to completion without yielding and must leave the
/// board untouched when they return [`Outcome::Ignored`].
pub trait Execute {
    fn execute(self, store: &mut BoardStore) -> Outcome;
}
