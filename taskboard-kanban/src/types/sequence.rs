//! Sequence arithmetic for ordering tasks inside a column.
//!
//! Sequences are plain floats, sorted ascending and never required to be
//! contiguous. New positions are derived from neighbors the same way the
//! backend's update-sequence endpoint derives them, so an optimistic local
//! placement lands where the server will put it.

use super::task::Task;
use serde::{Deserialize, Deserializer};

/// Default gap between consecutive appended tasks
pub const DEFAULT_SEQUENCE_STEP: f64 = 10000.0;

/// Sequence for a task placed between two neighbors.
///
/// Returns `None` when neither neighbor is given; the caller decides what an
/// unanchored placement means.
pub fn between(previous: Option<f64>, next: Option<f64>, step: f64) -> Option<f64> {
    match (previous, next) {
        (Some(prev), Some(next)) => Some((prev + next) / 2.0),
        (Some(prev), None) => Some(prev + step),
        (None, Some(next)) => Some(next / 2.0),
        (None, None) => None,
    }
}

/// Sequence for a task appended after the given tasks
pub fn after_last<'a>(tasks: impl IntoIterator<Item = &'a Task>, step: f64) -> f64 {
    tasks
        .into_iter()
        .map(|t| t.sequence)
        .max_by(f64::total_cmp)
        .map(|last| last + step)
        .unwrap_or(step)
}

/// Stable sort by sequence; equal sequences keep their insertion order
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.sequence.total_cmp(&b.sequence));
}

/// Index of the first task that breaks ascending order, if any
pub fn first_unsorted(tasks: &[Task]) -> Option<usize> {
    tasks
        .windows(2)
        .position(|pair| pair[0].sequence.total_cmp(&pair[1].sequence).is_gt())
        .map(|i| i + 1)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSequence {
    Number(f64),
    Text(String),
}

impl RawSequence {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RawSequence::Number(n) => Ok(n),
            RawSequence::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid sequence: {s:?}"))),
        }
    }
}

/// Deserialize a sequence sent either as a JSON number or a decimal string
pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    RawSequence::deserialize(deserializer)?.into_f64()
}

/// Optional variant of [`deserialize`]; `null` reads as absent
pub(crate) fn deserialize_optional<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Option::<RawSequence>::deserialize(deserializer)?
        .map(RawSequence::into_f64)
        .transpose()
}
