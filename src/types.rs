//! Core data model.

use serde::{Deserialize, Serialize};

/// A single task list entry.
///
/// The on-disk and wire representation uses the field names `task` and
/// `completed`; the collection is a JSON array of these objects, ordered by
/// display position. The position doubles as the task's address, so there is
/// no identifier field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Free-form description text. Not unique.
    #[serde(rename = "task")]
    pub description: String,
    /// Whether the task has been marked done.
    pub completed: bool,
}

impl Task {
    /// Create a new, not-yet-completed task.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
        }
    }
}
