//! Flat-file task store.
//!
//! The entire collection lives in one JSON file: an array of
//! `{ "task": string, "completed": bool }` objects in display order. Every
//! operation reads the whole file and every mutation writes the whole file
//! back -- there is no cache across requests and disk is the source of truth
//! between operations.
//!
//! A `tokio::sync::Mutex` serializes each load+mutate+save critical section,
//! so concurrent mutating requests cannot interleave their read-modify-write
//! cycles and silently discard each other's saves.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::{AppError, AppResult};
use crate::types::Task;

/// Task store backed by a single JSON file.
pub struct TaskStore {
    path: PathBuf,
    /// Guards every load+mutate+save cycle against the backing file.
    lock: Mutex<()>,
}

impl TaskStore {
    /// Create a store over the given backing file. The file itself is
    /// created lazily, on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection.
    ///
    /// A missing backing file is created containing `[]` first. Read,
    /// create, and parse failures are logged and degrade to an empty
    /// collection -- callers never see a storage error.
    pub async fn load(&self) -> Vec<Task> {
        let _guard = self.lock.lock().await;
        read_tasks(&self.path)
    }

    /// Append a new, uncompleted task with the given description.
    pub async fn add(&self, description: String) {
        // Infallible by contract: append cannot go out of range and save
        // failures are absorbed, so the Result is always Ok.
        let _ = self
            .with_tasks(|tasks| {
                tasks.push(Task::new(description));
                Ok(())
            })
            .await;
    }

    /// Fetch the task at `index`.
    pub async fn get(&self, index: usize) -> AppResult<Task> {
        let _guard = self.lock.lock().await;
        let tasks = read_tasks(&self.path);
        tasks
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::index_out_of_range(index, tasks.len()))
    }

    /// Mark the task at `index` as completed.
    pub async fn complete(&self, index: usize) -> AppResult<()> {
        self.with_tasks(|tasks| {
            let len = tasks.len();
            let task = tasks
                .get_mut(index)
                .ok_or_else(|| AppError::index_out_of_range(index, len))?;
            task.completed = true;
            Ok(())
        })
        .await
    }

    /// Remove the task at `index`, shifting later entries down by one.
    /// Returns the removed task.
    pub async fn remove(&self, index: usize) -> AppResult<Task> {
        self.with_tasks(|tasks| {
            if index >= tasks.len() {
                return Err(AppError::index_out_of_range(index, tasks.len()));
            }
            Ok(tasks.remove(index))
        })
        .await
    }

    /// Replace the description of the task at `index`. The completed flag is
    /// untouched.
    pub async fn update(&self, index: usize, description: String) -> AppResult<()> {
        self.with_tasks(|tasks| {
            let len = tasks.len();
            let task = tasks
                .get_mut(index)
                .ok_or_else(|| AppError::index_out_of_range(index, len))?;
            task.description = description;
            Ok(())
        })
        .await
    }

    /// Run one load+mutate+save cycle under the store lock.
    ///
    /// The collection is written back only if `op` succeeds, so a failed
    /// mutation persists nothing. A failed save is logged and dropped; the
    /// caller still gets `Ok`.
    async fn with_tasks<T>(&self, op: impl FnOnce(&mut Vec<Task>) -> AppResult<T>) -> AppResult<T> {
        let _guard = self.lock.lock().await;
        let mut tasks = read_tasks(&self.path);
        let out = op(&mut tasks)?;
        write_tasks(&self.path, &tasks);
        Ok(out)
    }
}

/// Read the collection from disk, creating the file as `[]` if missing.
/// Degrades to an empty collection on any failure.
fn read_tasks(path: &Path) -> Vec<Task> {
    if !path.exists() {
        if let Err(e) = std::fs::write(path, "[]") {
            error!(path = %path.display(), error = %e, "Failed to create task file");
            return Vec::new();
        }
        debug!(path = %path.display(), "Created empty task file");
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read task file");
            return Vec::new();
        }
    };
    match serde_json::from_str(&contents) {
        Ok(tasks) => tasks,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to parse task file");
            Vec::new()
        }
    }
}

/// Write the full collection back to disk, overwriting the file.
/// Failures are logged, not surfaced.
fn write_tasks(path: &Path, tasks: &[Task]) {
    let json = match serde_json::to_string(tasks) {
        Ok(json) => json,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to serialize tasks");
            return;
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        error!(path = %path.display(), error = %e, "Failed to save task file");
    }
}
