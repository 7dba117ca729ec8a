//! Offline task list
//!
//! The no-login variant: tasks live in memory for the lifetime of the page.

use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTask {
    /// Creation time in milliseconds, bumped to stay unique
    pub id: i64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalTaskList {
    tasks: Vec<LocalTask>,
    last_id: i64,
}

impl LocalTaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) -> Result<i64, ValidationError> {
        self.add_at(text, chrono::Utc::now().timestamp_millis())
    }

    /// Add with an explicit clock reading.
    pub fn add_at(&mut self, text: &str, now_ms: i64) -> Result<i64, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        self.tasks.push(LocalTask {
            id,
            text: text.to_string(),
            done: false,
        });
        Ok(id)
    }

    /// Returns false when no task has this id.
    pub fn toggle(&mut self, id: i64) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.done = !task.done;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn tasks(&self) -> &[LocalTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
