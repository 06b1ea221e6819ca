use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

pub type ListId = String;

/// One step of a keyboard-style move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl TodoList {
    pub fn new(id: ListId, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the list as modified. `updated_at` always moves forward, even when
    /// the clock has not.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }

    pub fn rename(&mut self, name: String, now: DateTime<Utc>) {
        self.name = name;
        self.touch(now);
    }

    pub fn push_task(&mut self, task: Task, now: DateTime<Utc>) {
        self.tasks.push(task);
        self.touch(now);
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Remove the task at `from` and reinsert it at `to`.
    /// Callers check both indices first.
    pub(crate) fn move_task(&mut self, from: usize, to: usize, now: DateTime<Utc>) {
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.touch(now);
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
