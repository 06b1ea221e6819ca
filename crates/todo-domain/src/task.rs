use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: TaskId, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: now,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
