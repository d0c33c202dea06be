//! User tasks and comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    /// Activity id in the process model.
    pub task_definition_key: String,
    pub process_instance_id: Uuid,
    pub process_definition_id: String,
    pub assignee: Option<String>,
    pub candidate_groups: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_unassigned(&self) -> bool {
        self.assignee.is_none()
    }

    pub fn has_candidate_group(&self, groups: &[String]) -> bool {
        self.candidate_groups.iter().any(|g| groups.contains(g))
    }
}

/// A note left on a task or process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub task_id: Option<Uuid>,
    pub process_instance_id: Uuid,
    pub user_id: String,
    pub message: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskOperation {
    Claim,
    Complete,
}

/// Who claimed or completed a task, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOperationEntry {
    pub task_id: Uuid,
    pub process_instance_id: Uuid,
    pub operation: TaskOperation,
    pub user_id: String,
    pub time: DateTime<Utc>,
}
