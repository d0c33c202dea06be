// ============================================================================
// Demo Core - Process Entities
// File: crates/demo-core/src/domain/process.rs
// Description: Process definitions, their activity models, and instances
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::variables::Variables;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Waits for a human; creates a task.
    UserTask {
        assignee: Option<String>,
        candidate_groups: Vec<String>,
    },
    /// Runs the named delegate and moves on.
    ServiceTask { delegate: String },
}

/// Where the token goes after an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Flow {
    End,
    Goto(String),
    /// Exclusive gateway on a boolean variable; a missing variable reads as false.
    /// `otherwise: None` ends the instance.
    IfTrue {
        variable: String,
        then: String,
        otherwise: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub kind: ActivityKind,
    pub outgoing: Flow,
}

impl Activity {
    pub fn user_task(id: &str, name: &str, assignee: Option<&str>, candidate_groups: &[&str], outgoing: Flow) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: ActivityKind::UserTask {
                assignee: assignee.map(str::to_string),
                candidate_groups: candidate_groups.iter().map(|g| g.to_string()).collect(),
            },
            outgoing,
        }
    }

    pub fn service_task(id: &str, name: &str, delegate: &str, outgoing: Flow) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: ActivityKind::ServiceTask {
                delegate: delegate.to_string(),
            },
            outgoing,
        }
    }
}

/// Activity graph of a process definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessModel {
    pub start: String,
    pub activities: Vec<Activity>,
}

impl ProcessModel {
    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Next activity id after `activity`, or `None` when the instance ends.
    pub fn next_after(&self, activity: &Activity, variables: &Variables) -> Option<String> {
        match &activity.outgoing {
            Flow::End => None,
            Flow::Goto(target) => Some(target.clone()),
            Flow::IfTrue {
                variable,
                then,
                otherwise,
            } => {
                if variables.get_bool(variable).unwrap_or(false) {
                    Some(then.clone())
                } else {
                    otherwise.clone()
                }
            }
        }
    }

    /// Every flow target and the start activity must exist; ids must be unique.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for activity in &self.activities {
            if !seen.insert(activity.id.as_str()) {
                return Err(format!("duplicate activity id '{}'", activity.id));
            }
        }
        if self.activity(&self.start).is_none() {
            return Err(format!("start activity '{}' does not exist", self.start));
        }
        for activity in &self.activities {
            let targets: Vec<&String> = match &activity.outgoing {
                Flow::End => vec![],
                Flow::Goto(target) => vec![target],
                Flow::IfTrue { then, otherwise, .. } => {
                    std::iter::once(then).chain(otherwise.iter()).collect()
                }
            };
            for target in targets {
                if self.activity(target).is_none() {
                    return Err(format!(
                        "activity '{}' flows to unknown activity '{}'",
                        activity.id, target
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// `key:version:uuid`
    pub id: String,
    pub key: String,
    pub name: String,
    pub version: i32,
    pub model: ProcessModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInstance {
    pub id: Uuid,
    pub definition_id: String,
    pub definition_key: String,
    pub variables: Variables,
    pub state: InstanceState,
    /// Activity the token waits in, if any.
    pub current_activity: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl ProcessInstance {
    pub fn is_running(&self) -> bool {
        self.state == InstanceState::Running
    }
}
