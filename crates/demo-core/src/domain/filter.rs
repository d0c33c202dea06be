// ============================================================================
// Demo Core - Task Filter Entity
// File: crates/demo-core/src/domain/filter.rs
// Description: Saved task queries shown in the task list
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::authorization::Authentication;
use super::task::Task;
use crate::error::DomainError;

/// Resolves to the id of the authenticated user.
pub const CURRENT_USER_EXPRESSION: &str = "${currentUser()}";
/// Resolves to the group ids of the authenticated user.
pub const CURRENT_USER_GROUPS_EXPRESSION: &str = "${currentUserGroups()}";

/// Task query criteria. Unset criteria match every task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskQuery {
    pub assignee: Option<String>,
    pub assignee_expression: Option<String>,
    pub candidate_groups: Option<Vec<String>>,
    pub candidate_groups_expression: Option<String>,
    pub unassigned: bool,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assignee(mut self, user_id: &str) -> Self {
        self.assignee = Some(user_id.to_string());
        self
    }

    pub fn assignee_expression(mut self, expression: &str) -> Self {
        self.assignee_expression = Some(expression.to_string());
        self
    }

    pub fn candidate_group_in(mut self, groups: &[&str]) -> Self {
        self.candidate_groups = Some(groups.iter().map(|g| g.to_string()).collect());
        self
    }

    pub fn candidate_group_in_expression(mut self, expression: &str) -> Self {
        self.candidate_groups_expression = Some(expression.to_string());
        self
    }

    pub fn unassigned(mut self) -> Self {
        self.unassigned = true;
        self
    }

    /// Substitutes expressions with values taken from the authentication.
    pub fn resolve(&self, authentication: &Authentication) -> Result<ResolvedTaskQuery, DomainError> {
        let assignee = match (&self.assignee, &self.assignee_expression) {
            (Some(user_id), _) => Some(user_id.clone()),
            (None, Some(expr)) if expr == CURRENT_USER_EXPRESSION => {
                Some(authentication.user_id.clone())
            }
            (None, Some(expr)) => return Err(DomainError::UnknownExpression(expr.clone())),
            (None, None) => None,
        };

        let candidate_groups = match (&self.candidate_groups, &self.candidate_groups_expression) {
            (Some(groups), _) => Some(groups.clone()),
            (None, Some(expr)) if expr == CURRENT_USER_GROUPS_EXPRESSION => {
                Some(authentication.group_ids.clone())
            }
            (None, Some(expr)) => return Err(DomainError::UnknownExpression(expr.clone())),
            (None, None) => None,
        };

        Ok(ResolvedTaskQuery {
            assignee,
            candidate_groups,
            unassigned: self.unassigned,
        })
    }
}

/// A task query with no expressions left.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTaskQuery {
    pub assignee: Option<String>,
    pub candidate_groups: Option<Vec<String>>,
    pub unassigned: bool,
}

impl ResolvedTaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(assignee) = &self.assignee {
            if task.assignee.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        if let Some(groups) = &self.candidate_groups {
            if !task.has_candidate_group(groups) {
                return false;
            }
        }
        !self.unassigned || task.is_unassigned()
    }
}

/// Task variable shown as a column in the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterVariable {
    pub name: String,
    pub label: String,
}

impl FilterVariable {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
        }
    }
}

/// Display properties of a filter. Lower priority sorts first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterProperties {
    pub description: String,
    pub priority: i32,
    pub variables: Vec<FilterVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub query: TaskQuery,
    pub properties: FilterProperties,
}

impl Filter {
    pub fn new_task_filter(name: &str, owner: &str, query: TaskQuery, properties: FilterProperties) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner: owner.to_string(),
            query,
            properties,
        }
    }

    pub fn priority(&self) -> i32 {
        self.properties.priority
    }
}
