//! Groups and memberships

use serde::{Deserialize, Serialize};

/// Classification tag of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupType {
    Workflow,
    System,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Workflow => "WORKFLOW",
            GroupType::System => "SYSTEM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub group_type: GroupType,
}

impl Group {
    pub fn new(id: &str, name: &str, group_type: GroupType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            group_type,
        }
    }
}

/// User-group relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: String,
    pub group_id: String,
}

impl Membership {
    pub fn new(user_id: &str, group_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            group_id: group_id.to_string(),
        }
    }
}
