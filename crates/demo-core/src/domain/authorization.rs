// ============================================================================
// Demo Core - Authorization Entity
// File: crates/demo-core/src/domain/authorization.rs
// Description: Permission grants over engine resources
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Resource id matching every resource of a type.
pub const ANY_RESOURCE_ID: &str = "*";

/// Resource types the engine guards with authorizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Application,
    User,
    Group,
    GroupMembership,
    Authorization,
    Filter,
    ProcessDefinition,
    Task,
    ProcessInstance,
    Deployment,
    DecisionDefinition,
    Tenant,
    TenantMembership,
    Batch,
    DecisionRequirementsDefinition,
    Report,
    Dashboard,
}

impl Resource {
    pub const ALL: [Resource; 17] = [
        Resource::Application,
        Resource::User,
        Resource::Group,
        Resource::GroupMembership,
        Resource::Authorization,
        Resource::Filter,
        Resource::ProcessDefinition,
        Resource::Task,
        Resource::ProcessInstance,
        Resource::Deployment,
        Resource::DecisionDefinition,
        Resource::Tenant,
        Resource::TenantMembership,
        Resource::Batch,
        Resource::DecisionRequirementsDefinition,
        Resource::Report,
        Resource::Dashboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Application => "application",
            Resource::User => "user",
            Resource::Group => "group",
            Resource::GroupMembership => "group-membership",
            Resource::Authorization => "authorization",
            Resource::Filter => "filter",
            Resource::ProcessDefinition => "process-definition",
            Resource::Task => "task",
            Resource::ProcessInstance => "process-instance",
            Resource::Deployment => "deployment",
            Resource::DecisionDefinition => "decision-definition",
            Resource::Tenant => "tenant",
            Resource::TenantMembership => "tenant-membership",
            Resource::Batch => "batch",
            Resource::DecisionRequirementsDefinition => "decision-requirements-definition",
            Resource::Report => "report",
            Resource::Dashboard => "dashboard",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Implies every other permission.
    All,
    Access,
    Read,
    Update,
    Create,
    Delete,
    ReadHistory,
    DeleteHistory,
    ReadTask,
    UpdateTask,
    CreateInstance,
    ReadInstance,
    UpdateInstance,
    DeleteInstance,
    TaskWork,
    TaskAssign,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::All => "ALL",
            Permission::Access => "ACCESS",
            Permission::Read => "READ",
            Permission::Update => "UPDATE",
            Permission::Create => "CREATE",
            Permission::Delete => "DELETE",
            Permission::ReadHistory => "READ_HISTORY",
            Permission::DeleteHistory => "DELETE_HISTORY",
            Permission::ReadTask => "READ_TASK",
            Permission::UpdateTask => "UPDATE_TASK",
            Permission::CreateInstance => "CREATE_INSTANCE",
            Permission::ReadInstance => "READ_INSTANCE",
            Permission::UpdateInstance => "UPDATE_INSTANCE",
            Permission::DeleteInstance => "DELETE_INSTANCE",
            Permission::TaskWork => "TASK_WORK",
            Permission::TaskAssign => "TASK_ASSIGN",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global authorizations apply to every user; grants to one user or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationType {
    Global,
    Grant,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Principal {
    Any,
    User(String),
    Group(String),
}

/// Identity on whose behalf an engine call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    pub user_id: String,
    pub group_ids: Vec<String>,
}

impl Authentication {
    pub fn new(user_id: &str, group_ids: Vec<String>) -> Self {
        Self {
            user_id: user_id.to_string(),
            group_ids,
        }
    }

    pub fn in_group(&self, group_id: &str) -> bool {
        self.group_ids.iter().any(|g| g == group_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: Uuid,
    pub auth_type: AuthorizationType,
    pub principal: Principal,
    pub resource: Resource,
    pub resource_id: String,
    pub permissions: BTreeSet<Permission>,
}

impl Authorization {
    fn build(auth_type: AuthorizationType, principal: Principal, resource: Resource, resource_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            auth_type,
            principal,
            resource,
            resource_id: resource_id.to_string(),
            permissions: BTreeSet::new(),
        }
    }

    pub fn global(resource: Resource, resource_id: &str) -> Self {
        Self::build(AuthorizationType::Global, Principal::Any, resource, resource_id)
    }

    pub fn grant_group(group_id: &str, resource: Resource, resource_id: &str) -> Self {
        Self::build(
            AuthorizationType::Grant,
            Principal::Group(group_id.to_string()),
            resource,
            resource_id,
        )
    }

    pub fn grant_user(user_id: &str, resource: Resource, resource_id: &str) -> Self {
        Self::build(
            AuthorizationType::Grant,
            Principal::User(user_id.to_string()),
            resource,
            resource_id,
        )
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }

    pub fn with_permissions(mut self, permissions: &[Permission]) -> Self {
        self.permissions.extend(permissions.iter().copied());
        self
    }

    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.contains(&Permission::All) || self.permissions.contains(&permission)
    }

    pub fn covers_resource(&self, resource: Resource, resource_id: &str) -> bool {
        self.resource == resource
            && (self.resource_id == ANY_RESOURCE_ID || self.resource_id == resource_id)
    }

    pub fn applies_to(&self, authentication: &Authentication) -> bool {
        match &self.principal {
            Principal::Any => true,
            Principal::User(user_id) => *user_id == authentication.user_id,
            Principal::Group(group_id) => authentication.in_group(group_id),
        }
    }

    /// Same principal, resource and resource id, with at least `other`'s permissions.
    pub fn subsumes(&self, other: &Authorization) -> bool {
        self.auth_type == other.auth_type
            && self.principal == other.principal
            && self.resource == other.resource
            && self.resource_id == other.resource_id
            && (self.permissions.contains(&Permission::All)
                || other.permissions.is_subset(&self.permissions))
    }

    /// Grants need a user or group principal; global authorizations must not name one.
    pub fn validate(&self) -> Result<(), String> {
        match (self.auth_type, &self.principal) {
            (AuthorizationType::Global, Principal::Any) => {}
            (AuthorizationType::Global, _) => {
                return Err("global authorization cannot name a user or group".to_string())
            }
            (AuthorizationType::Grant, Principal::Any) => {
                return Err("grant requires a user or group".to_string())
            }
            (AuthorizationType::Grant, _) => {}
        }
        if self.permissions.is_empty() {
            return Err("authorization carries no permission".to_string());
        }
        if self.resource_id.is_empty() {
            return Err("authorization resource id is empty".to_string());
        }
        Ok(())
    }
}
