//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Identity provider is read only")]
    IdentityReadOnly,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Group already exists: {0}")]
    GroupAlreadyExists(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Filter name already exists: {0}")]
    FilterNameAlreadyExists(String),

    #[error("Filter not found: {0}")]
    FilterNotFound(Uuid),

    #[error("Process definition not found: {key} (version {version})")]
    ProcessDefinitionNotFound { key: String, version: String },

    #[error("Process instance not found: {0}")]
    ProcessInstanceNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task {task_id} is already claimed by {assignee}")]
    TaskAlreadyClaimed { task_id: Uuid, assignee: String },

    #[error("User {user_id} lacks {permission} on {resource} {resource_id}")]
    NotAuthorized {
        user_id: String,
        permission: String,
        resource: String,
        resource_id: String,
    },

    #[error("Delegate failed: {0}")]
    DelegateFailed(String),

    #[error("Couldn't read {0} file")]
    DocumentUnavailable(String),

    #[error("Unknown task query expression: {0}")]
    UnknownExpression(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
