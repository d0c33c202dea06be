//! # Demo Core - Domain Module
//!
//! Entities the engine owns and persists; demo code only builds and submits them.

pub mod user;
pub mod group;
pub mod authorization;
pub mod filter;
pub mod process;
pub mod task;
pub mod variables;

pub use user::{NewUser, User};
pub use group::{Group, GroupType, Membership};
pub use authorization::{
    Authentication, Authorization, AuthorizationType, Permission, Principal, Resource,
    ANY_RESOURCE_ID,
};
pub use filter::{
    Filter, FilterProperties, FilterVariable, ResolvedTaskQuery, TaskQuery,
    CURRENT_USER_EXPRESSION, CURRENT_USER_GROUPS_EXPRESSION,
};
pub use process::{
    Activity, ActivityKind, Flow, InstanceState, ProcessDefinition, ProcessInstance, ProcessModel,
};
pub use task::{Comment, Task, TaskOperation, TaskOperationEntry};
pub use variables::{FileValue, VariableValue, Variables};
