//! Repository service trait (port)

use async_trait::async_trait;
use crate::domain::{ProcessDefinition, ProcessModel};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// Registers a new version of the definition `key`. Versions start at 1.
    async fn deploy(&self, key: &str, name: &str, model: ProcessModel) -> Result<ProcessDefinition, DomainError>;

    /// Explicit `version`, or the latest when `None`.
    async fn find_definition(&self, key: &str, version: Option<i32>) -> Result<Option<ProcessDefinition>, DomainError>;
}
