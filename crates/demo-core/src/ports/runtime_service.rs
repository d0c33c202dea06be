//! Runtime service trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{ProcessInstance, Variables};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RuntimeService: Send + Sync {
    async fn start_process_instance_by_id(
        &self,
        definition_id: &str,
        variables: Variables,
    ) -> Result<ProcessInstance, DomainError>;

    async fn count_running_instances(&self, definition_id: &str) -> Result<u64, DomainError>;

    async fn find_process_instance(&self, instance_id: Uuid) -> Result<Option<ProcessInstance>, DomainError>;
}
