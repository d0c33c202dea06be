//! Task service trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Authentication, Comment, Task, Variables};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn find_task(&self, task_id: Uuid) -> Result<Option<Task>, DomainError>;
    async fn tasks_for_instance(&self, process_instance_id: Uuid) -> Result<Vec<Task>, DomainError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, DomainError>;

    /// Assigns the task to `user_id` on behalf of `authentication`.
    async fn claim(&self, task_id: Uuid, user_id: &str, authentication: &Authentication) -> Result<(), DomainError>;

    /// Merges `variables` into the instance and moves the token on.
    async fn complete(
        &self,
        task_id: Uuid,
        variables: Variables,
        authentication: &Authentication,
    ) -> Result<(), DomainError>;

    async fn create_comment(
        &self,
        task_id: Option<Uuid>,
        process_instance_id: Uuid,
        message: &str,
        authentication: &Authentication,
    ) -> Result<Comment, DomainError>;

    async fn instance_comments(&self, process_instance_id: Uuid) -> Result<Vec<Comment>, DomainError>;
}
