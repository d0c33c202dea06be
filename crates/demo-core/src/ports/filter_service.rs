//! Filter service trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Authentication, Filter, Task};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilterService: Send + Sync {
    /// Filter names are unique.
    async fn save_filter(&self, filter: Filter) -> Result<Filter, DomainError>;
    async fn find_filter(&self, filter_id: Uuid) -> Result<Option<Filter>, DomainError>;
    async fn find_filter_by_name(&self, name: &str) -> Result<Option<Filter>, DomainError>;

    /// All filters, lowest priority first.
    async fn list_filters(&self) -> Result<Vec<Filter>, DomainError>;

    /// Filters the caller owns or holds READ on, lowest priority first.
    async fn readable_filters(&self, authentication: &Authentication) -> Result<Vec<Filter>, DomainError>;

    /// Runs the filter's query for the caller.
    async fn filter_tasks(&self, filter_id: Uuid, authentication: &Authentication) -> Result<Vec<Task>, DomainError>;
}
