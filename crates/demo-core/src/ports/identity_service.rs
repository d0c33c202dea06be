//! Identity service trait (port)

use async_trait::async_trait;
use crate::domain::{Group, NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Read-only providers reject every create call.
    fn is_read_only(&self) -> bool;

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DomainError>;
    async fn create_user(&self, user: NewUser) -> Result<User, DomainError>;
    async fn check_password(&self, user_id: &str, password: &str) -> Result<bool, DomainError>;

    async fn find_group(&self, group_id: &str) -> Result<Option<Group>, DomainError>;
    async fn create_group(&self, group: Group) -> Result<Group, DomainError>;

    async fn create_membership(&self, user_id: &str, group_id: &str) -> Result<(), DomainError>;
    async fn is_member(&self, user_id: &str, group_id: &str) -> Result<bool, DomainError>;
    async fn group_ids_of(&self, user_id: &str) -> Result<Vec<String>, DomainError>;
}
