//! Authorization service trait (port)

use async_trait::async_trait;
use crate::domain::{Authentication, Authorization, Permission, Principal, Resource};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    async fn save_authorization(&self, authorization: Authorization) -> Result<Authorization, DomainError>;

    /// Authorizations of exactly this principal on exactly this resource id.
    async fn find_authorizations(
        &self,
        principal: &Principal,
        resource: Resource,
        resource_id: &str,
    ) -> Result<Vec<Authorization>, DomainError>;

    /// Additive check over every authorization that applies to the caller.
    async fn is_authorized(
        &self,
        authentication: &Authentication,
        permission: Permission,
        resource: Resource,
        resource_id: &str,
    ) -> Result<bool, DomainError>;
}
