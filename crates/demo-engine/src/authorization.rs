// ============================================================================
// Demo Engine - Authorization Service
// File: crates/demo-engine/src/authorization.rs
// ============================================================================

use async_trait::async_trait;
use tracing::debug;

use demo_core::domain::{Authentication, Authorization, Permission, Principal, Resource};
use demo_core::ports::AuthorizationService;
use demo_core::DomainError;

use crate::engine::InMemoryEngine;

impl InMemoryEngine {
    /// Grants are additive; there are no revokes.
    pub(crate) fn check_authorized(
        authorizations: &[Authorization],
        authentication: &Authentication,
        permission: Permission,
        resource: Resource,
        resource_id: &str,
    ) -> bool {
        authorizations.iter().any(|a| {
            a.applies_to(authentication) && a.covers_resource(resource, resource_id) && a.grants(permission)
        })
    }
}

#[async_trait]
impl AuthorizationService for InMemoryEngine {
    async fn save_authorization(&self, authorization: Authorization) -> Result<Authorization, DomainError> {
        authorization.validate().map_err(DomainError::ValidationError)?;

        self.state.write().authorizations.push(authorization.clone());
        debug!(
            resource = %authorization.resource,
            resource_id = %authorization.resource_id,
            "Authorization saved"
        );
        Ok(authorization)
    }

    async fn find_authorizations(
        &self,
        principal: &Principal,
        resource: Resource,
        resource_id: &str,
    ) -> Result<Vec<Authorization>, DomainError> {
        Ok(self
            .state
            .read()
            .authorizations
            .iter()
            .filter(|a| a.principal == *principal && a.resource == resource && a.resource_id == resource_id)
            .cloned()
            .collect())
    }

    async fn is_authorized(
        &self,
        authentication: &Authentication,
        permission: Permission,
        resource: Resource,
        resource_id: &str,
    ) -> Result<bool, DomainError> {
        let state = self.state.read();
        Ok(Self::check_authorized(
            &state.authorizations,
            authentication,
            permission,
            resource,
            resource_id,
        ))
    }
}
