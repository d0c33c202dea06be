// ============================================================================
// Demo Engine - Identity Service
// File: crates/demo-engine/src/identity.rs
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, warn};
use validator::Validate;

use demo_core::domain::{Group, Membership, NewUser, User};
use demo_core::ports::IdentityService;
use demo_core::DomainError;

use crate::engine::InMemoryEngine;

impl InMemoryEngine {
    fn ensure_writable(&self) -> Result<(), DomainError> {
        if self.read_only_identity {
            warn!("Rejected write to read-only identity provider");
            return Err(DomainError::IdentityReadOnly);
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityService for InMemoryEngine {
    fn is_read_only(&self) -> bool {
        self.read_only_identity
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().users.get(user_id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        self.ensure_writable()?;
        user.validate()?;

        if self.state.read().users.contains_key(&user.id) {
            return Err(DomainError::UserAlreadyExists(user.id));
        }

        let password_hash = self
            .passwords
            .hash(&user.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let user = user.into_user(password_hash);

        let mut state = self.state.write();
        if state.users.contains_key(&user.id) {
            return Err(DomainError::UserAlreadyExists(user.id));
        }
        state.users.insert(user.id.clone(), user.clone());
        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn check_password(&self, user_id: &str, password: &str) -> Result<bool, DomainError> {
        let hash = match self.state.read().users.get(user_id) {
            Some(user) => user.password_hash.clone(),
            None => return Ok(false),
        };
        self.passwords
            .verify(password, &hash)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }

    async fn find_group(&self, group_id: &str) -> Result<Option<Group>, DomainError> {
        Ok(self.state.read().groups.get(group_id).cloned())
    }

    async fn create_group(&self, group: Group) -> Result<Group, DomainError> {
        self.ensure_writable()?;
        if group.id.is_empty() {
            return Err(DomainError::ValidationError("Group id must not be empty".to_string()));
        }

        let mut state = self.state.write();
        if state.groups.contains_key(&group.id) {
            return Err(DomainError::GroupAlreadyExists(group.id));
        }
        state.groups.insert(group.id.clone(), group.clone());
        debug!(group_id = %group.id, group_type = group.group_type.as_str(), "Group created");
        Ok(group)
    }

    async fn create_membership(&self, user_id: &str, group_id: &str) -> Result<(), DomainError> {
        self.ensure_writable()?;

        let mut state = self.state.write();
        if !state.users.contains_key(user_id) {
            return Err(DomainError::UserNotFound(user_id.to_string()));
        }
        if !state.groups.contains_key(group_id) {
            return Err(DomainError::GroupNotFound(group_id.to_string()));
        }
        if !state.memberships.insert(Membership::new(user_id, group_id)) {
            return Err(DomainError::ValidationError(format!(
                "{} is already a member of {}",
                user_id, group_id
            )));
        }
        debug!(user_id, group_id, "Membership created");
        Ok(())
    }

    async fn is_member(&self, user_id: &str, group_id: &str) -> Result<bool, DomainError> {
        Ok(self
            .state
            .read()
            .memberships
            .contains(&Membership::new(user_id, group_id)))
    }

    async fn group_ids_of(&self, user_id: &str) -> Result<Vec<String>, DomainError> {
        Ok(self
            .state
            .read()
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.group_id.clone())
            .collect())
    }
}
