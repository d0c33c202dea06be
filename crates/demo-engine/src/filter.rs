// ============================================================================
// Demo Engine - Filter Service
// File: crates/demo-engine/src/filter.rs
// ============================================================================

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use demo_core::domain::{Authentication, Filter, Permission, Resource, Task};
use demo_core::ports::FilterService;
use demo_core::DomainError;

use crate::engine::{EngineState, InMemoryEngine};

fn by_priority(mut filters: Vec<Filter>) -> Vec<Filter> {
    filters.sort_by_key(Filter::priority);
    filters
}

fn can_read(state: &EngineState, filter: &Filter, authentication: &Authentication) -> bool {
    filter.owner == authentication.user_id
        || InMemoryEngine::check_authorized(
            &state.authorizations,
            authentication,
            Permission::Read,
            Resource::Filter,
            &filter.id.to_string(),
        )
}

#[async_trait]
impl FilterService for InMemoryEngine {
    async fn save_filter(&self, filter: Filter) -> Result<Filter, DomainError> {
        if filter.name.trim().is_empty() {
            return Err(DomainError::ValidationError("Filter name must not be empty".to_string()));
        }

        let mut state = self.state.write();
        if state.filters.iter().any(|f| f.name == filter.name && f.id != filter.id) {
            return Err(DomainError::FilterNameAlreadyExists(filter.name));
        }
        match state.filters.iter_mut().find(|f| f.id == filter.id) {
            Some(existing) => *existing = filter.clone(),
            None => state.filters.push(filter.clone()),
        }
        debug!(filter_id = %filter.id, name = %filter.name, "Filter saved");
        Ok(filter)
    }

    async fn find_filter(&self, filter_id: Uuid) -> Result<Option<Filter>, DomainError> {
        Ok(self.state.read().filters.iter().find(|f| f.id == filter_id).cloned())
    }

    async fn find_filter_by_name(&self, name: &str) -> Result<Option<Filter>, DomainError> {
        Ok(self.state.read().filters.iter().find(|f| f.name == name).cloned())
    }

    async fn list_filters(&self) -> Result<Vec<Filter>, DomainError> {
        Ok(by_priority(self.state.read().filters.clone()))
    }

    async fn readable_filters(&self, authentication: &Authentication) -> Result<Vec<Filter>, DomainError> {
        let state = self.state.read();
        let readable = state
            .filters
            .iter()
            .filter(|f| can_read(&state, f, authentication))
            .cloned()
            .collect();
        Ok(by_priority(readable))
    }

    async fn filter_tasks(&self, filter_id: Uuid, authentication: &Authentication) -> Result<Vec<Task>, DomainError> {
        let state = self.state.read();
        let filter = state
            .filters
            .iter()
            .find(|f| f.id == filter_id)
            .ok_or(DomainError::FilterNotFound(filter_id))?;

        if !can_read(&state, filter, authentication) {
            return Err(DomainError::NotAuthorized {
                user_id: authentication.user_id.clone(),
                permission: Permission::Read.to_string(),
                resource: Resource::Filter.to_string(),
                resource_id: filter_id.to_string(),
            });
        }

        let query = filter.query.resolve(authentication)?;
        Ok(state.tasks.iter().filter(|t| query.matches(t)).cloned().collect())
    }
}
