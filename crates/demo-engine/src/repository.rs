// ============================================================================
// Demo Engine - Repository Service
// File: crates/demo-engine/src/repository.rs
// ============================================================================

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use demo_core::domain::{ProcessDefinition, ProcessModel};
use demo_core::ports::RepositoryService;
use demo_core::DomainError;

use crate::engine::InMemoryEngine;

#[async_trait]
impl RepositoryService for InMemoryEngine {
    async fn deploy(&self, key: &str, name: &str, model: ProcessModel) -> Result<ProcessDefinition, DomainError> {
        if key.is_empty() {
            return Err(DomainError::ValidationError("Process definition key must not be empty".to_string()));
        }
        model.validate().map_err(DomainError::ValidationError)?;

        let mut state = self.state.write();
        let version = state
            .definitions
            .iter()
            .filter(|d| d.key == key)
            .map(|d| d.version)
            .max()
            .unwrap_or(0)
            + 1;

        let definition = ProcessDefinition {
            id: format!("{}:{}:{}", key, version, Uuid::new_v4()),
            key: key.to_string(),
            name: name.to_string(),
            version,
            model,
        };
        state.definitions.push(definition.clone());
        info!(key, version, "Process definition deployed");
        Ok(definition)
    }

    async fn find_definition(&self, key: &str, version: Option<i32>) -> Result<Option<ProcessDefinition>, DomainError> {
        let state = self.state.read();
        let mut candidates = state.definitions.iter().filter(|d| d.key == key);
        let found = match version {
            Some(version) => candidates.find(|d| d.version == version),
            None => candidates.max_by_key(|d| d.version),
        };
        Ok(found.cloned())
    }
}
