// ============================================================================
// Demo Engine - In-Memory Engine
// File: crates/demo-engine/src/engine.rs
// ============================================================================

use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use demo_core::delegates::{
    ArchiveInvoiceDelegate, Delegate, NotifyCreditorDelegate, ARCHIVE_INVOICE_DELEGATE,
    NOTIFY_CREDITOR_DELEGATE,
};
use demo_core::domain::{
    Authorization, Comment, Filter, Group, Membership, ProcessDefinition, ProcessInstance, Task,
    TaskOperationEntry, User,
};
use demo_core::services::EngineServices;
use demo_core::{DomainError, EngineClock};
use demo_security::{PasswordCost, PasswordService};

use crate::metrics::MetricsState;

/// Everything the engine stores. Guarded by a single lock that is never held
/// across an `.await`.
#[derive(Default)]
pub(crate) struct EngineState {
    pub users: HashMap<String, User>,
    pub groups: HashMap<String, Group>,
    pub memberships: BTreeSet<Membership>,
    pub authorizations: Vec<Authorization>,
    pub filters: Vec<Filter>,
    pub definitions: Vec<ProcessDefinition>,
    pub instances: HashMap<Uuid, ProcessInstance>,
    /// Open tasks, in creation order.
    pub tasks: Vec<Task>,
    pub comments: Vec<Comment>,
    pub operations: Vec<TaskOperationEntry>,
}

pub struct InMemoryEngine {
    pub(crate) state: RwLock<EngineState>,
    pub(crate) metrics: Mutex<MetricsState>,
    pub(crate) clock: Arc<EngineClock>,
    pub(crate) passwords: PasswordService,
    pub(crate) delegates: HashMap<String, Arc<dyn Delegate>>,
    pub(crate) read_only_identity: bool,
}

impl InMemoryEngine {
    pub fn builder() -> InMemoryEngineBuilder {
        InMemoryEngineBuilder::default()
    }

    pub fn clock(&self) -> Arc<EngineClock> {
        self.clock.clone()
    }

    /// Port handles backed by this engine.
    pub fn services(self: &Arc<Self>) -> EngineServices {
        EngineServices {
            identity: self.clone(),
            authorizations: self.clone(),
            filters: self.clone(),
            tasks: self.clone(),
            runtime: self.clone(),
            repository: self.clone(),
            metrics: self.clone(),
            clock: self.clock.clone(),
        }
    }

    pub(crate) fn delegate(&self, name: &str) -> Result<Arc<dyn Delegate>, DomainError> {
        self.delegates
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::DelegateFailed(format!("no delegate registered as '{}'", name)))
    }

    /// Number of stored authorizations. Test helper for write accounting.
    pub fn authorization_count(&self) -> usize {
        self.state.read().authorizations.len()
    }

    pub fn user_count(&self) -> usize {
        self.state.read().users.len()
    }

    pub fn group_count(&self) -> usize {
        self.state.read().groups.len()
    }
}

#[derive(Default)]
pub struct InMemoryEngineBuilder {
    clock: Option<Arc<EngineClock>>,
    read_only_identity: bool,
    password_cost: PasswordCost,
    delegates: HashMap<String, Arc<dyn Delegate>>,
}

impl InMemoryEngineBuilder {
    pub fn clock(mut self, clock: Arc<EngineClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Rejects every identity write, like an LDAP-backed provider.
    pub fn read_only_identity(mut self, read_only: bool) -> Self {
        self.read_only_identity = read_only;
        self
    }

    pub fn password_cost(mut self, cost: PasswordCost) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn delegate(mut self, name: &str, delegate: impl Delegate + 'static) -> Self {
        self.delegates.insert(name.to_string(), Arc::new(delegate));
        self
    }

    /// Registers the delegates the invoice process binds to.
    pub fn invoice_delegates(self) -> Self {
        self.delegate(ARCHIVE_INVOICE_DELEGATE, ArchiveInvoiceDelegate)
            .delegate(NOTIFY_CREDITOR_DELEGATE, NotifyCreditorDelegate)
    }

    pub fn build(self) -> Result<Arc<InMemoryEngine>, DomainError> {
        let passwords = PasswordService::new(self.password_cost)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        info!(
            delegates = self.delegates.len(),
            read_only_identity = self.read_only_identity,
            "In-memory engine created"
        );

        Ok(Arc::new(InMemoryEngine {
            state: RwLock::new(EngineState::default()),
            metrics: Mutex::new(MetricsState::default()),
            clock: self.clock.unwrap_or_default(),
            passwords,
            delegates: self.delegates,
            read_only_identity: self.read_only_identity,
        }))
    }
}
