//! Demo environment services

pub mod sample_data;
pub mod invoice_starter;

use std::sync::Arc;

use crate::clock::EngineClock;
use crate::ports::{
    AuthorizationService, FilterService, IdentityService, MetricsReporter, RepositoryService,
    RuntimeService, TaskService,
};

pub use invoice_starter::{InvoiceInstanceStarter, StartOutcome};
pub use sample_data::{SampleDataGenerator, SeedOptions, SeedOutcome, SeedReport, SeedStep};

/// Handles to every engine service the demo code talks to.
#[derive(Clone)]
pub struct EngineServices {
    pub identity: Arc<dyn IdentityService>,
    pub authorizations: Arc<dyn AuthorizationService>,
    pub filters: Arc<dyn FilterService>,
    pub tasks: Arc<dyn TaskService>,
    pub runtime: Arc<dyn RuntimeService>,
    pub repository: Arc<dyn RepositoryService>,
    pub metrics: Arc<dyn MetricsReporter>,
    pub clock: Arc<EngineClock>,
}

impl EngineServices {
    pub fn sample_data_generator(&self, options: SeedOptions) -> SampleDataGenerator {
        SampleDataGenerator::new(
            self.identity.clone(),
            self.authorizations.clone(),
            self.filters.clone(),
            options,
        )
    }
}
