// ============================================================================
// Demo Server - Startup Sequence
// File: demo-app/demo-server/src/startup.rs
// ============================================================================
//! Engine construction, deployment and the post-deploy demo setup.

use std::sync::Arc;
use tracing::{info, warn};

use demo_core::invoice::{deploy_invoice_process, InvoiceDocument};
use demo_core::services::{EngineServices, InvoiceInstanceStarter, SeedOptions, SeedOutcome, StartOutcome};
use demo_core::{DomainError, ProcessDefinition};
use demo_engine::InMemoryEngine;
use demo_security::PasswordCost;
use demo_shared::{AppConfig, AppError};

fn startup_error(err: DomainError) -> AppError {
    AppError::StartupError(err.to_string())
}

pub fn build_engine(config: &AppConfig, password_cost: PasswordCost) -> Result<Arc<InMemoryEngine>, AppError> {
    InMemoryEngine::builder()
        .read_only_identity(config.seed.read_only_identity)
        .password_cost(password_cost)
        .invoice_delegates()
        .build()
        .map_err(startup_error)
}

pub async fn deploy(services: &EngineServices) -> Result<Vec<ProcessDefinition>, AppError> {
    deploy_invoice_process(services.repository.as_ref())
        .await
        .map_err(startup_error)
}

/// Seeds the demo environment, then starts the demo instances on the first
/// and on the latest invoice version with the metrics reporter switched on.
pub async fn post_deploy(services: &EngineServices, config: &AppConfig) -> Result<(), AppError> {
    if config.seed.enabled {
        let outcome = services
            .sample_data_generator(SeedOptions {
                reconcile: config.seed.reconcile,
            })
            .generate()
            .await
            .map_err(startup_error)?;
        if let SeedOutcome::Seeded(report) = outcome {
            info!(created = report.created(), skipped = report.skipped, "Demo environment seeded");
        }
    } else {
        info!("Demo data seeding disabled");
    }

    if !config.demo.start_instances {
        return Ok(());
    }

    let document = InvoiceDocument::load(&config.demo.invoice_document)
        .await
        .map_err(startup_error)?;
    let starter = InvoiceInstanceStarter::from_services(services, document);

    services.metrics.activate(&config.demo.reporter_id);
    let started = start_demo_instances(&starter, &config.demo.process_key).await;
    services.metrics.deactivate();

    started.map_err(startup_error)
}

async fn start_demo_instances(starter: &InvoiceInstanceStarter, key: &str) -> Result<(), DomainError> {
    for version in [Some(1), None] {
        match starter.start_instances(key, version).await? {
            StartOutcome::Started { definition_id, instance_ids } => {
                info!(%definition_id, started = instance_ids.len(), "Demo instances started");
            }
            StartOutcome::AlreadyRunning { definition_id, running } => {
                warn!(%definition_id, running, "Demo instances left as they are");
            }
        }
    }
    Ok(())
}
