#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use demo_core::invoice::{deploy_invoice_process, InvoiceDocument};
use demo_core::services::{InvoiceInstanceStarter, SeedOptions, SeedOutcome};
use demo_core::{Clock, EngineClock, ProcessDefinition};
use demo_engine::InMemoryEngine;
use demo_security::PasswordCost;

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap()
}

pub fn engine() -> Arc<InMemoryEngine> {
    InMemoryEngine::builder()
        .clock(Arc::new(EngineClock::with_base(Arc::new(FixedClock(fixed_now())))))
        .password_cost(PasswordCost::Low)
        .invoice_delegates()
        .build()
        .unwrap()
}

pub fn read_only_engine() -> Arc<InMemoryEngine> {
    InMemoryEngine::builder()
        .password_cost(PasswordCost::Low)
        .read_only_identity(true)
        .build()
        .unwrap()
}

pub fn document() -> InvoiceDocument {
    InvoiceDocument::from_bytes(b"%PDF-1.4 demo invoice".to_vec())
}

pub async fn deploy(engine: &Arc<InMemoryEngine>) -> Vec<ProcessDefinition> {
    deploy_invoice_process(engine.as_ref()).await.unwrap()
}

pub async fn seed(engine: &Arc<InMemoryEngine>, reconcile: bool) -> SeedOutcome {
    engine
        .services()
        .sample_data_generator(SeedOptions { reconcile })
        .generate()
        .await
        .unwrap()
}

pub fn starter(engine: &Arc<InMemoryEngine>) -> InvoiceInstanceStarter {
    InvoiceInstanceStarter::from_services(&engine.services(), document())
}
