// ============================================================================
// Demo Engine - Metrics Reporter
// File: crates/demo-engine/src/metrics.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use demo_core::ports::MetricsReporter;
use demo_core::DomainError;

use crate::engine::InMemoryEngine;

/// Engine activity counted between two reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsCounters {
    pub root_process_instance_start: u64,
    pub activity_instance_start: u64,
    pub activity_instance_end: u64,
}

impl MetricsCounters {
    pub fn is_empty(&self) -> bool {
        *self == MetricsCounters::default()
    }

    fn add(&mut self, other: MetricsCounters) {
        self.root_process_instance_start += other.root_process_instance_start;
        self.activity_instance_start += other.activity_instance_start;
        self.activity_instance_end += other.activity_instance_end;
    }
}

/// One flush of the counters, stamped with engine time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsReport {
    pub reporter_id: String,
    pub timestamp: DateTime<Utc>,
    pub counters: MetricsCounters,
}

#[derive(Default)]
pub(crate) struct MetricsState {
    reporter_id: Option<String>,
    pending: MetricsCounters,
    reports: Vec<MetricsReport>,
}

impl InMemoryEngine {
    pub(crate) fn record_metrics(&self, counters: MetricsCounters) {
        self.metrics.lock().pending.add(counters);
    }

    /// Reports flushed so far, oldest first.
    pub fn reports(&self) -> Vec<MetricsReport> {
        self.metrics.lock().reports.clone()
    }

    pub fn pending_metrics(&self) -> MetricsCounters {
        self.metrics.lock().pending
    }
}

#[async_trait]
impl MetricsReporter for InMemoryEngine {
    fn activate(&self, reporter_id: &str) {
        self.metrics.lock().reporter_id = Some(reporter_id.to_string());
        info!(reporter_id, "Metrics reporter activated");
    }

    fn deactivate(&self) {
        self.metrics.lock().reporter_id = None;
        info!("Metrics reporter deactivated");
    }

    fn is_active(&self) -> bool {
        self.metrics.lock().reporter_id.is_some()
    }

    async fn report_now(&self) -> Result<(), DomainError> {
        let timestamp = self.clock.now();
        let mut metrics = self.metrics.lock();
        let Some(reporter_id) = metrics.reporter_id.clone() else {
            return Ok(());
        };

        let counters = std::mem::take(&mut metrics.pending);
        debug!(
            reporter_id = %reporter_id,
            instances = counters.root_process_instance_start,
            activities = counters.activity_instance_start,
            "Metrics reported"
        );
        metrics.reports.push(MetricsReport {
            reporter_id,
            timestamp,
            counters,
        });
        Ok(())
    }
}
