//! Engine metrics reporter trait (port)

use async_trait::async_trait;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsReporter: Send + Sync {
    fn activate(&self, reporter_id: &str);
    fn deactivate(&self);
    fn is_active(&self) -> bool;

    /// Flushes the counters collected since the last report. No-op while inactive.
    async fn report_now(&self) -> Result<(), DomainError>;
}
