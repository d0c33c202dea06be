use tracing::info;

use super::{Delegate, DelegateExecution};
use crate::error::DomainError;

/// Stands in for telling the creditor that an invoice was rejected.
pub struct NotifyCreditorDelegate;

impl Delegate for NotifyCreditorDelegate {
    fn execute(&self, execution: &DelegateExecution<'_>) -> Result<(), DomainError> {
        let creditor = execution
            .variable("creditor")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        info!(
            process_instance_id = %execution.process_instance_id,
            activity = execution.activity_id,
            "\n\n  ... Now notifying creditor {}\n\n",
            creditor
        );
        Ok(())
    }
}
