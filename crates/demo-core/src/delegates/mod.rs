//! Service-task delegates
//!
//! The engine calls a delegate when a token reaches a service task bound to
//! the delegate's name. An error aborts the engine call that got there and
//! leaves the instance unchanged.

pub mod archive_invoice;
pub mod notify_creditor;

pub use archive_invoice::ArchiveInvoiceDelegate;
pub use notify_creditor::NotifyCreditorDelegate;

use uuid::Uuid;

use crate::domain::{VariableValue, Variables};
use crate::error::DomainError;

pub const ARCHIVE_INVOICE_DELEGATE: &str = "archiveInvoiceService";
pub const NOTIFY_CREDITOR_DELEGATE: &str = "notifyCreditorService";

/// View of the instance handed to a delegate.
pub struct DelegateExecution<'a> {
    pub process_instance_id: Uuid,
    pub activity_id: &'a str,
    variables: &'a Variables,
}

impl<'a> DelegateExecution<'a> {
    pub fn new(process_instance_id: Uuid, activity_id: &'a str, variables: &'a Variables) -> Self {
        Self {
            process_instance_id,
            activity_id,
            variables,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&VariableValue> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &Variables {
        self.variables
    }
}

pub trait Delegate: Send + Sync {
    fn execute(&self, execution: &DelegateExecution<'_>) -> Result<(), DomainError>;
}
