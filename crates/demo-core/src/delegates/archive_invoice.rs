use tracing::info;

use super::{Delegate, DelegateExecution};
use crate::domain::VariableValue;
use crate::error::DomainError;

/// Stands in for archiving the invoice document. Setting the boolean
/// variable `shouldFail` makes it fail, to demo incidents.
pub struct ArchiveInvoiceDelegate;

impl Delegate for ArchiveInvoiceDelegate {
    fn execute(&self, execution: &DelegateExecution<'_>) -> Result<(), DomainError> {
        if execution.variables().get_bool("shouldFail") == Some(true) {
            return Err(DomainError::DelegateFailed(
                "Could not archive invoice...".to_string(),
            ));
        }

        let filename = match execution.variable("invoiceDocument") {
            Some(VariableValue::File(file)) => file.filename.clone(),
            _ => {
                return Err(DomainError::DelegateFailed(
                    "invoiceDocument is missing or not a file".to_string(),
                ))
            }
        };
        let invoice_number = execution
            .variable("invoiceNumber")
            .map(|v| v.to_string())
            .unwrap_or_default();

        info!(
            process_instance_id = %execution.process_instance_id,
            activity = execution.activity_id,
            "\n\n  ... Now archiving invoice {}, filename: {} \n\n",
            invoice_number,
            filename
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileValue, Variables};
    use uuid::Uuid;

    fn invoice() -> Variables {
        Variables::new()
            .put("invoiceNumber", "BOS-43934")
            .put("invoiceDocument", FileValue::new("invoice.pdf", "application/pdf", vec![]))
    }

    #[test]
    fn test_archive_succeeds() {
        let vars = invoice();
        let execution = DelegateExecution::new(Uuid::new_v4(), "archiveInvoice", &vars);
        assert!(ArchiveInvoiceDelegate.execute(&execution).is_ok());
    }

    #[test]
    fn test_should_fail_flag() {
        let vars = invoice().put("shouldFail", true);
        let execution = DelegateExecution::new(Uuid::new_v4(), "archiveInvoice", &vars);
        let err = ArchiveInvoiceDelegate.execute(&execution).unwrap_err();
        assert_eq!(err, DomainError::DelegateFailed("Could not archive invoice...".to_string()));
    }

    #[test]
    fn test_should_fail_false_archives() {
        let vars = invoice().put("shouldFail", false);
        let execution = DelegateExecution::new(Uuid::new_v4(), "archiveInvoice", &vars);
        assert!(ArchiveInvoiceDelegate.execute(&execution).is_ok());
    }

    #[test]
    fn test_missing_document() {
        let vars = Variables::new().put("invoiceNumber", "X-1");
        let execution = DelegateExecution::new(Uuid::new_v4(), "archiveInvoice", &vars);
        assert!(matches!(
            ArchiveInvoiceDelegate.execute(&execution),
            Err(DomainError::DelegateFailed(_))
        ));
    }
}
