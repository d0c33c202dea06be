// ============================================================================
// Demo Core - Invoice Process Application
// File: crates/demo-core/src/invoice.rs
// Description: Invoice process models, deployment and the invoice document
// ============================================================================

use std::path::Path;
use tracing::{debug, info};

use crate::delegates::{ARCHIVE_INVOICE_DELEGATE, NOTIFY_CREDITOR_DELEGATE};
use crate::domain::{Activity, FileValue, Flow, ProcessDefinition, ProcessModel};
use crate::error::DomainError;
use crate::ports::RepositoryService;
use crate::services::sample_data::{ACCOUNTING_GROUP_ID, DEMO_USER_ID};

pub const INVOICE_PROCESS_KEY: &str = "invoice";
pub const INVOICE_PROCESS_NAME: &str = "Invoice Receipt";

pub const APPROVE_INVOICE: &str = "approveInvoice";
pub const PREPARE_BANK_TRANSFER: &str = "prepareBankTransfer";
pub const ARCHIVE_INVOICE: &str = "archiveInvoice";
pub const REVIEW_INVOICE: &str = "reviewInvoice";
pub const NOTIFY_CREDITOR: &str = "notifyCreditor";

pub const INVOICE_PDF: &str = "invoice.pdf";
pub const INVOICE_MIME_TYPE: &str = "application/pdf";

fn approved_path() -> [Activity; 2] {
    [
        Activity::user_task(
            PREPARE_BANK_TRANSFER,
            "Prepare Bank Transfer",
            None,
            &[ACCOUNTING_GROUP_ID],
            Flow::Goto(ARCHIVE_INVOICE.to_string()),
        ),
        Activity::service_task(ARCHIVE_INVOICE, "Archive Invoice", ARCHIVE_INVOICE_DELEGATE, Flow::End),
    ]
}

/// Version 1: a rejected invoice simply ends.
pub fn invoice_model_v1() -> ProcessModel {
    let mut activities = vec![Activity::user_task(
        APPROVE_INVOICE,
        "Approve Invoice",
        None,
        &[ACCOUNTING_GROUP_ID],
        Flow::IfTrue {
            variable: "approved".to_string(),
            then: PREPARE_BANK_TRANSFER.to_string(),
            otherwise: None,
        },
    )];
    activities.extend(approved_path());
    ProcessModel {
        start: APPROVE_INVOICE.to_string(),
        activities,
    }
}

/// Version 2: a rejected invoice goes to review; unless clarified the
/// creditor is notified, otherwise it returns to approval.
pub fn invoice_model_v2() -> ProcessModel {
    let mut activities = vec![
        Activity::user_task(
            APPROVE_INVOICE,
            "Approve Invoice",
            None,
            &[ACCOUNTING_GROUP_ID],
            Flow::IfTrue {
                variable: "approved".to_string(),
                then: PREPARE_BANK_TRANSFER.to_string(),
                otherwise: Some(REVIEW_INVOICE.to_string()),
            },
        ),
        Activity::user_task(
            REVIEW_INVOICE,
            "Review Invoice",
            Some(DEMO_USER_ID),
            &[],
            Flow::IfTrue {
                variable: "clarified".to_string(),
                then: APPROVE_INVOICE.to_string(),
                otherwise: Some(NOTIFY_CREDITOR.to_string()),
            },
        ),
        Activity::service_task(NOTIFY_CREDITOR, "Notify Creditor", NOTIFY_CREDITOR_DELEGATE, Flow::End),
    ];
    activities.extend(approved_path());
    ProcessModel {
        start: APPROVE_INVOICE.to_string(),
        activities,
    }
}

/// Deploys both invoice versions; the second becomes the latest.
pub async fn deploy_invoice_process(
    repository: &dyn RepositoryService,
) -> Result<Vec<ProcessDefinition>, DomainError> {
    let mut deployed = Vec::with_capacity(2);
    for model in [invoice_model_v1(), invoice_model_v2()] {
        let definition = repository
            .deploy(INVOICE_PROCESS_KEY, INVOICE_PROCESS_NAME, model)
            .await?;
        info!(
            definition_id = %definition.id,
            version = definition.version,
            "Deployed invoice process"
        );
        deployed.push(definition);
    }
    Ok(deployed)
}

/// The PDF attached to every demo invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    bytes: Vec<u8>,
}

impl InvoiceDocument {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let bytes = tokio::fs::read(path.as_ref())
            .await
            .map_err(|_| DomainError::DocumentUnavailable(INVOICE_PDF.to_string()))?;
        debug!(path = %path.as_ref().display(), bytes = bytes.len(), "Invoice document loaded");
        Ok(Self { bytes })
    }

    pub fn to_file_value(&self) -> FileValue {
        FileValue::new(INVOICE_PDF, INVOICE_MIME_TYPE, self.bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityKind, Variables};

    #[test]
    fn test_models_are_valid() {
        assert!(invoice_model_v1().validate().is_ok());
        assert!(invoice_model_v2().validate().is_ok());
    }

    #[test]
    fn test_v2_rejection_goes_to_review() {
        let model = invoice_model_v2();
        let approve = model.activity(APPROVE_INVOICE).unwrap();
        let next = model.next_after(approve, &Variables::new().put("approved", false));
        assert_eq!(next.as_deref(), Some(REVIEW_INVOICE));

        let review = model.activity(REVIEW_INVOICE).unwrap();
        assert!(matches!(
            &review.kind,
            ActivityKind::UserTask { assignee: Some(a), .. } if a == DEMO_USER_ID
        ));
    }

    #[test]
    fn test_v1_rejection_ends() {
        let model = invoice_model_v1();
        let approve = model.activity(APPROVE_INVOICE).unwrap();
        assert_eq!(model.next_after(approve, &Variables::new().put("approved", false)), None);
    }

    #[tokio::test]
    async fn test_missing_document_file() {
        let err = InvoiceDocument::load("does/not/exist/invoice.pdf").await.unwrap_err();
        assert_eq!(err, DomainError::DocumentUnavailable("invoice.pdf".to_string()));
        assert_eq!(err.to_string(), "Couldn't read invoice.pdf file");
    }
}
