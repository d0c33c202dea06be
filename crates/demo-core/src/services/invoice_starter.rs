// ============================================================================
// Demo Core - Invoice Instance Starter
// File: crates/demo-core/src/services/invoice_starter.rs
// Description: Starts the scripted invoice instances of the demo environment
// ============================================================================

use chrono::Duration;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::clock::EngineClock;
use crate::domain::{ProcessDefinition, ProcessInstance, Task, Variables};
use crate::error::DomainError;
use crate::invoice::InvoiceDocument;
use crate::ports::{MetricsReporter, RepositoryService, RuntimeService, TaskService};
use crate::services::sample_data::{demo_admin_authentication, DEMO_USER_ID};
use crate::services::EngineServices;

pub const MISSING_AMOUNT_COMMENT: &str =
    "I cannot approve this invoice: the amount is missing.\n\n Could you please provide the amount?";

/// Canned invoice data: creditor, amount, category, number.
struct InvoiceFixture {
    creditor: &'static str,
    amount: f64,
    category: &'static str,
    number: &'static str,
}

const GREAT_PIZZA: InvoiceFixture = InvoiceFixture {
    creditor: "Great Pizza for Everyone Inc.",
    amount: 30.0,
    category: "Travel Expenses",
    number: "GPFE-23232323",
};

const BOBBYS_OFFICE_SUPPLIES: InvoiceFixture = InvoiceFixture {
    creditor: "Bobby's Office Supplies",
    amount: 900.0,
    category: "Misc",
    number: "BOS-43934",
};

const PAPA_STEVES: InvoiceFixture = InvoiceFixture {
    creditor: "Papa Steve's all you can eat",
    amount: 10.99,
    category: "Travel Expenses",
    number: "PSACE-5342",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Instances of the definition were already running; none were started.
    AlreadyRunning { definition_id: String, running: u64 },
    Started { definition_id: String, instance_ids: Vec<Uuid> },
}

pub struct InvoiceInstanceStarter {
    repository: Arc<dyn RepositoryService>,
    runtime: Arc<dyn RuntimeService>,
    tasks: Arc<dyn TaskService>,
    metrics: Arc<dyn MetricsReporter>,
    clock: Arc<EngineClock>,
    document: InvoiceDocument,
}

impl InvoiceInstanceStarter {
    pub fn new(
        repository: Arc<dyn RepositoryService>,
        runtime: Arc<dyn RuntimeService>,
        tasks: Arc<dyn TaskService>,
        metrics: Arc<dyn MetricsReporter>,
        clock: Arc<EngineClock>,
        document: InvoiceDocument,
    ) -> Self {
        Self {
            repository,
            runtime,
            tasks,
            metrics,
            clock,
            document,
        }
    }

    pub fn from_services(services: &EngineServices, document: InvoiceDocument) -> Self {
        Self::new(
            services.repository.clone(),
            services.runtime.clone(),
            services.tasks.clone(),
            services.metrics.clone(),
            services.clock.clone(),
            document,
        )
    }

    /// Starts the three demo invoices on `key` at `version`, or the latest
    /// version when `None`. Does nothing while any instance of that
    /// definition is still running.
    pub async fn start_instances(&self, key: &str, version: Option<i32>) -> Result<StartOutcome, DomainError> {
        let definition = self
            .repository
            .find_definition(key, version)
            .await?
            .ok_or_else(|| DomainError::ProcessDefinitionNotFound {
                key: key.to_string(),
                version: version.map_or_else(|| "latest".to_string(), |v| v.to_string()),
            })?;

        let running = self.runtime.count_running_instances(&definition.id).await?;
        if running != 0 {
            info!(
                "No new instances of {} version {} started, there are {} instances running",
                definition.name, definition.version, running
            );
            return Ok(StartOutcome::AlreadyRunning {
                definition_id: definition.id,
                running,
            });
        }

        info!("Start 3 instances of {}, version {}", definition.name, definition.version);

        let instance_ids = vec![
            self.start_fresh(&definition).await?,
            self.start_approved(&definition).await?,
            self.start_missing_amount(&definition).await?,
        ];

        Ok(StartOutcome::Started {
            definition_id: definition.id,
            instance_ids,
        })
    }

    async fn start_fresh(&self, definition: &ProcessDefinition) -> Result<Uuid, DomainError> {
        let instance = self.start_invoice(definition, &GREAT_PIZZA).await?;
        self.metrics.report_now().await?;
        Ok(instance.id)
    }

    /// Started two weeks ago, approved by `demo` today.
    async fn start_approved(&self, definition: &ProcessDefinition) -> Result<Uuid, DomainError> {
        let now = self.clock.now();
        let clock = self.clock.travel_to(now - Duration::days(14));

        let instance = self.start_invoice(definition, &BOBBYS_OFFICE_SUPPLIES).await?;
        self.metrics.report_now().await?;

        clock.set(now);
        let authentication = demo_admin_authentication();
        let task = self.single_task(instance.id).await?;
        self.tasks.claim(task.id, DEMO_USER_ID, &authentication).await?;
        self.tasks
            .complete(task.id, Variables::new().put("approved", true), &authentication)
            .await?;
        self.metrics.report_now().await?;

        Ok(instance.id)
    }

    /// Started five days ago, rejected by `demo` today with a comment.
    async fn start_missing_amount(&self, definition: &ProcessDefinition) -> Result<Uuid, DomainError> {
        let now = self.clock.now();
        let clock = self.clock.travel_to(now - Duration::days(5));

        let instance = self.start_invoice(definition, &PAPA_STEVES).await?;
        self.metrics.report_now().await?;

        clock.set(now);
        let authentication = demo_admin_authentication();
        let task = self.single_task(instance.id).await?;
        self.tasks
            .create_comment(None, instance.id, MISSING_AMOUNT_COMMENT, &authentication)
            .await?;
        self.tasks
            .complete(task.id, Variables::new().put("approved", false), &authentication)
            .await?;
        self.metrics.report_now().await?;

        Ok(instance.id)
    }

    async fn start_invoice(
        &self,
        definition: &ProcessDefinition,
        fixture: &InvoiceFixture,
    ) -> Result<ProcessInstance, DomainError> {
        let variables = Variables::new()
            .put("creditor", fixture.creditor)
            .put("amount", fixture.amount)
            .put("invoiceCategory", fixture.category)
            .put("invoiceNumber", fixture.number)
            .put("invoiceDocument", self.document.to_file_value());
        self.runtime
            .start_process_instance_by_id(&definition.id, variables)
            .await
    }

    async fn single_task(&self, instance_id: Uuid) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.tasks_for_instance(instance_id).await?;
        match tasks.len() {
            1 => Ok(tasks.remove(0)),
            0 => Err(DomainError::TaskNotFound(format!("no task for instance {}", instance_id))),
            n => Err(DomainError::InternalError(format!(
                "expected one task for instance {}, found {}",
                instance_id, n
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstanceState, ProcessModel};
    use crate::ports::{MockMetricsReporter, MockRepositoryService, MockRuntimeService, MockTaskService};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn definition() -> ProcessDefinition {
        ProcessDefinition {
            id: "invoice:2:abc".to_string(),
            key: "invoice".to_string(),
            name: "Invoice Receipt".to_string(),
            version: 2,
            model: ProcessModel {
                start: "approveInvoice".to_string(),
                activities: vec![],
            },
        }
    }

    fn running_instance(definition_id: &str, variables: Variables) -> ProcessInstance {
        ProcessInstance {
            id: Uuid::new_v4(),
            definition_id: definition_id.to_string(),
            definition_key: "invoice".to_string(),
            variables,
            state: InstanceState::Running,
            current_activity: Some("approveInvoice".to_string()),
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    fn starter(
        repository: MockRepositoryService,
        runtime: MockRuntimeService,
        tasks: MockTaskService,
        metrics: MockMetricsReporter,
    ) -> InvoiceInstanceStarter {
        InvoiceInstanceStarter::new(
            Arc::new(repository),
            Arc::new(runtime),
            Arc::new(tasks),
            Arc::new(metrics),
            Arc::new(EngineClock::system()),
            InvoiceDocument::from_bytes(b"%PDF-1.4".to_vec()),
        )
    }

    #[tokio::test]
    async fn test_missing_definition() {
        let mut repository = MockRepositoryService::new();
        repository.expect_find_definition().returning(|_, _| Ok(None));

        let err = starter(
            repository,
            MockRuntimeService::new(),
            MockTaskService::new(),
            MockMetricsReporter::new(),
        )
        .start_instances("invoice", Some(7))
        .await
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::ProcessDefinitionNotFound {
                key: "invoice".to_string(),
                version: "7".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_running_instances_block_start() {
        let mut repository = MockRepositoryService::new();
        repository.expect_find_definition().returning(|_, _| Ok(Some(definition())));
        let mut runtime = MockRuntimeService::new();
        runtime.expect_count_running_instances().returning(|_| Ok(3));
        runtime.expect_start_process_instance_by_id().never();

        let outcome = starter(repository, runtime, MockTaskService::new(), MockMetricsReporter::new())
            .start_instances("invoice", None)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            StartOutcome::AlreadyRunning {
                definition_id: "invoice:2:abc".to_string(),
                running: 3
            }
        );
    }

    #[tokio::test]
    async fn test_scripted_run_reports_after_every_step() {
        let mut repository = MockRepositoryService::new();
        repository.expect_find_definition().returning(|_, _| Ok(Some(definition())));

        let mut runtime = MockRuntimeService::new();
        runtime.expect_count_running_instances().returning(|_| Ok(0));
        runtime
            .expect_start_process_instance_by_id()
            .times(3)
            .returning(|definition_id: &str, variables: Variables| {
                assert_eq!(variables.get_file("invoiceDocument").map(|f| f.filename.as_str()), Some("invoice.pdf"));
                Ok(running_instance(definition_id, variables))
            });

        let mut tasks = MockTaskService::new();
        tasks.expect_tasks_for_instance().times(2).returning(|instance_id| {
            Ok(vec![Task {
                id: Uuid::new_v4(),
                name: "Approve Invoice".to_string(),
                task_definition_key: "approveInvoice".to_string(),
                process_instance_id: instance_id,
                process_definition_id: "invoice:2:abc".to_string(),
                assignee: None,
                candidate_groups: vec!["accounting".to_string()],
                created_at: Utc::now(),
            }])
        });
        tasks
            .expect_claim()
            .withf(|_, user_id, authentication| {
                user_id.to_string() == DEMO_USER_ID && *authentication == demo_admin_authentication()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        tasks
            .expect_complete()
            .withf(|_, _, authentication| *authentication == demo_admin_authentication())
            .times(2)
            .returning(|_, _, _| Ok(()));
        tasks
            .expect_create_comment()
            .withf(|task_id, _, message, _| task_id.is_none() && message.to_string() == MISSING_AMOUNT_COMMENT)
            .times(1)
            .returning(|task_id, instance_id, message: &str, authentication| {
                Ok(crate::domain::Comment {
                    id: Uuid::new_v4(),
                    task_id,
                    process_instance_id: instance_id,
                    user_id: authentication.user_id.clone(),
                    message: message.to_string(),
                    time: Utc::now(),
                })
            });

        let mut metrics = MockMetricsReporter::new();
        metrics.expect_report_now().times(5).returning(|| Ok(()));

        let starter = starter(repository, runtime, tasks, metrics);
        let outcome = starter.start_instances("invoice", None).await.unwrap();

        match outcome {
            StartOutcome::Started { instance_ids, .. } => assert_eq!(instance_ids.len(), 3),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!starter.clock.is_overridden());
    }

    #[tokio::test]
    async fn test_clock_restored_when_backdated_start_fails() {
        let mut repository = MockRepositoryService::new();
        repository.expect_find_definition().returning(|_, _| Ok(Some(definition())));
        let mut runtime = MockRuntimeService::new();
        runtime.expect_count_running_instances().returning(|_| Ok(0));
        let calls = AtomicUsize::new(0);
        runtime
            .expect_start_process_instance_by_id()
            .returning(move |definition_id: &str, variables: Variables| {
                // the second invoice is the first backdated one
                if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                    return Err(DomainError::InternalError("engine down".to_string()));
                }
                Ok(running_instance(definition_id, variables))
            });
        let mut metrics = MockMetricsReporter::new();
        metrics.expect_report_now().times(1).returning(|| Ok(()));

        let starter = starter(repository, runtime, MockTaskService::new(), metrics);
        let err = starter.start_instances("invoice", None).await.unwrap_err();
        assert_eq!(err, DomainError::InternalError("engine down".to_string()));
        assert!(!starter.clock.is_overridden());
    }
}
