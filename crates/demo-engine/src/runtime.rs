// ============================================================================
// Demo Engine - Runtime Service
// File: crates/demo-engine/src/runtime.rs
// Description: Instance start and token execution
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use demo_core::delegates::DelegateExecution;
use demo_core::domain::{ActivityKind, InstanceState, ProcessDefinition, ProcessInstance, Task, Variables};
use demo_core::ports::RuntimeService;
use demo_core::DomainError;

use crate::engine::InMemoryEngine;
use crate::metrics::MetricsCounters;

/// Upper bound on activities a single engine call may pass through.
const MAX_STEPS: usize = 1_000;

impl InMemoryEngine {
    pub(crate) fn definition_by_id(&self, definition_id: &str) -> Result<ProcessDefinition, DomainError> {
        self.state
            .read()
            .definitions
            .iter()
            .find(|d| d.id == definition_id)
            .cloned()
            .ok_or_else(|| DomainError::ProcessDefinitionNotFound {
                key: definition_id.to_string(),
                version: "any".to_string(),
            })
    }

    /// Moves the token from `next` until it waits in a user task or the
    /// instance ends. Works on the caller's copy of the instance; the caller
    /// commits it only when this succeeds.
    pub(crate) fn advance(
        &self,
        definition: &ProcessDefinition,
        instance: &mut ProcessInstance,
        mut next: Option<String>,
        counters: &mut MetricsCounters,
    ) -> Result<Option<Task>, DomainError> {
        let now = self.clock.now();

        for _ in 0..MAX_STEPS {
            let Some(activity_id) = next else {
                instance.state = InstanceState::Completed;
                instance.current_activity = None;
                instance.ended_at = Some(now);
                debug!(instance_id = %instance.id, "Process instance completed");
                return Ok(None);
            };

            let activity = definition.model.activity(&activity_id).ok_or_else(|| {
                DomainError::InternalError(format!(
                    "activity '{}' missing from {}",
                    activity_id, definition.id
                ))
            })?;
            counters.activity_instance_start += 1;

            match &activity.kind {
                ActivityKind::UserTask {
                    assignee,
                    candidate_groups,
                } => {
                    instance.current_activity = Some(activity.id.clone());
                    return Ok(Some(Task {
                        id: Uuid::new_v4(),
                        name: activity.name.clone(),
                        task_definition_key: activity.id.clone(),
                        process_instance_id: instance.id,
                        process_definition_id: definition.id.clone(),
                        assignee: assignee.clone(),
                        candidate_groups: candidate_groups.clone(),
                        created_at: now,
                    }));
                }
                ActivityKind::ServiceTask { delegate } => {
                    let delegate = self.delegate(delegate)?;
                    let execution = DelegateExecution::new(instance.id, &activity.id, &instance.variables);
                    delegate.execute(&execution)?;
                    counters.activity_instance_end += 1;
                    next = definition.model.next_after(activity, &instance.variables);
                }
            }
        }

        Err(DomainError::InternalError(format!(
            "instance {} passed {} activities without waiting",
            instance.id, MAX_STEPS
        )))
    }
}

#[async_trait]
impl RuntimeService for InMemoryEngine {
    async fn start_process_instance_by_id(
        &self,
        definition_id: &str,
        variables: Variables,
    ) -> Result<ProcessInstance, DomainError> {
        let definition = self.definition_by_id(definition_id)?;

        let mut instance = ProcessInstance {
            id: Uuid::new_v4(),
            definition_id: definition.id.clone(),
            definition_key: definition.key.clone(),
            variables,
            state: InstanceState::Running,
            current_activity: None,
            started_at: self.clock.now(),
            ended_at: None,
        };
        let mut counters = MetricsCounters {
            root_process_instance_start: 1,
            ..Default::default()
        };
        let task = self.advance(
            &definition,
            &mut instance,
            Some(definition.model.start.clone()),
            &mut counters,
        )?;

        {
            let mut state = self.state.write();
            state.tasks.extend(task);
            state.instances.insert(instance.id, instance.clone());
        }
        self.record_metrics(counters);

        info!(
            instance_id = %instance.id,
            definition_id = %instance.definition_id,
            started_at = %instance.started_at,
            "Process instance started"
        );
        Ok(instance)
    }

    async fn count_running_instances(&self, definition_id: &str) -> Result<u64, DomainError> {
        let count = self
            .state
            .read()
            .instances
            .values()
            .filter(|i| i.definition_id == definition_id && i.is_running())
            .count();
        Ok(count as u64)
    }

    async fn find_process_instance(&self, instance_id: Uuid) -> Result<Option<ProcessInstance>, DomainError> {
        Ok(self.state.read().instances.get(&instance_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demo_core::delegates::{Delegate, ARCHIVE_INVOICE_DELEGATE};
    use demo_core::domain::{Activity, Flow, ProcessModel};
    use demo_core::ports::RepositoryService;
    use demo_security::PasswordCost;

    struct Looping;

    impl Delegate for Looping {
        fn execute(&self, _execution: &DelegateExecution<'_>) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_service_loop_is_capped() {
        let engine = InMemoryEngine::builder()
            .password_cost(PasswordCost::Low)
            .delegate("loop", Looping)
            .build()
            .unwrap();
        let model = ProcessModel {
            start: "spin".to_string(),
            activities: vec![Activity::service_task("spin", "Spin", "loop", Flow::Goto("spin".to_string()))],
        };
        let definition = engine.deploy("spin", "Spin", model).await.unwrap();

        let err = engine
            .start_process_instance_by_id(&definition.id, Variables::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InternalError(_)));
        assert_eq!(engine.count_running_instances(&definition.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unregistered_delegate_fails_start() {
        let engine = InMemoryEngine::builder()
            .password_cost(PasswordCost::Low)
            .build()
            .unwrap();
        let model = ProcessModel {
            start: "archive".to_string(),
            activities: vec![Activity::service_task(
                "archive",
                "Archive",
                ARCHIVE_INVOICE_DELEGATE,
                Flow::End,
            )],
        };
        let definition = engine.deploy("archive", "Archive", model).await.unwrap();

        let err = engine
            .start_process_instance_by_id(&definition.id, Variables::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DelegateFailed(_)));
    }

    #[tokio::test]
    async fn test_unknown_definition() {
        let engine = InMemoryEngine::builder()
            .password_cost(PasswordCost::Low)
            .build()
            .unwrap();
        let err = engine
            .start_process_instance_by_id("invoice:9:nope", Variables::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ProcessDefinitionNotFound { .. }));
    }
}
