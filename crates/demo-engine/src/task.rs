// ============================================================================
// Demo Engine - Task Service
// File: crates/demo-engine/src/task.rs
// ============================================================================

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use demo_core::domain::{Authentication, Comment, Task, TaskOperation, TaskOperationEntry, Variables};
use demo_core::ports::TaskService;
use demo_core::DomainError;

use crate::engine::InMemoryEngine;
use crate::metrics::MetricsCounters;

fn task_not_found(task_id: Uuid) -> DomainError {
    DomainError::TaskNotFound(task_id.to_string())
}

impl InMemoryEngine {
    /// Claims and completions, oldest first.
    pub fn task_operations(&self) -> Vec<TaskOperationEntry> {
        self.state.read().operations.clone()
    }

    fn operation_entry(
        &self,
        task: &Task,
        operation: TaskOperation,
        authentication: &Authentication,
    ) -> TaskOperationEntry {
        TaskOperationEntry {
            task_id: task.id,
            process_instance_id: task.process_instance_id,
            operation,
            user_id: authentication.user_id.clone(),
            time: self.clock.now(),
        }
    }
}

#[async_trait]
impl TaskService for InMemoryEngine {
    async fn find_task(&self, task_id: Uuid) -> Result<Option<Task>, DomainError> {
        Ok(self.state.read().tasks.iter().find(|t| t.id == task_id).cloned())
    }

    async fn tasks_for_instance(&self, process_instance_id: Uuid) -> Result<Vec<Task>, DomainError> {
        Ok(self
            .state
            .read()
            .tasks
            .iter()
            .filter(|t| t.process_instance_id == process_instance_id)
            .cloned()
            .collect())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, DomainError> {
        Ok(self.state.read().tasks.clone())
    }

    async fn claim(&self, task_id: Uuid, user_id: &str, authentication: &Authentication) -> Result<(), DomainError> {
        let mut state = self.state.write();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| task_not_found(task_id))?;

        if let Some(assignee) = task.assignee.as_deref().filter(|a| *a != user_id) {
            return Err(DomainError::TaskAlreadyClaimed {
                task_id,
                assignee: assignee.to_string(),
            });
        }
        task.assignee = Some(user_id.to_string());
        let entry = self.operation_entry(task, TaskOperation::Claim, authentication);
        state.operations.push(entry);
        debug!(%task_id, user_id, by = %authentication.user_id, "Task claimed");
        Ok(())
    }

    async fn complete(
        &self,
        task_id: Uuid,
        variables: Variables,
        authentication: &Authentication,
    ) -> Result<(), DomainError> {
        let (task, mut instance) = {
            let state = self.state.read();
            let task = state
                .tasks
                .iter()
                .find(|t| t.id == task_id)
                .cloned()
                .ok_or_else(|| task_not_found(task_id))?;
            let instance = state
                .instances
                .get(&task.process_instance_id)
                .cloned()
                .ok_or(DomainError::ProcessInstanceNotFound(task.process_instance_id))?;
            (task, instance)
        };
        let definition = self.definition_by_id(&instance.definition_id)?;
        let activity = definition
            .model
            .activity(&task.task_definition_key)
            .ok_or_else(|| {
                DomainError::InternalError(format!(
                    "task {} points at unknown activity '{}'",
                    task.id, task.task_definition_key
                ))
            })?;

        instance.variables.merge(variables);
        let mut counters = MetricsCounters {
            activity_instance_end: 1,
            ..Default::default()
        };
        let next = definition.model.next_after(activity, &instance.variables);
        let follow_up = self.advance(&definition, &mut instance, next, &mut counters)?;

        let entry = self.operation_entry(&task, TaskOperation::Complete, authentication);
        {
            let mut state = self.state.write();
            let position = state
                .tasks
                .iter()
                .position(|t| t.id == task_id)
                .ok_or_else(|| task_not_found(task_id))?;
            state.tasks.remove(position);
            state.operations.push(entry);
            state.tasks.extend(follow_up);
            state.instances.insert(instance.id, instance.clone());
        }
        self.record_metrics(counters);

        info!(
            %task_id,
            instance_id = %instance.id,
            running = instance.is_running(),
            by = %authentication.user_id,
            "Task completed"
        );
        Ok(())
    }

    async fn create_comment(
        &self,
        task_id: Option<Uuid>,
        process_instance_id: Uuid,
        message: &str,
        authentication: &Authentication,
    ) -> Result<Comment, DomainError> {
        let mut state = self.state.write();
        if !state.instances.contains_key(&process_instance_id) {
            return Err(DomainError::ProcessInstanceNotFound(process_instance_id));
        }
        if let Some(task_id) = task_id {
            if !state.tasks.iter().any(|t| t.id == task_id) {
                return Err(task_not_found(task_id));
            }
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            task_id,
            process_instance_id,
            user_id: authentication.user_id.clone(),
            message: message.to_string(),
            time: self.clock.now(),
        };
        state.comments.push(comment.clone());
        debug!(%process_instance_id, user_id = %comment.user_id, "Comment added");
        Ok(comment)
    }

    async fn instance_comments(&self, process_instance_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .state
            .read()
            .comments
            .iter()
            .filter(|c| c.process_instance_id == process_instance_id)
            .cloned()
            .collect())
    }
}
