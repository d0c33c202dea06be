// ============================================================================
// Demo API - Filter Handlers
// File: crates/demo-api/src/handlers/filters.rs
// ============================================================================
//! Task-list filters as seen by a user

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use demo_core::domain::{Authentication, Filter, FilterVariable, Task};
use demo_core::ports::{FilterService, IdentityService};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct FilterDto {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub priority: i32,
    pub variables: Vec<FilterVariable>,
}

impl From<Filter> for FilterDto {
    fn from(filter: Filter) -> Self {
        Self {
            id: filter.id,
            name: filter.name,
            owner: filter.owner,
            description: filter.properties.description,
            priority: filter.properties.priority,
            variables: filter.properties.variables,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id: Uuid,
    pub name: String,
    pub task_definition_key: String,
    pub process_instance_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub candidate_groups: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            name: task.name,
            task_definition_key: task.task_definition_key,
            process_instance_id: task.process_instance_id,
            assignee: task.assignee,
            candidate_groups: task.candidate_groups,
            created_at: task.created_at,
        }
    }
}

/// Resolves the caller and their groups from the identity service.
async fn authenticate(state: &AppState, user_id: &str) -> Result<Authentication, ApiError> {
    let identity = &state.services.identity;
    if identity.find_user(user_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("User not found: {}", user_id)));
    }
    let groups = identity.group_ids_of(user_id).await?;
    Ok(Authentication::new(user_id, groups))
}

/// List readable filters - GET /api/v1/filters?user_id=
pub async fn list_filters(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<FilterDto>>>, ApiError> {
    let authentication = authenticate(&state, &query.user_id).await?;
    let filters = state.services.filters.readable_filters(&authentication).await?;
    Ok(Json(ApiResponse::success(
        filters.into_iter().map(FilterDto::from).collect(),
    )))
}

/// Evaluate a filter - GET /api/v1/filters/{id}/tasks?user_id=
pub async fn filter_tasks(
    State(state): State<AppState>,
    Path(filter_id): Path<Uuid>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<TaskDto>>>, ApiError> {
    let authentication = authenticate(&state, &query.user_id).await?;
    let tasks = state
        .services
        .filters
        .filter_tasks(filter_id, &authentication)
        .await?;
    Ok(Json(ApiResponse::success(
        tasks.into_iter().map(TaskDto::from).collect(),
    )))
}
