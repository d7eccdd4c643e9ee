use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, MessageResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};
use crate::{
    core::utils::{date_to_string_opt, datetime_to_string, datetime_to_string_opt},
    impl_guard_error, impl_wedding_guard_error,
    model::task::{Task, TaskPriority, TaskStatus},
};

#[derive(Object, Deserialize)]
pub struct DetailTask {
    pub id: String,
    pub wedding_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completed_at: Option<String>,
    pub display_order: i32,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for DetailTask {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            wedding_id: task.wedding_id.to_string(),
            title: task.title,
            description: task.description,
            category: task.category,
            due_date: date_to_string_opt(task.due_date),
            status: task.status.parse().unwrap_or_default(),
            priority: task.priority.parse().unwrap_or_default(),
            completed_at: datetime_to_string_opt(task.completed_at),
            display_order: task.display_order,
            notes: task.notes,
            created_at: datetime_to_string(task.created_at),
            updated_at: datetime_to_string(task.updated_at),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct TaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// `YYYY-MM-DD`
    pub due_date: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub display_order: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct TaskStatusRequest {
    pub status: TaskStatus,
}

#[derive(ApiResponse)]
pub enum GetPaginateTaskResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailTask>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum TaskCreateResponses {
    #[oai(status = 201)]
    Created(Json<MessageResponse<DetailTask>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum TaskUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse<DetailTask>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_guard_error!(
    GetPaginateTaskResponses,
    TaskCreateResponses,
    TaskUpdateResponses,
);

impl_wedding_guard_error!(
    GetPaginateTaskResponses,
    TaskCreateResponses,
    TaskUpdateResponses,
);
