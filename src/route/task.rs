use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        membership::{authorize_wedding, parse_id, WeddingAccess},
        security::{authorize, BearerAuthorization},
        utils::{non_blank, parse_date_opt},
    },
    model::task::{Task, TaskPriority, TaskStatus},
    repository::task::{
        create_task, delete_task, get_task_by_id, paginate_task, update_task, TaskFilter,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, MessageResponse, NotFoundResponse,
            PaginateResponse,
        },
        task::{
            DetailTask, GetPaginateTaskResponses, TaskCreateResponses, TaskRequest,
            TaskStatusRequest, TaskUpdateResponses,
        },
        wedding::WeddingDeleteResponses,
    },
    AppState,
};

#[derive(Tags)]
enum ApiTaskTags {
    Task,
}

pub struct ApiTask;

/// Copy the form onto `task`, keeping stored values for absent optional fields.
pub(crate) fn apply_task_request(
    task: &mut Task,
    req: &TaskRequest,
    now: DateTime<FixedOffset>,
) -> Result<(), String> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    task.title = title.to_string();
    if req.description.is_some() {
        task.description = non_blank(req.description.clone());
    }
    if req.category.is_some() {
        task.category = non_blank(req.category.clone());
    }
    if let Some(val) = &req.due_date {
        task.due_date =
            parse_date_opt(Some(val.as_str())).map_err(|_| "Invalid due date".to_string())?;
    }
    if let Some(val) = req.priority {
        task.priority = val.as_str().to_string();
    }
    if let Some(val) = req.display_order {
        task.display_order = val;
    }
    if req.notes.is_some() {
        task.notes = non_blank(req.notes.clone());
    }
    if let Some(val) = req.status {
        task.set_status(val, now);
    }
    Ok(())
}

fn blank_task(wedding_id: Uuid) -> Task {
    let now = Local::now().fixed_offset();
    Task {
        id: Uuid::now_v7(),
        wedding_id,
        title: String::new(),
        description: None,
        category: None,
        due_date: None,
        status: TaskStatus::default().as_str().to_string(),
        priority: TaskPriority::default().as_str().to_string(),
        completed_at: None,
        display_order: 0,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[OpenApi]
impl ApiTask {
    #[oai(path = "/weddings/tasks", method = "get", tag = "ApiTaskTags::Task")]
    #[allow(clippy::too_many_arguments)]
    async fn get_paginate_task_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(status): Query<Option<TaskStatus>>,
        Query(priority): Query<Option<TaskPriority>>,
        Query(category): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetPaginateTaskResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.task",
            "get_paginate_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Read,
            "route.task",
            "get_paginate_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(50);
        let filter = TaskFilter {
            search,
            status,
            priority,
            category,
        };
        match paginate_task(&mut tx, &wedding.id, page, page_size, filter).await {
            Ok((data, counts, page_count)) => {
                GetPaginateTaskResponses::Ok(Json(PaginateResponse {
                    counts,
                    page,
                    page_count,
                    page_size,
                    results: data.into_iter().map(DetailTask::from).collect(),
                }))
            }
            Err(err) => GetPaginateTaskResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.task",
                    "get_paginate_task_api",
                    "paginate task",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/weddings/tasks", method = "post", tag = "ApiTaskTags::Task")]
    async fn create_task_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        json: Json<TaskRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> TaskCreateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.task",
            "create_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Edit,
            "route.task",
            "create_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };

        let mut task = blank_task(wedding.id);
        let now = task.created_at;
        if let Err(message) = apply_task_request(&mut task, &json, now) {
            return TaskCreateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        if let Err(err) = create_task(&mut tx, &task).await {
            return TaskCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.task",
                    "create_task_api",
                    "create task",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return TaskCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.task",
                    "create_task_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        TaskCreateResponses::Created(Json(MessageResponse {
            message: "Task created successfully".to_string(),
            data: task.into(),
        }))
    }

    #[oai(path = "/weddings/tasks", method = "put", tag = "ApiTaskTags::Task")]
    async fn update_task_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(task_id): Query<Option<String>>,
        json: Json<TaskRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> TaskUpdateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.task",
            "update_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Edit,
            "route.task",
            "update_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let mut task =
            match find_task(&mut tx, &wedding.id, task_id.as_deref(), "update_task_api").await {
                Ok(val) => val,
                Err(err) => return err,
            };

        let now = Local::now().fixed_offset();
        if let Err(message) = apply_task_request(&mut task, &json, now) {
            return TaskUpdateResponses::BadRequest(Json(BadRequestResponse::new(&message)));
        }
        save_task(tx, task, now, "update_task_api", "Task updated successfully").await
    }

    /// Entering `completed` stamps `completed_at`, any other status clears it.
    #[oai(path = "/weddings/tasks/status", method = "put", tag = "ApiTaskTags::Task")]
    async fn update_task_status_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(task_id): Query<Option<String>>,
        json: Json<TaskStatusRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> TaskUpdateResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.task",
            "update_task_status_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Edit,
            "route.task",
            "update_task_status_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let mut task = match find_task(
            &mut tx,
            &wedding.id,
            task_id.as_deref(),
            "update_task_status_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err,
        };

        let now = Local::now().fixed_offset();
        task.set_status(json.status, now);
        save_task(tx, task, now, "update_task_status_api", "Task status updated").await
    }

    #[oai(path = "/weddings/tasks", method = "delete", tag = "ApiTaskTags::Task")]
    async fn delete_task_api(
        &self,
        Query(wedding_id): Query<Option<String>>,
        Query(task_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> WeddingDeleteResponses {
        let (mut tx, profile) = match authorize(
            &state,
            &auth,
            &[],
            "route.task",
            "delete_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let (wedding, _) = match authorize_wedding(
            &mut tx,
            &profile.id,
            wedding_id.as_deref(),
            WeddingAccess::Edit,
            "route.task",
            "delete_task_api",
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return err.into(),
        };
        let task_id = match parse_id(task_id.as_deref(), "Task") {
            Ok(val) => val,
            Err(err) => return WeddingDeleteResponses::BadRequest(Json(err)),
        };

        match delete_task(&mut tx, &wedding.id, &task_id).await {
            Ok(0) => {
                return WeddingDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "task",
                    "id",
                    &task_id.to_string(),
                )))
            }
            Ok(_) => {}
            Err(err) => {
                return WeddingDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.task",
                        "delete_task_api",
                        "delete task",
                        &err.to_string(),
                    ),
                ))
            }
        }
        if let Err(err) = tx.commit().await {
            return WeddingDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.task",
                    "delete_task_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        WeddingDeleteResponses::NoContent
    }
}

async fn find_task(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    task_id: Option<&str>,
    function: &str,
) -> Result<Task, TaskUpdateResponses> {
    let task_id =
        parse_id(task_id, "Task").map_err(|err| TaskUpdateResponses::BadRequest(Json(err)))?;
    match get_task_by_id(tx, wedding_id, &task_id).await {
        Ok(Some(val)) => Ok(val),
        Ok(None) => Err(TaskUpdateResponses::NotFound(Json(NotFoundResponse::new(
            "task",
            "id",
            &task_id.to_string(),
        )))),
        Err(err) => Err(TaskUpdateResponses::InternalServerError(Json(
            InternalServerErrorResponse::new("route.task", function, "get task by id", &err.to_string()),
        ))),
    }
}

async fn save_task(
    mut tx: Transaction<'static, Postgres>,
    mut task: Task,
    now: DateTime<FixedOffset>,
    function: &str,
    message: &str,
) -> TaskUpdateResponses {
    if let Err(err) = update_task(&mut tx, &mut task, &now).await {
        return TaskUpdateResponses::InternalServerError(Json(InternalServerErrorResponse::new(
            "route.task",
            function,
            "update task",
            &err.to_string(),
        )));
    }
    if let Err(err) = tx.commit().await {
        return TaskUpdateResponses::InternalServerError(Json(InternalServerErrorResponse::new(
            "route.task",
            function,
            "commit transaction",
            &err.to_string(),
        )));
    }
    TaskUpdateResponses::Ok(Json(MessageResponse {
        message: message.to_string(),
        data: task.into(),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};
    use uuid::Uuid;

    use super::{apply_task_request, blank_task};
    use crate::{model::task::TaskStatus, schema::task::TaskRequest};

    fn request(title: &str) -> TaskRequest {
        TaskRequest {
            title: title.to_string(),
            description: None,
            category: None,
            due_date: None,
            status: None,
            priority: None,
            display_order: None,
            notes: None,
        }
    }

    #[test]
    fn test_apply_task_request() {
        let now = Local::now().fixed_offset();
        let mut task = blank_task(Uuid::now_v7());
        let req = TaskRequest {
            due_date: Some("2026-11-01".to_string()),
            status: Some(TaskStatus::Completed),
            ..request(" Book mehendi artist ")
        };
        assert!(apply_task_request(&mut task, &req, now).is_ok());
        assert_eq!(task.title, "Book mehendi artist");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert_eq!(task.completed_at, Some(now));

        let req = TaskRequest {
            status: Some(TaskStatus::Pending),
            ..request("Book mehendi artist")
        };
        assert!(apply_task_request(&mut task, &req, now).is_ok());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_invalid_task_requests() {
        let now = Local::now().fixed_offset();
        let mut task = blank_task(Uuid::now_v7());
        assert_eq!(
            apply_task_request(&mut task, &request(""), now),
            Err("Title is required".to_string())
        );
        let req = TaskRequest {
            due_date: Some("tomorrow".to_string()),
            ..request("Book mehendi artist")
        };
        assert_eq!(
            apply_task_request(&mut task, &req, now),
            Err("Invalid due date".to_string())
        );
    }
}
