use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::Filters,
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::task::{Task, TaskPriority, TaskStatus, TABLE_NAME},
};

#[derive(Clone, Debug, Default)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<String>,
}

impl TaskFilter {
    fn build(self, wedding_id: &Uuid) -> Filters {
        let mut filters = Filters::new();
        filters.eq("wedding_id", SqlxBinds::Uuid(*wedding_id));
        filters.search(&["title", "description"], self.search);
        filters.eq_opt(
            "status",
            self.status.map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters.eq_opt(
            "priority",
            self.priority
                .map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters.eq_opt(
            "category",
            self.category
                .filter(|x| !x.trim().is_empty())
                .map(SqlxBinds::String),
        );
        filters
    }
}

pub async fn paginate_task(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    page: u32,
    page_size: u32,
    filter: TaskFilter,
) -> anyhow::Result<(Vec<Task>, u32, u32)> {
    let filters = filter.build(wedding_id);
    paginate::<Task>(
        tx,
        TABLE_NAME,
        &filters.wheres,
        filters.binds,
        vec![
            "display_order ASC".to_string(),
            "due_date ASC NULLS LAST".to_string(),
            "created_at ASC".to_string(),
        ],
        page,
        page_size,
    )
    .await
}

pub async fn get_task_by_id(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    id: &Uuid,
) -> anyhow::Result<Option<Task>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["id = $1".to_string(), "wedding_id = $2".to_string()],
        vec![],
        None,
        None,
    );
    let q = binds_query_as::<Task>(&stmt, vec![SqlxBinds::Uuid(*id), SqlxBinds::Uuid(*wedding_id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_task(tx: &mut Transaction<'_, Postgres>, task: &Task) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, wedding_id, title, description, category, due_date, status, priority,
        completed_at, display_order, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(task.id)
    .bind(task.wedding_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.category)
    .bind(task.due_date)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.completed_at)
    .bind(task.display_order)
    .bind(&task.notes)
    .bind(task.created_at)
    .bind(task.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_task(
    tx: &mut Transaction<'_, Postgres>,
    task: &mut Task,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    task.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET title = $1, description = $2, category = $3, due_date = $4, status = $5,
            priority = $6, completed_at = $7, display_order = $8, notes = $9, updated_at = $10
            WHERE id = $11"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.category)
    .bind(task.due_date)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.completed_at)
    .bind(task.display_order)
    .bind(&task.notes)
    .bind(task.updated_at)
    .bind(task.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_task(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    id: &Uuid,
) -> anyhow::Result<u64> {
    let res = sqlx::query(
        format!("DELETE FROM {} WHERE id = $1 AND wedding_id = $2", TABLE_NAME).as_str(),
    )
    .bind(id)
    .bind(wedding_id)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}
