use chrono::{DateTime, FixedOffset};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::Filters,
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::wedding::{Wedding, WeddingMember, MEMBER_TABLE_NAME, TABLE_NAME},
};

/// Weddings the profile has an accepted membership on.
pub async fn paginate_wedding_by_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: &Uuid,
    page: u32,
    page_size: u32,
    search: Option<String>,
) -> anyhow::Result<(Vec<Wedding>, u32, u32)> {
    let mut filters = Filters::new();
    filters.push_bind(
        &format!(
            "id IN (SELECT wedding_id FROM {} WHERE profile_id = {{}} AND invitation_status = 'accepted')",
            MEMBER_TABLE_NAME
        ),
        SqlxBinds::Uuid(*profile_id),
    );
    filters.search(&["bride_name", "groom_name", "primary_city"], search);
    paginate::<Wedding>(
        tx,
        TABLE_NAME,
        &filters.wheres,
        filters.binds,
        vec!["wedding_date ASC NULLS LAST".to_string(), "created_at DESC".to_string()],
        page,
        page_size,
    )
    .await
}

pub async fn get_wedding_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Wedding>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![], None, None);
    let q = binds_query_as::<Wedding>(&stmt, vec![SqlxBinds::Uuid(*id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_wedding(
    tx: &mut Transaction<'_, Postgres>,
    wedding: &Wedding,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, bride_name, groom_name, wedding_date, primary_city, destination_type,
        estimated_guests, total_budget, currency, planning_status, website_slug, created_by,
        notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(wedding.id)
    .bind(&wedding.bride_name)
    .bind(&wedding.groom_name)
    .bind(wedding.wedding_date)
    .bind(&wedding.primary_city)
    .bind(&wedding.destination_type)
    .bind(wedding.estimated_guests)
    .bind(wedding.total_budget)
    .bind(&wedding.currency)
    .bind(&wedding.planning_status)
    .bind(&wedding.website_slug)
    .bind(wedding.created_by)
    .bind(&wedding.notes)
    .bind(wedding.created_at)
    .bind(wedding.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// `website_slug` and `created_by` never change after creation.
pub async fn update_wedding(
    tx: &mut Transaction<'_, Postgres>,
    wedding: &mut Wedding,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    wedding.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET bride_name = $1, groom_name = $2, wedding_date = $3, primary_city = $4,
            destination_type = $5, estimated_guests = $6, total_budget = $7, currency = $8,
            planning_status = $9, notes = $10, updated_at = $11
            WHERE id = $12"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&wedding.bride_name)
    .bind(&wedding.groom_name)
    .bind(wedding.wedding_date)
    .bind(&wedding.primary_city)
    .bind(&wedding.destination_type)
    .bind(wedding.estimated_guests)
    .bind(wedding.total_budget)
    .bind(&wedding.currency)
    .bind(&wedding.planning_status)
    .bind(&wedding.notes)
    .bind(wedding.updated_at)
    .bind(wedding.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Members, guests, budget items and tasks go with it.
pub async fn delete_wedding(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> anyhow::Result<u64> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected())
}

pub async fn get_wedding_member(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    profile_id: &Uuid,
) -> anyhow::Result<Option<WeddingMember>> {
    let stmt = query_builder(
        None,
        MEMBER_TABLE_NAME,
        &["wedding_id = $1".to_string(), "profile_id = $2".to_string()],
        vec![],
        None,
        None,
    );
    let q = binds_query_as::<WeddingMember>(
        &stmt,
        vec![SqlxBinds::Uuid(*wedding_id), SqlxBinds::Uuid(*profile_id)],
    );
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_wedding_member(
    tx: &mut Transaction<'_, Postgres>,
    member: &WeddingMember,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, wedding_id, profile_id, role, invitation_status, invited_by, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
            MEMBER_TABLE_NAME
        )
        .as_str(),
    )
    .bind(member.id)
    .bind(member.wedding_id)
    .bind(member.profile_id)
    .bind(&member.role)
    .bind(&member.invitation_status)
    .bind(member.invited_by)
    .bind(member.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Member row joined with the member's profile.
#[derive(Clone, Debug, FromRow)]
pub struct WeddingMemberDetail {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub profile_id: Uuid,
    pub role: String,
    pub invitation_status: String,
    pub created_at: DateTime<FixedOffset>,
    pub email: String,
    pub full_name: Option<String>,
}

pub async fn get_wedding_members(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
) -> anyhow::Result<Vec<WeddingMemberDetail>> {
    let res: Vec<WeddingMemberDetail> = sqlx::query_as(
        format!(
            r#"SELECT m.id, m.wedding_id, m.profile_id, m.role, m.invitation_status, m.created_at,
            p.email, p.full_name
            FROM {} m
            JOIN public.profile p ON p.id = m.profile_id
            WHERE m.wedding_id = $1
            ORDER BY m.created_at ASC"#,
            MEMBER_TABLE_NAME
        )
        .as_str(),
    )
    .bind(wedding_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(res)
}

pub async fn delete_wedding_member(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    profile_id: &Uuid,
) -> anyhow::Result<u64> {
    let res = sqlx::query(
        format!(
            "DELETE FROM {} WHERE wedding_id = $1 AND profile_id = $2",
            MEMBER_TABLE_NAME
        )
        .as_str(),
    )
    .bind(wedding_id)
    .bind(profile_id)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}

#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct WeddingStats {
    pub total_guests: i64,
    pub confirmed_guests: i64,
    pub pending_rsvps: i64,
    pub total_budget: i64,
    pub spent_budget: i64,
    pub pending_tasks: i64,
    pub completed_tasks: i64,
}

pub async fn get_wedding_stats(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
) -> anyhow::Result<WeddingStats> {
    let stats: WeddingStats = sqlx::query_as(
        r#"SELECT
        (SELECT count(id) FROM public.guest WHERE wedding_id = $1) AS total_guests,
        (SELECT count(id) FROM public.guest
            WHERE wedding_id = $1 AND status = 'confirmed') AS confirmed_guests,
        (SELECT count(id) FROM public.guest
            WHERE wedding_id = $1 AND status IN ('pending', 'invited')) AS pending_rsvps,
        (SELECT COALESCE(sum(estimated_cost), 0)::BIGINT FROM public.budget_item
            WHERE wedding_id = $1) AS total_budget,
        (SELECT COALESCE(sum(actual_cost), 0)::BIGINT FROM public.budget_item
            WHERE wedding_id = $1) AS spent_budget,
        (SELECT count(id) FROM public.task
            WHERE wedding_id = $1 AND status IN ('pending', 'in_progress')) AS pending_tasks,
        (SELECT count(id) FROM public.task
            WHERE wedding_id = $1 AND status = 'completed') AS completed_tasks"#,
    )
    .bind(wedding_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{
        core::test_utils::insert_profile,
        factory::{
            budget_item::BudgetItemFactory, guest::GuestFactory, task::TaskFactory,
            wedding::WeddingFactory,
        },
        model::{budget_item::BudgetItem, guest::Guest, profile::ProfileRole, task::Task},
        repository::wedding::{
            delete_wedding, get_wedding_member, get_wedding_stats, paginate_wedding_by_profile,
            WeddingStats,
        },
    };

    #[sqlx::test]
    async fn test_paginate_wedding_by_profile(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut db = pool.acquire().await?;
        let couple =
            insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
        let other =
            insert_profile(&mut db, "other@local.com", "password", ProfileRole::User).await?;
        WeddingFactory::new()
            .generate_many(&pool, 2, couple.id)
            .await?;
        WeddingFactory::new().generate_one(&pool, other.id).await?;

        // When
        let mut tx = pool.begin().await?;
        let (data, counts, page_count) =
            paginate_wedding_by_profile(&mut tx, &couple.id, 1, 10, None).await?;

        // Expect
        assert_eq!(counts, 2);
        assert_eq!(page_count, 1);
        assert!(data.iter().all(|x| x.created_by == Some(couple.id)));
        Ok(())
    }

    #[sqlx::test]
    async fn test_wedding_stats(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut db = pool.acquire().await?;
        let couple =
            insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
        let wedding = WeddingFactory::new().generate_one(&pool, couple.id).await?;

        let mut guest_factory = GuestFactory::new();
        guest_factory.modified_many(|data, idx, _| Guest {
            status: ["confirmed", "pending", "invited", "declined"][idx].to_string(),
            ..data.clone()
        });
        guest_factory.generate_many(&pool, 4, wedding.id).await?;

        let mut budget_factory = BudgetItemFactory::new();
        budget_factory.modified_many(|data, idx, _| BudgetItem {
            estimated_cost: 100_000,
            actual_cost: if idx == 0 { Some(120_000) } else { None },
            ..data.clone()
        });
        budget_factory.generate_many(&pool, 3, wedding.id).await?;

        let mut task_factory = TaskFactory::new();
        task_factory.modified_many(|data, idx, _| Task {
            status: ["pending", "in_progress", "completed"][idx].to_string(),
            ..data.clone()
        });
        task_factory.generate_many(&pool, 3, wedding.id).await?;

        // When
        let mut tx = pool.begin().await?;
        let stats = get_wedding_stats(&mut tx, &wedding.id).await?;

        // Expect
        assert_eq!(
            stats,
            WeddingStats {
                total_guests: 4,
                confirmed_guests: 1,
                pending_rsvps: 2,
                total_budget: 300_000,
                spent_budget: 120_000,
                pending_tasks: 2,
                completed_tasks: 1,
            }
        );
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_wedding_cascades(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut db = pool.acquire().await?;
        let couple =
            insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
        let wedding = WeddingFactory::new().generate_one(&pool, couple.id).await?;
        GuestFactory::new().generate_many(&pool, 2, wedding.id).await?;

        // When
        let mut tx = pool.begin().await?;
        let deleted = delete_wedding(&mut tx, &wedding.id).await?;

        // Expect
        assert_eq!(deleted, 1);
        assert!(get_wedding_member(&mut tx, &wedding.id, &couple.id)
            .await?
            .is_none());
        let guests: (i64,) = sqlx::query_as("SELECT count(id) FROM public.guest")
            .fetch_one(&mut *tx)
            .await?;
        assert_eq!(guests.0, 0);
        Ok(())
    }
}
