use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::Filters,
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::guest::{Guest, GuestCategory, GuestSide, GuestStatus, TABLE_NAME},
};

#[derive(Clone, Debug, Default)]
pub struct GuestFilter {
    pub search: Option<String>,
    pub status: Option<GuestStatus>,
    pub side: Option<GuestSide>,
    pub category: Option<GuestCategory>,
}

impl GuestFilter {
    fn build(self, wedding_id: &Uuid) -> Filters {
        let mut filters = Filters::new();
        filters.eq("wedding_id", SqlxBinds::Uuid(*wedding_id));
        filters.search(&["first_name", "last_name", "email", "phone"], self.search);
        filters.eq_opt(
            "status",
            self.status.map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters.eq_opt(
            "side",
            self.side.map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters.eq_opt(
            "category",
            self.category
                .map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters
    }
}

pub async fn paginate_guest(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    page: u32,
    page_size: u32,
    filter: GuestFilter,
) -> anyhow::Result<(Vec<Guest>, u32, u32)> {
    let filters = filter.build(wedding_id);
    paginate::<Guest>(
        tx,
        TABLE_NAME,
        &filters.wheres,
        filters.binds,
        vec!["first_name ASC".to_string(), "created_at ASC".to_string()],
        page,
        page_size,
    )
    .await
}

/// Only finds the guest on the given wedding.
pub async fn get_guest_by_id(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    id: &Uuid,
) -> anyhow::Result<Option<Guest>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["id = $1".to_string(), "wedding_id = $2".to_string()],
        vec![],
        None,
        None,
    );
    let q = binds_query_as::<Guest>(&stmt, vec![SqlxBinds::Uuid(*id), SqlxBinds::Uuid(*wedding_id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_guest(tx: &mut Transaction<'_, Postgres>, guest: &Guest) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, wedding_id, first_name, last_name, email, phone, side, category,
        relationship, has_plus_one, plus_one_name, dietary_notes, needs_accommodation,
        needs_transportation, table_number, status, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(guest.id)
    .bind(guest.wedding_id)
    .bind(&guest.first_name)
    .bind(&guest.last_name)
    .bind(&guest.email)
    .bind(&guest.phone)
    .bind(&guest.side)
    .bind(&guest.category)
    .bind(&guest.relationship)
    .bind(guest.has_plus_one)
    .bind(&guest.plus_one_name)
    .bind(&guest.dietary_notes)
    .bind(guest.needs_accommodation)
    .bind(guest.needs_transportation)
    .bind(guest.table_number)
    .bind(&guest.status)
    .bind(&guest.notes)
    .bind(guest.created_at)
    .bind(guest.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_guest(
    tx: &mut Transaction<'_, Postgres>,
    guest: &mut Guest,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    guest.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET first_name = $1, last_name = $2, email = $3, phone = $4, side = $5, category = $6,
            relationship = $7, has_plus_one = $8, plus_one_name = $9, dietary_notes = $10,
            needs_accommodation = $11, needs_transportation = $12, table_number = $13,
            status = $14, notes = $15, updated_at = $16
            WHERE id = $17"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&guest.first_name)
    .bind(&guest.last_name)
    .bind(&guest.email)
    .bind(&guest.phone)
    .bind(&guest.side)
    .bind(&guest.category)
    .bind(&guest.relationship)
    .bind(guest.has_plus_one)
    .bind(&guest.plus_one_name)
    .bind(&guest.dietary_notes)
    .bind(guest.needs_accommodation)
    .bind(guest.needs_transportation)
    .bind(guest.table_number)
    .bind(&guest.status)
    .bind(&guest.notes)
    .bind(guest.updated_at)
    .bind(guest.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_guest(
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

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{
        core::test_utils::insert_profile,
        factory::{guest::GuestFactory, wedding::WeddingFactory},
        model::{
            guest::{Guest, GuestSide, GuestStatus},
            profile::ProfileRole,
        },
        repository::guest::{delete_guest, get_guest_by_id, paginate_guest, GuestFilter},
    };

    #[sqlx::test]
    async fn test_paginate_guest_filters(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut db = pool.acquire().await?;
        let couple =
            insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
        let wedding = WeddingFactory::new().generate_one(&pool, couple.id).await?;
        let other = WeddingFactory::new().generate_one(&pool, couple.id).await?;
        let mut factory = GuestFactory::new();
        factory.modified_many(|data, idx, _| Guest {
            first_name: ["Asha", "Rohan", "Meera"][idx].to_string(),
            side: Some(if idx == 0 { "bride" } else { "groom" }.to_string()),
            status: if idx == 2 { "confirmed" } else { "pending" }.to_string(),
            ..data.clone()
        });
        factory.generate_many(&pool, 3, wedding.id).await?;
        GuestFactory::new().generate_many(&pool, 2, other.id).await?;

        // When
        let mut tx = pool.begin().await?;
        let (all, all_counts, _) =
            paginate_guest(&mut tx, &wedding.id, 1, 10, GuestFilter::default()).await?;
        let (groom, groom_counts, _) = paginate_guest(
            &mut tx,
            &wedding.id,
            1,
            10,
            GuestFilter {
                side: Some(GuestSide::Groom),
                status: Some(GuestStatus::Pending),
                ..Default::default()
            },
        )
        .await?;
        let (_, search_counts, _) = paginate_guest(
            &mut tx,
            &wedding.id,
            1,
            10,
            GuestFilter {
                search: Some("Meera".to_string()),
                ..Default::default()
            },
        )
        .await?;

        // Expect
        assert_eq!(all_counts, 3);
        assert_eq!(all[0].first_name, "Asha");
        assert_eq!(groom_counts, 1);
        assert_eq!(groom[0].first_name, "Rohan");
        assert_eq!(search_counts, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_guest_scoped_to_wedding(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut db = pool.acquire().await?;
        let couple =
            insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
        let wedding = WeddingFactory::new().generate_one(&pool, couple.id).await?;
        let other = WeddingFactory::new().generate_one(&pool, couple.id).await?;
        let guest = GuestFactory::new().generate_one(&pool, wedding.id).await?;

        // When
        let mut tx = pool.begin().await?;
        let found = get_guest_by_id(&mut tx, &other.id, &guest.id).await?;
        let deleted_elsewhere = delete_guest(&mut tx, &other.id, &guest.id).await?;
        let deleted = delete_guest(&mut tx, &wedding.id, &guest.id).await?;

        // Expect
        assert!(found.is_none());
        assert_eq!(deleted_elsewhere, 0);
        assert_eq!(deleted, 1);
        Ok(())
    }
}
