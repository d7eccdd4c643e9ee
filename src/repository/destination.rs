use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::{DestinationTypeFilter, Filters},
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::destination::{Destination, TABLE_NAME},
};

/// Public listing puts featured destinations first.
pub async fn paginate_destination(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    search: Option<String>,
    destination_type: DestinationTypeFilter,
    featured_first: bool,
) -> anyhow::Result<(Vec<Destination>, u32, u32)> {
    let mut filters = Filters::new();
    filters.search(&["name", "city", "country"], search);
    destination_type.apply(&mut filters);
    let mut order_by = vec![];
    if featured_first {
        order_by.push("is_featured DESC".to_string());
    }
    order_by.push("sort_order ASC".to_string());
    order_by.push("name ASC".to_string());
    paginate::<Destination>(
        tx,
        TABLE_NAME,
        &filters.wheres,
        filters.binds,
        order_by,
        page,
        page_size,
    )
    .await
}

pub async fn get_destination_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Destination>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![], None, None);
    let q = binds_query_as::<Destination>(&stmt, vec![SqlxBinds::Uuid(*id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn get_destination_by_slug(
    tx: &mut Transaction<'_, Postgres>,
    slug: &str,
) -> anyhow::Result<Option<Destination>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["slug = $1".to_string()],
        vec![],
        None,
        None,
    );
    let q = binds_query_as::<Destination>(&stmt, vec![SqlxBinds::String(slug.to_string())]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

/// True when another destination already owns `slug`.
pub async fn is_destination_slug_taken(
    tx: &mut Transaction<'_, Postgres>,
    slug: &str,
    exclude_id: Option<Uuid>,
) -> anyhow::Result<bool> {
    let res: (bool,) = sqlx::query_as(
        format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(slug)
    .bind(exclude_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(res.0)
}

pub async fn create_destination(
    tx: &mut Transaction<'_, Postgres>,
    destination: &Destination,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, name, slug, city, state, country, tagline, hero_title, description,
        hero_image_url, gallery_images, best_season, best_months, avg_budget_min, avg_budget_max,
        total_venues, is_featured, is_international, sort_order, planning_tips, insider_secrets,
        best_photo_locations, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
        $19, $20, $21, $22, $23, $24)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(destination.id)
    .bind(&destination.name)
    .bind(&destination.slug)
    .bind(&destination.city)
    .bind(&destination.state)
    .bind(&destination.country)
    .bind(&destination.tagline)
    .bind(&destination.hero_title)
    .bind(&destination.description)
    .bind(&destination.hero_image_url)
    .bind(&destination.gallery_images)
    .bind(&destination.best_season)
    .bind(&destination.best_months)
    .bind(destination.avg_budget_min)
    .bind(destination.avg_budget_max)
    .bind(destination.total_venues)
    .bind(destination.is_featured)
    .bind(destination.is_international)
    .bind(destination.sort_order)
    .bind(&destination.planning_tips)
    .bind(&destination.insider_secrets)
    .bind(&destination.best_photo_locations)
    .bind(destination.created_at)
    .bind(destination.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Writes every editable column, generated content included.
pub async fn update_destination(
    tx: &mut Transaction<'_, Postgres>,
    destination: &mut Destination,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    destination.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET name = $1, slug = $2, city = $3, state = $4, country = $5, tagline = $6,
            hero_title = $7, description = $8, hero_image_url = $9, gallery_images = $10,
            best_season = $11, best_months = $12, avg_budget_min = $13, avg_budget_max = $14,
            total_venues = $15, is_featured = $16, is_international = $17, sort_order = $18,
            planning_tips = $19, insider_secrets = $20, best_photo_locations = $21,
            updated_at = $22
            WHERE id = $23"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&destination.name)
    .bind(&destination.slug)
    .bind(&destination.city)
    .bind(&destination.state)
    .bind(&destination.country)
    .bind(&destination.tagline)
    .bind(&destination.hero_title)
    .bind(&destination.description)
    .bind(&destination.hero_image_url)
    .bind(&destination.gallery_images)
    .bind(&destination.best_season)
    .bind(&destination.best_months)
    .bind(destination.avg_budget_min)
    .bind(destination.avg_budget_max)
    .bind(destination.total_venues)
    .bind(destination.is_featured)
    .bind(destination.is_international)
    .bind(destination.sort_order)
    .bind(&destination.planning_tips)
    .bind(&destination.insider_secrets)
    .bind(&destination.best_photo_locations)
    .bind(destination.updated_at)
    .bind(destination.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_destination(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<u64> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected())
}

/// Destinations whose generated content is still empty.
pub async fn get_destination_without_content(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<Destination>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["cardinality(planning_tips) = 0".to_string()],
        vec!["sort_order ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<Destination>(&stmt, vec![]);
    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn count_destination(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<i64> {
    let res: (i64,) = sqlx::query_as(format!("SELECT count(id) FROM {}", TABLE_NAME).as_str())
        .fetch_one(&mut **tx)
        .await?;
    Ok(res.0)
}
