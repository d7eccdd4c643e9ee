use chrono::{DateTime, FixedOffset};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::{ActiveStatusFilter, Filters},
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::profile::{Profile, ProfileRole, TABLE_NAME},
};

pub async fn paginate_profile(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    search: Option<String>,
    role: Option<ProfileRole>,
    status: ActiveStatusFilter,
) -> anyhow::Result<(Vec<Profile>, u32, u32)> {
    let mut filters = Filters::new();
    filters.search(&["email", "full_name", "phone"], search);
    filters.eq_opt(
        "role",
        role.map(|x| SqlxBinds::String(x.as_str().to_string())),
    );
    status.apply(&mut filters);
    paginate::<Profile>(
        tx,
        TABLE_NAME,
        &filters.wheres,
        filters.binds,
        vec!["created_at DESC".to_string()],
        page,
        page_size,
    )
    .await
}

pub async fn get_profile_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Profile>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*id)];
    let filters: Vec<String> = vec!["id = $1".to_string()];
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let q = binds_query_as::<Profile>(&stmt, binds);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn get_profile_by_email(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
) -> anyhow::Result<Option<Profile>> {
    let res: Option<Profile> = sqlx::query_as(
        format!(
            r#"SELECT *
        FROM {}
        WHERE lower(email) = lower($1)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(email.trim())
    .fetch_optional(&mut **tx)
    .await?;
    Ok(res)
}

pub async fn create_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile: &Profile,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(r#"
        INSERT INTO {} (id, email, password, full_name, phone, avatar_url, role, is_active,
        wedding_date, partner_name, city, last_sign_in_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#, TABLE_NAME).as_str(),
    )
    .bind(profile.id)
    .bind(&profile.email)
    .bind(&profile.password)
    .bind(&profile.full_name)
    .bind(&profile.phone)
    .bind(&profile.avatar_url)
    .bind(&profile.role)
    .bind(profile.is_active)
    .bind(profile.wedding_date)
    .bind(&profile.partner_name)
    .bind(&profile.city)
    .bind(profile.last_sign_in_at)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Admin edit form: name, phone, role, status and city.
pub async fn update_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile: &mut Profile,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    profile.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET full_name = $1, phone = $2, role = $3, is_active = $4, city = $5,
            updated_at = $6
            WHERE id = $7"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&profile.full_name)
    .bind(&profile.phone)
    .bind(&profile.role)
    .bind(profile.is_active)
    .bind(&profile.city)
    .bind(profile.updated_at)
    .bind(profile.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn touch_last_sign_in(
    tx: &mut Transaction<'_, Postgres>,
    profile: &mut Profile,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    profile.last_sign_in_at = Some(*now);
    sqlx::query(format!("UPDATE {} SET last_sign_in_at = $1 WHERE id = $2", TABLE_NAME).as_str())
        .bind(now)
        .bind(profile.id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Returns the number of deleted rows.
pub async fn delete_profile(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> anyhow::Result<u64> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected())
}

#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct ProfileStats {
    pub total: i64,
    pub active: i64,
    pub vendors: i64,
    pub admins: i64,
}

pub async fn profile_stats(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<ProfileStats> {
    let stats: ProfileStats = sqlx::query_as(
        format!(
            r#"SELECT count(id) AS total,
            count(id) FILTER (WHERE is_active) AS active,
            count(id) FILTER (WHERE role = 'vendor') AS vendors,
            count(id) FILTER (WHERE role = 'admin') AS admins
            FROM {}"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .fetch_one(&mut **tx)
    .await?;
    Ok(stats)
}
