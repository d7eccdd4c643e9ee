use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::Filters,
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::shortlist::{Shortlist, TABLE_NAME},
};

pub async fn paginate_shortlist(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: &Uuid,
    page: u32,
    page_size: u32,
) -> anyhow::Result<(Vec<Shortlist>, u32, u32)> {
    let mut filters = Filters::new();
    filters.eq("profile_id", SqlxBinds::Uuid(*profile_id));
    paginate::<Shortlist>(
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

pub async fn get_shortlist(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: &Uuid,
    venue_id: &Uuid,
) -> anyhow::Result<Option<Shortlist>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["profile_id = $1".to_string(), "venue_id = $2".to_string()],
        vec![],
        None,
        None,
    );
    let q = binds_query_as::<Shortlist>(
        &stmt,
        vec![SqlxBinds::Uuid(*profile_id), SqlxBinds::Uuid(*venue_id)],
    );
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_shortlist(
    tx: &mut Transaction<'_, Postgres>,
    shortlist: &Shortlist,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"INSERT INTO {} (id, profile_id, venue_id, notes, event_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(shortlist.id)
    .bind(shortlist.profile_id)
    .bind(shortlist.venue_id)
    .bind(&shortlist.notes)
    .bind(&shortlist.event_type)
    .bind(shortlist.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_shortlist(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> anyhow::Result<()> {
    sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
