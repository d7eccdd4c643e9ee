use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::budget_item::{BudgetItem, TABLE_NAME},
};

/// Every item on the wedding; budgets are small enough to total in memory.
pub async fn get_budget_items(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
) -> anyhow::Result<Vec<BudgetItem>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["wedding_id = $1".to_string()],
        vec!["category ASC".to_string(), "created_at ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<BudgetItem>(&stmt, vec![SqlxBinds::Uuid(*wedding_id)]);
    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn get_budget_item_by_id(
    tx: &mut Transaction<'_, Postgres>,
    wedding_id: &Uuid,
    id: &Uuid,
) -> anyhow::Result<Option<BudgetItem>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["id = $1".to_string(), "wedding_id = $2".to_string()],
        vec![],
        None,
        None,
    );
    let q = binds_query_as::<BudgetItem>(
        &stmt,
        vec![SqlxBinds::Uuid(*id), SqlxBinds::Uuid(*wedding_id)],
    );
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_budget_item(
    tx: &mut Transaction<'_, Postgres>,
    item: &BudgetItem,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, wedding_id, category, name, estimated_cost, actual_cost, amount_paid,
        payment_status, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(item.id)
    .bind(item.wedding_id)
    .bind(&item.category)
    .bind(&item.name)
    .bind(item.estimated_cost)
    .bind(item.actual_cost)
    .bind(item.amount_paid)
    .bind(&item.payment_status)
    .bind(&item.notes)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_budget_item(
    tx: &mut Transaction<'_, Postgres>,
    item: &mut BudgetItem,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    item.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET category = $1, name = $2, estimated_cost = $3, actual_cost = $4,
            amount_paid = $5, payment_status = $6, notes = $7, updated_at = $8
            WHERE id = $9"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&item.category)
    .bind(&item.name)
    .bind(item.estimated_cost)
    .bind(item.actual_cost)
    .bind(item.amount_paid)
    .bind(&item.payment_status)
    .bind(&item.notes)
    .bind(item.updated_at)
    .bind(item.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_budget_item(
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
        factory::{budget_item::BudgetItemFactory, wedding::WeddingFactory},
        model::{budget_item::BudgetItem, profile::ProfileRole},
        repository::budget_item::{get_budget_item_by_id, get_budget_items},
    };

    #[sqlx::test]
    async fn test_get_budget_items_by_wedding(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut db = pool.acquire().await?;
        let couple =
            insert_profile(&mut db, "couple@local.com", "password", ProfileRole::User).await?;
        let wedding = WeddingFactory::new().generate_one(&pool, couple.id).await?;
        let other = WeddingFactory::new().generate_one(&pool, couple.id).await?;
        let mut factory = BudgetItemFactory::new();
        factory.modified_many(|data, idx, _| BudgetItem {
            category: Some(["photography", "attire", "photography"][idx].to_string()),
            ..data.clone()
        });
        let items = factory.generate_many(&pool, 3, wedding.id).await?;
        BudgetItemFactory::new().generate_one(&pool, other.id).await?;

        // When
        let mut tx = pool.begin().await?;
        let res = get_budget_items(&mut tx, &wedding.id).await?;
        let foreign = get_budget_item_by_id(&mut tx, &other.id, &items[0].id).await?;

        // Expect
        assert_eq!(res.len(), 3);
        assert_eq!(res[0].category.as_deref(), Some("attire"));
        assert!(foreign.is_none());
        Ok(())
    }
}
