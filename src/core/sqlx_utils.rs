use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    Postgres,
};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub enum SqlxBinds {
    String(String),
    Bool(bool),
    Uuid(Uuid),
}

pub fn binds_query_as<'a, T: for<'r> sqlx::FromRow<'r, PgRow>>(
    stmt: &'a str,
    binds: Vec<SqlxBinds>,
) -> QueryAs<'a, Postgres, T, PgArguments> {
    let mut q: QueryAs<'_, Postgres, T, PgArguments> = sqlx::query_as(stmt);
    for bind in binds.iter() {
        q = match bind {
            SqlxBinds::String(val) => q.bind(val.clone()),
            SqlxBinds::Bool(val) => q.bind(*val),
            SqlxBinds::Uuid(val) => q.bind(*val),
        };
    }
    q
}

pub fn query_builder(
    select: Option<String>,
    table_name: &str,
    wheres: &[String],
    order_by: Vec<String>,
    limit: Option<u32>,
    offset: Option<u64>,
) -> String {
    // Select
    let mut stmt = "SELECT ".to_string();
    if let Some(val) = select {
        stmt.push_str(&val);
    } else {
        stmt.push('*');
    }

    // From
    stmt.push_str(format!(" FROM {}", table_name).as_str());

    // Where
    if !wheres.is_empty() {
        stmt.push_str(" WHERE ");
        stmt.push_str(&wheres.join(" AND "));
    }

    // order by
    if !order_by.is_empty() {
        stmt.push_str(" ORDER BY ");
        stmt.push_str(&order_by.join(", "));
    }

    // Limit
    if let Some(val) = limit {
        stmt.push_str(format!(" LIMIT {}", val).as_str());
    }

    // Offset
    if let Some(val) = offset {
        stmt.push_str(format!(" OFFSET {}", val).as_str());
    }
    stmt
}

/// Page of rows plus total count and number of pages, the shape every
/// paginated repository function returns.
pub async fn paginate<T>(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    table_name: &str,
    filters: &[String],
    binds: Vec<SqlxBinds>,
    order_by: Vec<String>,
    page: u32,
    page_size: u32,
) -> anyhow::Result<(Vec<T>, u32, u32)>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    let page = page.max(1);
    let page_size = page_size.max(1);
    let stmt_count = query_builder(
        Some("count(id)".to_string()),
        table_name,
        filters,
        vec![],
        None,
        None,
    );
    let q_count = binds_query_as::<(i64,)>(&stmt_count, binds.clone());
    let count = q_count.fetch_one(&mut **tx).await?;
    let num_page = (count.0 as u32).div_ceil(page_size);

    // Past the last row
    let offset = u64::from(page - 1) * u64::from(page_size);
    if offset >= count.0 as u64 {
        return Ok((vec![], count.0 as u32, num_page));
    }

    let stmt = query_builder(
        None,
        table_name,
        filters,
        order_by,
        Some(page_size),
        Some(offset),
    );
    let q = binds_query_as::<T>(&stmt, binds);
    let data = q.fetch_all(&mut **tx).await?;
    Ok((data, count.0 as u32, num_page))
}
