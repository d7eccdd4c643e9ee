use chrono::{DateTime, FixedOffset};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::Filters,
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::review::{Review, ReviewStatus, ReviewType, TABLE_NAME},
};

pub const PUBLIC_REVIEW_LIMIT: u32 = 20;

#[derive(Clone, Debug, Default)]
pub struct ReviewFilter {
    pub status: Option<ReviewStatus>,
    pub venue_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    pub review_type: Option<ReviewType>,
}

impl ReviewFilter {
    fn build(self) -> Filters {
        let mut filters = Filters::new();
        filters.eq_opt(
            "status",
            self.status.map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters.eq_opt("venue_id", self.venue_id.map(SqlxBinds::Uuid));
        filters.eq_opt("destination_id", self.destination_id.map(SqlxBinds::Uuid));
        filters.eq_opt(
            "review_type",
            self.review_type
                .map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters
    }
}

pub async fn paginate_review(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    filter: ReviewFilter,
) -> anyhow::Result<(Vec<Review>, u32, u32)> {
    let filters = filter.build();
    paginate::<Review>(
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

/// Newest approved reviews, capped at `PUBLIC_REVIEW_LIMIT`.
pub async fn get_approved_review(
    tx: &mut Transaction<'_, Postgres>,
    filter: ReviewFilter,
) -> anyhow::Result<Vec<Review>> {
    let filters = ReviewFilter {
        status: Some(ReviewStatus::Approved),
        ..filter
    }
    .build();
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters.wheres,
        vec!["created_at DESC".to_string()],
        Some(PUBLIC_REVIEW_LIMIT),
        None,
    );
    let q = binds_query_as::<Review>(&stmt, filters.binds);
    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn get_review_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Review>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![], None, None);
    let q = binds_query_as::<Review>(&stmt, vec![SqlxBinds::Uuid(*id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_review(tx: &mut Transaction<'_, Postgres>, review: &Review) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, reviewer_name, reviewer_email, reviewer_city, venue_id, destination_id,
        review_type, rating, title, content, wedding_date, guest_count, status, created_at,
        updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(review.id)
    .bind(&review.reviewer_name)
    .bind(&review.reviewer_email)
    .bind(&review.reviewer_city)
    .bind(review.venue_id)
    .bind(review.destination_id)
    .bind(&review.review_type)
    .bind(review.rating)
    .bind(&review.title)
    .bind(&review.content)
    .bind(review.wedding_date)
    .bind(review.guest_count)
    .bind(&review.status)
    .bind(review.created_at)
    .bind(review.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_review_status(
    tx: &mut Transaction<'_, Postgres>,
    review: &mut Review,
    status: ReviewStatus,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    review.status = status.as_str().to_string();
    review.updated_at = *now;
    sqlx::query(
        format!(
            "UPDATE {} SET status = $1, updated_at = $2 WHERE id = $3",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&review.status)
    .bind(review.updated_at)
    .bind(review.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct ReviewCounts {
    pub total: i64,
    pub pending: i64,
}

pub async fn get_review_counts(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<ReviewCounts> {
    let counts: ReviewCounts = sqlx::query_as(
        format!(
            r#"SELECT count(id) AS total,
            count(id) FILTER (WHERE status = 'pending') AS pending
            FROM {}"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .fetch_one(&mut **tx)
    .await?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use sqlx::PgPool;

    use crate::{
        factory::review::ReviewFactory,
        model::review::{Review, ReviewStatus},
        repository::review::{
            get_approved_review, get_review_counts, paginate_review, ReviewFilter,
            PUBLIC_REVIEW_LIMIT,
        },
    };

    #[sqlx::test]
    async fn test_get_approved_review_capped(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = ReviewFactory::new();
        factory.modified_many(|data, idx, _| Review {
            status: if idx < 22 { "approved" } else { "pending" }.to_string(),
            created_at: Local::now().fixed_offset() - Duration::minutes(idx as i64),
            ..data.clone()
        });
        let reviews = factory.generate_many(&pool, 25, ()).await?;

        // When
        let mut tx = pool.begin().await?;
        let data = get_approved_review(&mut tx, ReviewFilter::default()).await?;

        // Expect
        assert_eq!(data.len(), PUBLIC_REVIEW_LIMIT as usize);
        assert_eq!(data[0].id, reviews[0].id);
        assert!(data.iter().all(|x| x.status == "approved"));
        Ok(())
    }

    #[sqlx::test]
    async fn test_review_counts(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = ReviewFactory::new();
        factory.modified_many(|data, idx, _| Review {
            status: if idx == 0 { "approved" } else { "pending" }.to_string(),
            ..data.clone()
        });
        factory.generate_many(&pool, 3, ()).await?;

        // When
        let mut tx = pool.begin().await?;
        let counts = get_review_counts(&mut tx).await?;
        let (_, pending, _) = paginate_review(
            &mut tx,
            1,
            10,
            ReviewFilter {
                status: Some(ReviewStatus::Pending),
                ..Default::default()
            },
        )
        .await?;

        // Expect
        assert_eq!(counts.total, 3);
        assert_eq!(counts.pending, 2);
        assert_eq!(pending, 2);
        Ok(())
    }
}
