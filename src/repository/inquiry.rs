use chrono::{DateTime, FixedOffset};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::Filters,
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::inquiry::{Inquiry, InquiryPriority, InquiryStatus, TABLE_NAME},
};

#[derive(Clone, Debug, Default)]
pub struct InquiryFilter {
    pub search: Option<String>,
    pub status: Option<InquiryStatus>,
    pub priority: Option<InquiryPriority>,
    /// Restrict to inquiries on venues owned by this vendor.
    pub vendor_id: Option<Uuid>,
}

impl InquiryFilter {
    fn build(self) -> Filters {
        let mut filters = Filters::new();
        filters.search(&["name", "email", "phone", "destination"], self.search);
        filters.eq_opt(
            "status",
            self.status.map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        filters.eq_opt(
            "priority",
            self.priority
                .map(|x| SqlxBinds::String(x.as_str().to_string())),
        );
        if let Some(vendor_id) = self.vendor_id {
            filters.push_bind(
                "venue_id IN (SELECT id FROM public.venue WHERE vendor_id = {})",
                SqlxBinds::Uuid(vendor_id),
            );
        }
        filters
    }
}

pub async fn paginate_inquiry(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    filter: InquiryFilter,
) -> anyhow::Result<(Vec<Inquiry>, u32, u32)> {
    let filters = filter.build();
    paginate::<Inquiry>(
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

pub async fn get_inquiry_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Inquiry>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![], None, None);
    let q = binds_query_as::<Inquiry>(&stmt, vec![SqlxBinds::Uuid(*id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn get_recent_inquiry(
    tx: &mut Transaction<'_, Postgres>,
    limit: u32,
) -> anyhow::Result<Vec<Inquiry>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &[],
        vec!["created_at DESC".to_string()],
        Some(limit),
        None,
    );
    let q = binds_query_as::<Inquiry>(&stmt, vec![]);
    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn create_inquiry(
    tx: &mut Transaction<'_, Postgres>,
    inquiry: &Inquiry,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, venue_id, destination, name, email, phone, wedding_date, guest_count,
        budget_range, message, source_page, status, priority, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(inquiry.id)
    .bind(inquiry.venue_id)
    .bind(&inquiry.destination)
    .bind(&inquiry.name)
    .bind(&inquiry.email)
    .bind(&inquiry.phone)
    .bind(inquiry.wedding_date)
    .bind(inquiry.guest_count)
    .bind(&inquiry.budget_range)
    .bind(&inquiry.message)
    .bind(&inquiry.source_page)
    .bind(&inquiry.status)
    .bind(&inquiry.priority)
    .bind(&inquiry.notes)
    .bind(inquiry.created_at)
    .bind(inquiry.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Persists the follow-up fields: status, priority and notes.
pub async fn update_inquiry(
    tx: &mut Transaction<'_, Postgres>,
    inquiry: &mut Inquiry,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    inquiry.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET status = $1, priority = $2, notes = $3, updated_at = $4
            WHERE id = $5"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&inquiry.status)
    .bind(&inquiry.priority)
    .bind(&inquiry.notes)
    .bind(inquiry.updated_at)
    .bind(inquiry.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct InquiryCounts {
    pub total: i64,
    pub new: i64,
    pub this_week: i64,
    pub last_week: i64,
}

/// `week_start` is seven days back from now, `last_week_start` fourteen.
pub async fn get_inquiry_counts(
    tx: &mut Transaction<'_, Postgres>,
    week_start: &DateTime<FixedOffset>,
    last_week_start: &DateTime<FixedOffset>,
) -> anyhow::Result<InquiryCounts> {
    let counts: InquiryCounts = sqlx::query_as(
        format!(
            r#"SELECT count(id) AS total,
            count(id) FILTER (WHERE status = 'new') AS new,
            count(id) FILTER (WHERE created_at >= $1) AS this_week,
            count(id) FILTER (WHERE created_at >= $2 AND created_at < $1) AS last_week
            FROM {}"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(week_start)
    .bind(last_week_start)
    .fetch_one(&mut **tx)
    .await?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::{
        core::test_utils::insert_profile,
        factory::{inquiry::InquiryFactory, venue::VenueFactory},
        model::{
            inquiry::{Inquiry, InquiryStatus},
            profile::ProfileRole,
            venue::Venue,
        },
        repository::inquiry::{get_inquiry_counts, paginate_inquiry, InquiryFilter},
    };

    #[sqlx::test]
    async fn test_paginate_inquiry_by_vendor(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut db = pool.acquire().await?;
        let vendor =
            insert_profile(&mut db, "vendor@local.com", "password", ProfileRole::Vendor).await?;
        let mut venue_factory = VenueFactory::<Uuid>::new();
        venue_factory.modified_one(|data, ext| Venue {
            vendor_id: Some(ext),
            ..data.clone()
        });
        let venue = venue_factory.generate_one(&pool, vendor.id).await?;
        let mut factory = InquiryFactory::<Uuid>::new();
        factory.modified_many(|data, _, ext| Inquiry {
            venue_id: Some(ext),
            ..data.clone()
        });
        factory.generate_many(&pool, 3, venue.id).await?;
        InquiryFactory::new().generate_many(&pool, 2, ()).await?;

        // When
        let mut tx = pool.begin().await?;
        let (data, counts, _) = paginate_inquiry(
            &mut tx,
            1,
            10,
            InquiryFilter {
                vendor_id: Some(vendor.id),
                status: Some(InquiryStatus::New),
                ..Default::default()
            },
        )
        .await?;

        // Expect
        assert_eq!(counts, 3);
        assert!(data.iter().all(|x| x.venue_id == Some(venue.id)));
        Ok(())
    }

    #[sqlx::test]
    async fn test_inquiry_counts(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = InquiryFactory::new();
        factory.modified_many(|data, idx, _| Inquiry {
            created_at: Local::now().fixed_offset() - Duration::days(idx as i64 * 4),
            status: if idx == 0 { "new" } else { "contacted" }.to_string(),
            ..data.clone()
        });
        factory.generate_many(&pool, 4, ()).await?;

        // When
        let now = Local::now().fixed_offset();
        let mut tx = pool.begin().await?;
        let counts =
            get_inquiry_counts(&mut tx, &(now - Duration::days(7)), &(now - Duration::days(14)))
                .await?;

        // Expect
        // created 0, 4, 8 and 12 days ago
        assert_eq!(counts.total, 4);
        assert_eq!(counts.new, 1);
        assert_eq!(counts.this_week, 2);
        assert_eq!(counts.last_week, 2);
        Ok(())
    }
}
