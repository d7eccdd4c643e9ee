use chrono::{DateTime, FixedOffset};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        filter::{ActiveStatusFilter, Filters},
        sqlx_utils::{binds_query_as, paginate, query_builder, SqlxBinds},
    },
    model::venue::{Venue, TABLE_NAME},
};

/// Predicates for venue listings. Every set field narrows the result.
#[derive(Clone, Debug, Default)]
pub struct VenueFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub featured: Option<bool>,
    pub status: ActiveStatusFilter,
    pub vendor_id: Option<Uuid>,
}

impl VenueFilter {
    fn build(self) -> Filters {
        let mut filters = Filters::new();
        filters.search(&["name", "city", "state"], self.search);
        filters.eq_opt(
            "category",
            self.category
                .filter(|x| !x.trim().is_empty())
                .map(SqlxBinds::String),
        );
        filters.eq_opt(
            "city",
            self.city
                .filter(|x| !x.trim().is_empty())
                .map(SqlxBinds::String),
        );
        filters.eq_opt("is_featured", self.featured.map(SqlxBinds::Bool));
        filters.eq_opt("vendor_id", self.vendor_id.map(SqlxBinds::Uuid));
        self.status.apply(&mut filters);
        filters
    }
}

/// Public listing ranks featured and best rated venues first; back office
/// listings are newest first.
pub async fn paginate_venue(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    filter: VenueFilter,
    public_order: bool,
) -> anyhow::Result<(Vec<Venue>, u32, u32)> {
    let filters = filter.build();
    let order_by = if public_order {
        vec![
            "is_featured DESC".to_string(),
            "google_rating DESC".to_string(),
            "name ASC".to_string(),
        ]
    } else {
        vec!["created_at DESC".to_string()]
    };
    paginate::<Venue>(
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

pub async fn get_venue_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Venue>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![], None, None);
    let q = binds_query_as::<Venue>(&stmt, vec![SqlxBinds::Uuid(*id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

/// Only active venues are reachable by slug.
pub async fn get_active_venue_by_slug(
    tx: &mut Transaction<'_, Postgres>,
    slug: &str,
) -> anyhow::Result<Option<Venue>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["slug = $1".to_string(), "is_active IS TRUE".to_string()],
        vec![],
        None,
        None,
    );
    let q = binds_query_as::<Venue>(&stmt, vec![SqlxBinds::String(slug.to_string())]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn is_venue_slug_taken(
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

pub async fn create_venue(tx: &mut Transaction<'_, Postgres>, venue: &Venue) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, vendor_id, name, slug, category, city, state, country, starting_price,
        price_per_plate_veg, guest_capacity_min, guest_capacity_max, accommodation_rooms,
        star_rating, google_rating, total_reviews, hero_image_url, cuisine_types, is_featured,
        is_active, unique_selling_points, insider_tips, what_to_expect, photography_spots,
        planning_timeline, signature_experiences, budget_breakdown, vendor_recommendations, faqs,
        policies, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
        $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(venue.id)
    .bind(venue.vendor_id)
    .bind(&venue.name)
    .bind(&venue.slug)
    .bind(&venue.category)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.country)
    .bind(&venue.starting_price)
    .bind(venue.price_per_plate_veg)
    .bind(venue.guest_capacity_min)
    .bind(venue.guest_capacity_max)
    .bind(venue.accommodation_rooms)
    .bind(venue.star_rating)
    .bind(venue.google_rating)
    .bind(venue.total_reviews)
    .bind(&venue.hero_image_url)
    .bind(&venue.cuisine_types)
    .bind(venue.is_featured)
    .bind(venue.is_active)
    .bind(&venue.unique_selling_points)
    .bind(&venue.insider_tips)
    .bind(&venue.what_to_expect)
    .bind(&venue.photography_spots)
    .bind(&venue.planning_timeline)
    .bind(&venue.signature_experiences)
    .bind(&venue.budget_breakdown)
    .bind(&venue.vendor_recommendations)
    .bind(&venue.faqs)
    .bind(&venue.policies)
    .bind(venue.created_at)
    .bind(venue.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Writes every editable column, generated content included.
pub async fn update_venue(
    tx: &mut Transaction<'_, Postgres>,
    venue: &mut Venue,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    venue.updated_at = *now;
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET vendor_id = $1, name = $2, slug = $3, category = $4, city = $5, state = $6,
            country = $7, starting_price = $8, price_per_plate_veg = $9,
            guest_capacity_min = $10, guest_capacity_max = $11, accommodation_rooms = $12,
            star_rating = $13, google_rating = $14, total_reviews = $15, hero_image_url = $16,
            cuisine_types = $17, is_featured = $18, is_active = $19,
            unique_selling_points = $20, insider_tips = $21, what_to_expect = $22,
            photography_spots = $23, planning_timeline = $24, signature_experiences = $25,
            budget_breakdown = $26, vendor_recommendations = $27, faqs = $28, policies = $29,
            updated_at = $30
            WHERE id = $31"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(venue.vendor_id)
    .bind(&venue.name)
    .bind(&venue.slug)
    .bind(&venue.category)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.country)
    .bind(&venue.starting_price)
    .bind(venue.price_per_plate_veg)
    .bind(venue.guest_capacity_min)
    .bind(venue.guest_capacity_max)
    .bind(venue.accommodation_rooms)
    .bind(venue.star_rating)
    .bind(venue.google_rating)
    .bind(venue.total_reviews)
    .bind(&venue.hero_image_url)
    .bind(&venue.cuisine_types)
    .bind(venue.is_featured)
    .bind(venue.is_active)
    .bind(&venue.unique_selling_points)
    .bind(&venue.insider_tips)
    .bind(&venue.what_to_expect)
    .bind(&venue.photography_spots)
    .bind(&venue.planning_timeline)
    .bind(&venue.signature_experiences)
    .bind(&venue.budget_breakdown)
    .bind(&venue.vendor_recommendations)
    .bind(&venue.faqs)
    .bind(&venue.policies)
    .bind(venue.updated_at)
    .bind(venue.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_venue(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> anyhow::Result<u64> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected())
}

pub async fn get_venue_without_content(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<Venue>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["cardinality(unique_selling_points) = 0".to_string()],
        vec!["name ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<Venue>(&stmt, vec![]);
    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn count_venue(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<i64> {
    let res: (i64,) = sqlx::query_as(format!("SELECT count(id) FROM {}", TABLE_NAME).as_str())
        .fetch_one(&mut **tx)
        .await?;
    Ok(res.0)
}

#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct VendorStats {
    pub total_venues: i64,
    pub active_venues: i64,
    pub total_inquiries: i64,
    pub new_inquiries: i64,
    pub total_reviews: i64,
    pub avg_rating: f64,
    pub total_shortlisted: i64,
}

/// Aggregates over the venues owned by `vendor_id`.
pub async fn get_vendor_stats(
    tx: &mut Transaction<'_, Postgres>,
    vendor_id: &Uuid,
) -> anyhow::Result<VendorStats> {
    let stats: VendorStats = sqlx::query_as(
        r#"SELECT
        (SELECT count(id) FROM public.venue WHERE vendor_id = $1) AS total_venues,
        (SELECT count(id) FROM public.venue WHERE vendor_id = $1 AND is_active) AS active_venues,
        (SELECT count(i.id) FROM public.inquiry i
            JOIN public.venue v ON v.id = i.venue_id
            WHERE v.vendor_id = $1) AS total_inquiries,
        (SELECT count(i.id) FROM public.inquiry i
            JOIN public.venue v ON v.id = i.venue_id
            WHERE v.vendor_id = $1 AND i.status = 'new') AS new_inquiries,
        (SELECT COALESCE(sum(total_reviews), 0)::BIGINT FROM public.venue
            WHERE vendor_id = $1) AS total_reviews,
        (SELECT COALESCE(avg(google_rating), 0)::FLOAT8 FROM public.venue
            WHERE vendor_id = $1) AS avg_rating,
        (SELECT count(s.id) FROM public.shortlist s
            JOIN public.venue v ON v.id = s.venue_id
            WHERE v.vendor_id = $1) AS total_shortlisted
        "#,
    )
    .bind(vendor_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(stats)
}
