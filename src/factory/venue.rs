use chrono::Local;
use fake::{
    faker::{
        address::en::{CityName, StateName},
        company::en::CompanyName,
    },
    Dummy, Fake, Faker,
};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    core::utils::slugify,
    model::venue::{Venue, CATEGORIES},
    repository::venue::create_venue,
};

pub struct VenueFactory<T: Clone> {
    modifier_one: fn(x: &Venue, ext: T) -> Venue,
    modifier_many: fn(x: &Venue, idx: usize, ext: T) -> Venue,
}

impl<T: Clone> Default for VenueFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> VenueFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Venue, ext: T) -> Venue) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Venue, idx: usize, ext: T) -> Venue) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Venue> {
        let data = Faker.fake::<VenueDummy>().into_venue();
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_venue(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Venue>> {
        let mut result: Vec<Venue> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<VenueDummy>().into_venue();
            result.push((self.modifier_many)(&data, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_venue(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct VenueDummy {
    pub id: Uuid,
    #[dummy(faker = "CompanyName()")]
    pub name: String,
    #[dummy(faker = "0..9")]
    pub category_idx: usize,
    #[dummy(faker = "CityName()")]
    pub city: String,
    #[dummy(faker = "StateName()")]
    pub state: String,
    #[dummy(faker = "1500..6000")]
    pub price_per_plate_veg: i64,
    #[dummy(faker = "50..200")]
    pub guest_capacity_min: i32,
    #[dummy(faker = "300..1500")]
    pub guest_capacity_max: i32,
    #[dummy(faker = "20..300")]
    pub accommodation_rooms: i32,
    #[dummy(faker = "3..6")]
    pub star_rating: i32,
    #[dummy(faker = "0..500")]
    pub total_reviews: i32,
}

impl VenueDummy {
    fn into_venue(self) -> Venue {
        let now = Local::now().fixed_offset();
        let suffix = self.id.simple().to_string();
        Venue {
            id: self.id,
            vendor_id: None,
            slug: format!("{}-{}", slugify(&self.name), &suffix[suffix.len() - 8..]),
            name: self.name,
            category: CATEGORIES[self.category_idx % CATEGORIES.len()].to_string(),
            city: self.city,
            state: self.state,
            country: "India".to_string(),
            starting_price: format!("₹{} per plate", self.price_per_plate_veg),
            price_per_plate_veg: Some(self.price_per_plate_veg),
            guest_capacity_min: self.guest_capacity_min,
            guest_capacity_max: self.guest_capacity_max,
            accommodation_rooms: Some(self.accommodation_rooms),
            star_rating: self.star_rating,
            google_rating: 4.5,
            total_reviews: self.total_reviews,
            hero_image_url: "https://images.unsplash.com/photo-1519741497674-611481863552"
                .to_string(),
            cuisine_types: vec!["North Indian".to_string(), "Continental".to_string()],
            is_featured: false,
            is_active: true,
            unique_selling_points: vec![],
            insider_tips: vec![],
            what_to_expect: vec![],
            photography_spots: vec![],
            planning_timeline: Json(vec![]),
            signature_experiences: Json(vec![]),
            budget_breakdown: Json(vec![]),
            vendor_recommendations: Json(vec![]),
            faqs: Json(vec![]),
            policies: Json(vec![]),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{factory::venue::VenueFactory, model::venue::Venue};

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = VenueFactory::new();
        factory.modified_one(|data, _| Venue {
            category: "Fort Hotel".to_string(),
            is_featured: true,
            ..data.clone()
        });
        let venue = factory.generate_one(&pool, ()).await?;

        // Expect
        let res: (String, bool, bool) =
            sqlx::query_as("SELECT category, is_featured, is_active FROM public.venue WHERE id = $1")
                .bind(venue.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(res.0, "Fort Hotel".to_string());
        assert!(res.1);
        assert!(res.2);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = VenueFactory::new();
        factory.generate_many(&pool, 5, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM public.venue")
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 5);
        Ok(())
    }
}
