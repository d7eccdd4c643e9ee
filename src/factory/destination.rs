use chrono::Local;
use fake::{
    faker::{
        address::en::{CityName, CountryName, StateName},
        lorem::en::{Paragraph, Sentence},
    },
    Dummy, Fake, Faker,
};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    core::utils::slugify, model::destination::Destination,
    repository::destination::create_destination,
};

pub struct DestinationFactory<T: Clone> {
    modifier_one: fn(x: &Destination, ext: T) -> Destination,
    modifier_many: fn(x: &Destination, idx: usize, ext: T) -> Destination,
}

impl<T: Clone> Default for DestinationFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> DestinationFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Destination, ext: T) -> Destination) {
        self.modifier_one = modifier
    }

    pub fn modified_many(
        &mut self,
        modifier: fn(x: &Destination, idx: usize, ext: T) -> Destination,
    ) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Destination> {
        let data = Faker.fake::<DestinationDummy>().into_destination();
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_destination(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Destination>> {
        let mut result: Vec<Destination> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<DestinationDummy>().into_destination();
            result.push((self.modifier_many)(&data, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_destination(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct DestinationDummy {
    pub id: Uuid,
    #[dummy(faker = "CityName()")]
    pub name: String,
    #[dummy(faker = "StateName()")]
    pub state: String,
    #[dummy(faker = "CountryName()")]
    pub country: String,
    #[dummy(faker = "Sentence(3..6)")]
    pub tagline: String,
    #[dummy(faker = "Paragraph(2..4)")]
    pub description: String,
    #[dummy(faker = "100000..2000000")]
    pub avg_budget_min: i64,
    #[dummy(faker = "0..40")]
    pub total_venues: i32,
}

impl DestinationDummy {
    fn into_destination(self) -> Destination {
        let now = Local::now().fixed_offset();
        // suffix keeps slugs unique across fake city names
        let suffix = self.id.simple().to_string();
        Destination {
            id: self.id,
            slug: format!("{}-{}", slugify(&self.name), &suffix[suffix.len() - 8..]),
            city: self.name.clone(),
            hero_title: format!("Weddings in {}", self.name),
            name: self.name,
            state: Some(self.state),
            country: self.country,
            tagline: self.tagline,
            description: self.description,
            hero_image_url: "https://images.unsplash.com/photo-1524492412937-b28074a5d7da"
                .to_string(),
            gallery_images: vec![],
            best_season: "October to March".to_string(),
            best_months: vec!["October".to_string(), "November".to_string()],
            avg_budget_min: self.avg_budget_min,
            avg_budget_max: self.avg_budget_min * 10,
            total_venues: self.total_venues,
            is_featured: false,
            is_international: false,
            sort_order: 99,
            planning_tips: vec![],
            insider_secrets: vec![],
            best_photo_locations: Json(vec![]),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{factory::destination::DestinationFactory, model::destination::Destination};

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = DestinationFactory::<String>::new();
        factory.modified_one(|data, ext| Destination {
            name: ext.clone(),
            slug: ext.to_lowercase(),
            ..data.clone()
        });
        factory.generate_one(&pool, "Udaipur".to_string()).await?;

        // Expect
        let res: (String, String, bool) =
            sqlx::query_as("SELECT name, slug, is_featured FROM public.destination")
                .fetch_one(&pool)
                .await?;
        assert_eq!(res.0, "Udaipur".to_string());
        assert_eq!(res.1, "udaipur".to_string());
        assert!(!res.2);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = DestinationFactory::new();
        factory.generate_many(&pool, 10, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM public.destination")
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 10);
        Ok(())
    }
}
