use chrono::Local;
use fake::{
    faker::{address::en::CityName, lorem::en::Paragraph, name::en::Name},
    Dummy, Fake, Faker,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    model::review::{Review, ReviewStatus, ReviewType},
    repository::review::create_review,
};

pub struct ReviewFactory<T: Clone> {
    modifier_one: fn(x: &Review, ext: T) -> Review,
    modifier_many: fn(x: &Review, idx: usize, ext: T) -> Review,
}

impl<T: Clone> Default for ReviewFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ReviewFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Review, ext: T) -> Review) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Review, idx: usize, ext: T) -> Review) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Review> {
        let data = Faker.fake::<ReviewDummy>().into_review();
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_review(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Review>> {
        let mut result: Vec<Review> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<ReviewDummy>().into_review();
            result.push((self.modifier_many)(&data, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_review(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct ReviewDummy {
    pub id: Uuid,
    #[dummy(faker = "Name()")]
    pub reviewer_name: String,
    #[dummy(faker = "CityName()")]
    pub reviewer_city: String,
    #[dummy(faker = "1..6")]
    pub rating: i32,
    #[dummy(faker = "Paragraph(1..3)")]
    pub content: String,
}

impl ReviewDummy {
    fn into_review(self) -> Review {
        let now = Local::now().fixed_offset();
        Review {
            id: self.id,
            reviewer_name: self.reviewer_name,
            reviewer_email: None,
            reviewer_city: Some(self.reviewer_city),
            venue_id: None,
            destination_id: None,
            review_type: ReviewType::Planner.as_str().to_string(),
            rating: self.rating,
            title: None,
            content: self.content,
            wedding_date: None,
            guest_count: None,
            status: ReviewStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
