use chrono::Local;
use fake::{
    faker::{
        internet::en::SafeEmail, lorem::en::Sentence, name::en::Name,
        phone_number::en::PhoneNumber,
    },
    Dummy, Fake, Faker,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    model::inquiry::{Inquiry, InquiryPriority, InquiryStatus},
    repository::inquiry::create_inquiry,
};

pub struct InquiryFactory<T: Clone> {
    modifier_one: fn(x: &Inquiry, ext: T) -> Inquiry,
    modifier_many: fn(x: &Inquiry, idx: usize, ext: T) -> Inquiry,
}

impl<T: Clone> Default for InquiryFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> InquiryFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Inquiry, ext: T) -> Inquiry) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Inquiry, idx: usize, ext: T) -> Inquiry) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Inquiry> {
        let data = Faker.fake::<InquiryDummy>().into_inquiry();
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_inquiry(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Inquiry>> {
        let mut result: Vec<Inquiry> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<InquiryDummy>().into_inquiry();
            result.push((self.modifier_many)(&data, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_inquiry(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct InquiryDummy {
    pub id: Uuid,
    #[dummy(faker = "Name()")]
    pub name: String,
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    #[dummy(faker = "PhoneNumber()")]
    pub phone: String,
    #[dummy(faker = "100..800")]
    pub guest_count: i32,
    #[dummy(faker = "Sentence(6..12)")]
    pub message: String,
}

impl InquiryDummy {
    fn into_inquiry(self) -> Inquiry {
        let now = Local::now().fixed_offset();
        Inquiry {
            id: self.id,
            venue_id: None,
            destination: Some("Udaipur".to_string()),
            name: self.name,
            email: self.email,
            phone: self.phone,
            wedding_date: None,
            guest_count: Some(self.guest_count),
            budget_range: Some("50L - 1Cr".to_string()),
            message: self.message,
            source_page: Some("/contact".to_string()),
            status: InquiryStatus::New.as_str().to_string(),
            priority: InquiryPriority::Normal.as_str().to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::factory::inquiry::InquiryFactory;

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = InquiryFactory::new();
        factory.generate_many(&pool, 3, ()).await?;

        // Expect
        let res: Vec<(String, String)> =
            sqlx::query_as("SELECT status, priority FROM public.inquiry")
                .fetch_all(&pool)
                .await?;
        assert_eq!(res.len(), 3);
        assert!(res.iter().all(|x| x.0 == "new" && x.1 == "normal"));
        Ok(())
    }
}
