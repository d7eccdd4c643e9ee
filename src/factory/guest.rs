use chrono::Local;
use fake::{
    faker::{
        internet::en::SafeEmail,
        name::en::{FirstName, LastName},
        phone_number::en::PhoneNumber,
    },
    Dummy, Fake, Faker,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    model::guest::{Guest, GuestCategory, GuestSide, GuestStatus},
    repository::guest::create_guest,
};

/// `ext` is the wedding the guests belong to.
pub struct GuestFactory {
    modifier_one: fn(x: &Guest, ext: Uuid) -> Guest,
    modifier_many: fn(x: &Guest, idx: usize, ext: Uuid) -> Guest,
}

impl Default for GuestFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestFactory {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Guest, ext: Uuid) -> Guest) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Guest, idx: usize, ext: Uuid) -> Guest) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: Uuid) -> anyhow::Result<Guest> {
        let data = Faker.fake::<GuestDummy>().into_guest(ext);
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_guest(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: Uuid,
    ) -> anyhow::Result<Vec<Guest>> {
        let mut result: Vec<Guest> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<GuestDummy>().into_guest(ext);
            result.push((self.modifier_many)(&data, idx, ext));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_guest(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct GuestDummy {
    pub id: Uuid,
    #[dummy(faker = "FirstName()")]
    pub first_name: String,
    #[dummy(faker = "LastName()")]
    pub last_name: String,
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    #[dummy(faker = "PhoneNumber()")]
    pub phone: String,
}

impl GuestDummy {
    fn into_guest(self, wedding_id: Uuid) -> Guest {
        let now = Local::now().fixed_offset();
        Guest {
            id: self.id,
            wedding_id,
            first_name: self.first_name,
            last_name: Some(self.last_name),
            email: Some(self.email),
            phone: Some(self.phone),
            side: Some(GuestSide::Mutual.as_str().to_string()),
            category: Some(GuestCategory::Friends.as_str().to_string()),
            relationship: None,
            has_plus_one: false,
            plus_one_name: None,
            dietary_notes: None,
            needs_accommodation: false,
            needs_transportation: false,
            table_number: None,
            status: GuestStatus::Pending.as_str().to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}
