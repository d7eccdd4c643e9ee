use chrono::{Duration, Local};
use fake::{
    faker::{address::en::CityName, name::en::FirstName},
    Dummy, Fake, Faker,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    model::wedding::{
        website_slug, DestinationType, InvitationStatus, MemberRole, PlanningStatus, Wedding,
        WeddingMember,
    },
    repository::wedding::{create_wedding, create_wedding_member},
};

/// `ext` is the owner's profile id; each wedding is stored with its owner membership.
pub struct WeddingFactory {
    modifier_one: fn(x: &Wedding, ext: Uuid) -> Wedding,
    modifier_many: fn(x: &Wedding, idx: usize, ext: Uuid) -> Wedding,
}

impl Default for WeddingFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl WeddingFactory {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Wedding, ext: Uuid) -> Wedding) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Wedding, idx: usize, ext: Uuid) -> Wedding) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: Uuid) -> anyhow::Result<Wedding> {
        let data = Faker.fake::<WeddingDummy>().into_wedding(ext);
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_wedding(&mut tx, &data).await?;
        create_wedding_member(&mut tx, &owner_member(&data, ext)).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: Uuid,
    ) -> anyhow::Result<Vec<Wedding>> {
        let mut result: Vec<Wedding> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<WeddingDummy>().into_wedding(ext);
            result.push((self.modifier_many)(&data, idx, ext));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_wedding(&mut tx, item).await?;
            create_wedding_member(&mut tx, &owner_member(item, ext)).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

fn owner_member(wedding: &Wedding, profile_id: Uuid) -> WeddingMember {
    WeddingMember {
        id: Uuid::now_v7(),
        wedding_id: wedding.id,
        profile_id,
        role: MemberRole::Owner.as_str().to_string(),
        invitation_status: InvitationStatus::Accepted.as_str().to_string(),
        invited_by: None,
        created_at: Local::now().fixed_offset(),
    }
}

#[derive(Debug, Dummy, Clone)]
struct WeddingDummy {
    pub id: Uuid,
    #[dummy(faker = "FirstName()")]
    pub bride_name: String,
    #[dummy(faker = "FirstName()")]
    pub groom_name: String,
    #[dummy(faker = "CityName()")]
    pub primary_city: String,
    #[dummy(faker = "30..400")]
    pub days_ahead: i64,
    #[dummy(faker = "100..800")]
    pub estimated_guests: i32,
    #[dummy(faker = "1000000..10000000")]
    pub total_budget: i64,
}

impl WeddingDummy {
    fn into_wedding(self, created_by: Uuid) -> Wedding {
        let now = Local::now().fixed_offset();
        Wedding {
            id: self.id,
            website_slug: website_slug(&self.bride_name, &self.groom_name, &self.id),
            bride_name: self.bride_name,
            groom_name: self.groom_name,
            wedding_date: Some(now.date_naive() + Duration::days(self.days_ahead)),
            primary_city: Some(self.primary_city),
            destination_type: DestinationType::Destination.as_str().to_string(),
            estimated_guests: Some(self.estimated_guests),
            total_budget: Some(self.total_budget),
            currency: "INR".to_string(),
            planning_status: PlanningStatus::Planning.as_str().to_string(),
            created_by: Some(created_by),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}
