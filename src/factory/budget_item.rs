use chrono::Local;
use fake::{faker::lorem::en::Word, Dummy, Fake, Faker};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    model::budget_item::{BudgetItem, PaymentStatus, BUDGET_CATEGORIES},
    repository::budget_item::create_budget_item,
};

/// `ext` is the wedding the items belong to.
pub struct BudgetItemFactory {
    modifier_one: fn(x: &BudgetItem, ext: Uuid) -> BudgetItem,
    modifier_many: fn(x: &BudgetItem, idx: usize, ext: Uuid) -> BudgetItem,
}

impl Default for BudgetItemFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetItemFactory {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &BudgetItem, ext: Uuid) -> BudgetItem) {
        self.modifier_one = modifier
    }

    pub fn modified_many(
        &mut self,
        modifier: fn(x: &BudgetItem, idx: usize, ext: Uuid) -> BudgetItem,
    ) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: Uuid) -> anyhow::Result<BudgetItem> {
        let data = Faker.fake::<BudgetItemDummy>().into_budget_item(ext);
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_budget_item(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: Uuid,
    ) -> anyhow::Result<Vec<BudgetItem>> {
        let mut result: Vec<BudgetItem> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<BudgetItemDummy>().into_budget_item(ext);
            result.push((self.modifier_many)(&data, idx, ext));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_budget_item(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct BudgetItemDummy {
    pub id: Uuid,
    #[dummy(faker = "Word()")]
    pub name: String,
    #[dummy(faker = "0..11")]
    pub category_idx: usize,
    #[dummy(faker = "50000..500000")]
    pub estimated_cost: i64,
}

impl BudgetItemDummy {
    fn into_budget_item(self, wedding_id: Uuid) -> BudgetItem {
        let now = Local::now().fixed_offset();
        BudgetItem {
            id: self.id,
            wedding_id,
            category: Some(
                BUDGET_CATEGORIES[self.category_idx % BUDGET_CATEGORIES.len()]
                    .0
                    .to_string(),
            ),
            name: self.name,
            estimated_cost: self.estimated_cost,
            actual_cost: None,
            amount_paid: 0,
            payment_status: PaymentStatus::Pending.as_str().to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}
