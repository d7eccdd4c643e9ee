use chrono::{Duration, Local};
use fake::{faker::lorem::en::Sentence, Dummy, Fake, Faker};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    model::task::{Task, TaskPriority, TaskStatus},
    repository::task::create_task,
};

/// `ext` is the wedding the tasks belong to.
pub struct TaskFactory {
    modifier_one: fn(x: &Task, ext: Uuid) -> Task,
    modifier_many: fn(x: &Task, idx: usize, ext: Uuid) -> Task,
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskFactory {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Task, ext: Uuid) -> Task) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Task, idx: usize, ext: Uuid) -> Task) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: Uuid) -> anyhow::Result<Task> {
        let data = Faker.fake::<TaskDummy>().into_task(ext);
        let data = (self.modifier_one)(&data, ext);
        let mut tx = db.begin().await?;
        create_task(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: Uuid,
    ) -> anyhow::Result<Vec<Task>> {
        let mut result: Vec<Task> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<TaskDummy>().into_task(ext);
            result.push((self.modifier_many)(&data, idx, ext));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_task(&mut tx, item).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct TaskDummy {
    pub id: Uuid,
    #[dummy(faker = "Sentence(2..5)")]
    pub title: String,
    #[dummy(faker = "7..180")]
    pub days_ahead: i64,
}

impl TaskDummy {
    fn into_task(self, wedding_id: Uuid) -> Task {
        let now = Local::now().fixed_offset();
        Task {
            id: self.id,
            wedding_id,
            title: self.title,
            description: None,
            category: None,
            due_date: Some(now.date_naive() + Duration::days(self.days_ahead)),
            status: TaskStatus::Pending.as_str().to_string(),
            priority: TaskPriority::Medium.as_str().to_string(),
            completed_at: None,
            display_order: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}
