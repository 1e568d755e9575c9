use async_trait::async_trait;
use tokio::sync::RwLock;

use almanac_core::domain::{Advice, MONTH_NAMES, Month, MonthlyAdvice};
use almanac_core::error::RepoError;
use almanac_core::ports::{AdviceRepository, MonthRepository};

use super::Table;

fn seeded_months() -> Vec<Month> {
    MONTH_NAMES
        .iter()
        .zip(1..)
        .map(|(name, num)| Month {
            id: num as i32,
            num,
            name: name.to_string(),
        })
        .collect()
}

/// The twelve calendar months, as seeded by the migration.
pub struct InMemoryMonthRepository {
    months: Vec<Month>,
}

impl InMemoryMonthRepository {
    pub fn new() -> Self {
        Self {
            months: seeded_months(),
        }
    }
}

impl Default for InMemoryMonthRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonthRepository for InMemoryMonthRepository {
    async fn find_by_num(&self, num: u32) -> Result<Option<Month>, RepoError> {
        Ok(self.months.iter().find(|m| m.num == num).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Month>, RepoError> {
        Ok(self.months.clone())
    }
}

/// In-memory advice store.
pub struct InMemoryAdviceRepository {
    months: Vec<Month>,
    store: RwLock<Table<Advice>>,
}

impl InMemoryAdviceRepository {
    pub fn new() -> Self {
        Self {
            months: seeded_months(),
            store: RwLock::new(Table::new()),
        }
    }

    fn months_by_num(&self, nums: &[u32]) -> Vec<Month> {
        self.months
            .iter()
            .filter(|m| nums.contains(&m.num))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryAdviceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdviceRepository for InMemoryAdviceRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Advice>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn list_by_month(&self, num: u32) -> Result<Vec<MonthlyAdvice>, RepoError> {
        let store = self.store.read().await;
        let advices = store
            .rows
            .values()
            .filter_map(|advice| {
                advice
                    .months
                    .iter()
                    .find(|m| m.num == num)
                    .map(|month| MonthlyAdvice {
                        id: advice.id,
                        detail: advice.detail.clone(),
                        month: month.name.clone(),
                    })
            })
            .collect();
        Ok(advices)
    }

    async fn create(&self, detail: &str, months: &[u32]) -> Result<Vec<Advice>, RepoError> {
        let months = self.months_by_num(months);
        let mut store = self.store.write().await;

        Ok(months
            .into_iter()
            .map(|month| {
                store.insert_with(|id| Advice {
                    id,
                    detail: detail.to_string(),
                    months: vec![month],
                })
            })
            .collect())
    }

    async fn update(
        &self,
        id: i32,
        months: &[u32],
        detail: Option<&str>,
    ) -> Result<Option<Advice>, RepoError> {
        let months = self.months_by_num(months);
        let mut store = self.store.write().await;

        let Some(advice) = store.rows.get_mut(&id) else {
            return Ok(None);
        };
        advice.months = months;
        if let Some(detail) = detail {
            advice.detail = detail.to_string();
        }
        Ok(Some(advice.clone()))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}
