use thiserror::Error;
use tracing::info;

use crate::models::{ChallengeProgress, DailyRecord};
use crate::storage::{ProgressStore, StoreError};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("no challenge progress found")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayView {
    pub record: DailyRecord,
    pub day_number: i64,
    /// Always true today; kept for viewing past days later.
    pub is_current_day: bool,
}

#[derive(Clone)]
pub struct DayRecordService {
    store: ProgressStore,
}

impl DayRecordService {
    pub fn new(store: ProgressStore) -> Self {
        Self { store }
    }

    pub async fn resolve_today(&self, today: &str) -> Result<TodayView, RecordError> {
        let mut progress = self.store.initialize_if_absent(today).await?;

        if let Some(index) = progress
            .daily_records
            .iter()
            .position(|record| record.date == today)
        {
            if progress.current_day_index != index as i64 {
                progress.current_day_index = index as i64;
                self.store.save(&progress).await?;
            }
            return Ok(TodayView {
                record: progress.daily_records[index].clone(),
                day_number: index as i64 + 1,
                is_current_day: true,
            });
        }

        progress.daily_records.push(DailyRecord::new(today));
        let index = progress.daily_records.len() - 1;
        progress.current_day_index = index as i64;

        if !progress.is_active && progress.daily_records.len() == 1 {
            progress.is_active = true;
            progress.start_date = today.to_string();
            info!(start_date = today, "challenge started");
        }

        self.store.save(&progress).await?;
        Ok(TodayView {
            record: progress.daily_records[index].clone(),
            day_number: index as i64 + 1,
            is_current_day: true,
        })
    }

    /// Replaces the stored record for `record.date` wholesale; an unseen
    /// date is appended instead.
    pub async fn apply_task_update(
        &self,
        record: DailyRecord,
    ) -> Result<ChallengeProgress, RecordError> {
        let mut progress = self
            .store
            .load()
            .await?
            .ok_or(RecordError::NotFound)?;

        match progress
            .daily_records
            .iter()
            .position(|existing| existing.date == record.date)
        {
            Some(index) => {
                progress.daily_records[index] = record;
                // A date match always anchors the pointer, even backward.
                progress.current_day_index = index as i64;
            }
            None => {
                let date = record.date.clone();
                progress.daily_records.push(record);
                progress.current_day_index = progress.daily_records.len() as i64 - 1;

                if !progress.is_active && progress.daily_records.len() == 1 {
                    progress.is_active = true;
                    progress.start_date = date;
                }
            }
        }

        self.store.save(&progress).await?;
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::models::TaskKey;
    use crate::storage::{KvStore, MemoryStore};

    fn service_with_store() -> (DayRecordService, ProgressStore) {
        let store = ProgressStore::new(Arc::new(MemoryStore::default()));
        (DayRecordService::new(store.clone()), store)
    }

    fn complete_record(date: &str) -> DailyRecord {
        let mut record = DailyRecord::new(date);
        for task in TaskKey::ALL {
            record.set_completed(task, true);
        }
        record
    }

    #[tokio::test]
    async fn resolve_today_on_fresh_store_creates_first_record() {
        let (service, store) = service_with_store();

        let view = service.resolve_today("2026-08-01").await.unwrap();
        assert_eq!(view.record, DailyRecord::new("2026-08-01"));
        assert_eq!(view.day_number, 1);
        assert!(view.is_current_day);

        let progress = store.load().await.unwrap().unwrap();
        assert_eq!(progress.daily_records.len(), 1);
        assert_eq!(progress.current_day_index, 0);
        assert!(progress.is_active);
        assert_eq!(progress.start_date, "2026-08-01");
    }

    #[tokio::test]
    async fn resolve_today_is_idempotent() {
        let (service, store) = service_with_store();

        let first = service.resolve_today("2026-08-01").await.unwrap();
        let second = service.resolve_today("2026-08-01").await.unwrap();
        assert_eq!(first, second);

        let progress = store.load().await.unwrap().unwrap();
        assert_eq!(progress.daily_records.len(), 1);
    }

    #[tokio::test]
    async fn resolve_today_appends_each_new_date() {
        let (service, store) = service_with_store();

        service.resolve_today("2026-08-01").await.unwrap();
        let view = service.resolve_today("2026-08-02").await.unwrap();
        assert_eq!(view.day_number, 2);

        let progress = store.load().await.unwrap().unwrap();
        assert_eq!(progress.daily_records.len(), 2);
        assert_eq!(progress.current_day_index, 1);
        assert_eq!(progress.start_date, "2026-08-01");
    }

    #[tokio::test]
    async fn resolving_an_older_date_repoints_the_current_day() {
        let (service, store) = service_with_store();

        service.resolve_today("2026-08-01").await.unwrap();
        service.resolve_today("2026-08-02").await.unwrap();
        let view = service.resolve_today("2026-08-01").await.unwrap();
        assert_eq!(view.day_number, 1);

        let progress = store.load().await.unwrap().unwrap();
        assert_eq!(progress.current_day_index, 0);
        assert_eq!(progress.daily_records.len(), 2);
    }

    #[tokio::test]
    async fn apply_task_update_without_prior_state_is_not_found() {
        let (service, _store) = service_with_store();

        let result = service.apply_task_update(complete_record("2026-08-01")).await;
        assert!(matches!(result, Err(RecordError::NotFound)));
    }

    #[tokio::test]
    async fn apply_task_update_overwrites_only_the_matching_day() {
        let (service, store) = service_with_store();

        service.resolve_today("2026-08-01").await.unwrap();
        service.resolve_today("2026-08-02").await.unwrap();

        let progress = service
            .apply_task_update(complete_record("2026-08-01"))
            .await
            .unwrap();
        assert_eq!(progress.daily_records[0], complete_record("2026-08-01"));
        assert_eq!(progress.daily_records[1], DailyRecord::new("2026-08-02"));
        assert_eq!(progress.current_day_index, 0);

        assert_eq!(store.load().await.unwrap(), Some(progress));
    }

    #[tokio::test]
    async fn apply_task_update_appends_and_activates_on_first_record() {
        let (service, store) = service_with_store();
        store.initialize_if_absent("2026-08-01").await.unwrap();

        let mut record = DailyRecord::new("2026-08-01");
        record.set_completed(TaskKey::Diet, true);

        let progress = service.apply_task_update(record.clone()).await.unwrap();
        assert_eq!(progress.daily_records, vec![record]);
        assert_eq!(progress.current_day_index, 0);
        assert!(progress.is_active);
        assert_eq!(progress.start_date, "2026-08-01");

        assert_eq!(store.load().await.unwrap(), Some(progress));
    }

    #[tokio::test]
    async fn failed_save_propagates_and_leaves_store_untouched() {
        struct FailingWrites(Arc<MemoryStore>);

        #[async_trait]
        impl KvStore for FailingWrites {
            async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
                self.0.get(key).await
            }

            async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
                Err(StoreError::Write(std::io::Error::other("disk full")))
            }
        }

        let memory = Arc::new(MemoryStore::default());
        let good = ProgressStore::new(memory.clone());
        let seeded = good.initialize_if_absent("2026-08-01").await.unwrap();

        let failing = ProgressStore::new(Arc::new(FailingWrites(memory)));
        let service = DayRecordService::new(failing);

        let result = service.apply_task_update(complete_record("2026-08-01")).await;
        assert!(matches!(result, Err(RecordError::Storage(_))));
        assert_eq!(good.load().await.unwrap(), Some(seeded));
    }
}
