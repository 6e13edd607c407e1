use crate::errors::AppError;
use crate::models::{ChallengeProgress, DailyRecord, HistorySummary, TaskKey, TodayResponse};
use crate::records::{DayRecordService, TodayView};
use crate::state::AppState;
use crate::stats::{self, build_history};
use crate::ui::{render_history, render_today};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};
use chrono::{Local, NaiveDate};
use std::time::Duration;
use tokio::time::timeout;

const SAVE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn today_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let date = today_string();
    let _guard = state.write_gate.lock().await;
    let view = state.records.resolve_today(&date).await?;
    Ok(Html(render_today(&view)))
}

pub async fn history_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let progress = state
        .store
        .load()
        .await?
        .unwrap_or_else(ChallengeProgress::empty);
    Ok(Html(render_history(&build_history(&progress))))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let date = today_string();
    let _guard = state.write_gate.lock().await;
    let view = state.records.resolve_today(&date).await?;
    Ok(Json(to_response(&view)))
}

pub async fn get_history(State(state): State<AppState>) -> Result<Json<HistorySummary>, AppError> {
    let progress = state
        .store
        .load()
        .await?
        .unwrap_or_else(ChallengeProgress::empty);
    Ok(Json(build_history(&progress)))
}

pub async fn update_tasks(
    State(state): State<AppState>,
    Json(record): Json<DailyRecord>,
) -> Result<Json<TodayResponse>, AppError> {
    let canonical = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
        .is_ok_and(|date| date.to_string() == record.date);
    if !canonical {
        return Err(AppError::bad_request("date must be formatted YYYY-MM-DD"));
    }

    let _guard = state.write_gate.lock().await;
    let saved = record.clone();
    let progress = save_bounded(&state.records, record, SAVE_TIMEOUT).await?;

    Ok(Json(to_response(&TodayView {
        record: saved,
        day_number: progress.current_day_index + 1,
        is_current_day: true,
    })))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(task): Path<String>,
) -> Result<Redirect, AppError> {
    let task = TaskKey::parse(&task).ok_or_else(|| {
        AppError::bad_request(
            "unknown task; expected one of workout1, workout2, diet, reading, water, photo",
        )
    })?;

    let date = today_string();
    let _guard = state.write_gate.lock().await;
    let view = state.records.resolve_today(&date).await?;

    let mut record = view.record;
    let flipped = !record.completed(task);
    record.set_completed(task, flipped);
    save_bounded(&state.records, record, SAVE_TIMEOUT).await?;

    Ok(Redirect::to("/"))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<HistorySummary>, AppError> {
    let _guard = state.write_gate.lock().await;
    let progress = state.store.reset().await?;
    Ok(Json(build_history(&progress)))
}

pub async fn reset_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let _guard = state.write_gate.lock().await;
    state.store.reset().await?;
    Ok(Redirect::to("/history"))
}

// Timing out abandons the wait, not the save: the spawned write keeps
// running and may still land after the caller has been told to retry.
async fn save_bounded(
    records: &DayRecordService,
    record: DailyRecord,
    deadline: Duration,
) -> Result<ChallengeProgress, AppError> {
    let save = tokio::spawn({
        let records = records.clone();
        async move { records.apply_task_update(record).await }
    });
    let joined = timeout(deadline, save).await?;
    Ok(joined.map_err(AppError::internal)??)
}

fn to_response(view: &TodayView) -> TodayResponse {
    TodayResponse {
        completed_tasks: stats::completed_count(&view.record),
        all_completed: stats::is_complete(&view.record),
        record: view.record.clone(),
        day_number: view.day_number,
        is_current_day: view.is_current_day,
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;

    use super::*;
    use crate::storage::{KvStore, MemoryStore, ProgressStore, StoreError};

    struct SlowWrites(Arc<MemoryStore>);

    #[async_trait]
    impl KvStore for SlowWrites {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            tokio::time::sleep(Duration::from_millis(400)).await;
            self.0.set(key, value).await
        }
    }

    #[tokio::test]
    async fn timed_out_save_reports_failure_but_still_lands() {
        let memory = Arc::new(MemoryStore::default());
        let direct = ProgressStore::new(memory.clone());
        direct.initialize_if_absent("2026-08-01").await.unwrap();

        let records = DayRecordService::new(ProgressStore::new(Arc::new(SlowWrites(memory))));
        let mut record = DailyRecord::new("2026-08-01");
        record.set_completed(TaskKey::Diet, true);

        let err = save_bounded(&records, record.clone(), Duration::from_millis(100))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        let pending = direct.load().await.unwrap().unwrap();
        assert!(pending.daily_records.is_empty());

        tokio::time::sleep(Duration::from_millis(700)).await;
        let landed = direct.load().await.unwrap().unwrap();
        assert_eq!(landed.daily_records, vec![record]);
    }
}
