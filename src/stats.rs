use crate::models::{ChallengeProgress, DailyRecord, DaySummary, HistorySummary, TaskKey};

pub fn is_complete(record: &DailyRecord) -> bool {
    TaskKey::ALL.into_iter().all(|task| record.completed(task))
}

pub fn completed_count(record: &DailyRecord) -> u8 {
    TaskKey::ALL
        .into_iter()
        .filter(|task| record.completed(*task))
        .count() as u8
}

pub fn current_streak(records: &[DailyRecord]) -> u32 {
    records
        .iter()
        .rev()
        .take_while(|record| is_complete(record))
        .count() as u32
}

/// Each disjoint run of fully-completed days counts as one attempt.
pub fn attempt_count(records: &[DailyRecord]) -> u32 {
    let mut attempts = 0;
    let mut in_streak = false;

    for record in records {
        if is_complete(record) {
            if !in_streak {
                attempts += 1;
                in_streak = true;
            }
        } else {
            in_streak = false;
        }
    }

    attempts
}

pub fn build_history(progress: &ChallengeProgress) -> HistorySummary {
    let days = progress
        .daily_records
        .iter()
        .enumerate()
        .map(|(index, record)| DaySummary {
            date: record.date.clone(),
            day_number: index as i64 + 1,
            completed_tasks: completed_count(record),
            all_completed: is_complete(record),
            is_current: index as i64 == progress.current_day_index,
        })
        .collect();

    HistorySummary {
        days,
        current_streak: current_streak(&progress.daily_records),
        attempt_count: attempt_count(&progress.daily_records),
        current_day: progress.current_day_index + 1,
        is_active: progress.is_active,
        start_date: progress.start_date.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(date: &str) -> DailyRecord {
        let mut record = DailyRecord::new(date);
        for task in TaskKey::ALL {
            record.set_completed(task, true);
        }
        record
    }

    fn incomplete(date: &str) -> DailyRecord {
        let mut record = complete(date);
        record.take_progress_photo_completed = false;
        record
    }

    #[test]
    fn completed_count_spans_zero_to_six() {
        assert_eq!(completed_count(&DailyRecord::new("2026-08-01")), 0);
        assert_eq!(completed_count(&incomplete("2026-08-01")), 5);
        assert_eq!(completed_count(&complete("2026-08-01")), 6);

        assert!(!is_complete(&incomplete("2026-08-01")));
        assert!(is_complete(&complete("2026-08-01")));
    }

    #[test]
    fn current_streak_of_empty_history_is_zero() {
        assert_eq!(current_streak(&[]), 0);
    }

    #[test]
    fn current_streak_counts_backward_from_latest_day() {
        let broken = [
            complete("2026-08-01"),
            complete("2026-08-02"),
            incomplete("2026-08-03"),
        ];
        assert_eq!(current_streak(&broken), 0);

        let running = [
            incomplete("2026-08-01"),
            complete("2026-08-02"),
            complete("2026-08-03"),
        ];
        assert_eq!(current_streak(&running), 2);
    }

    #[test]
    fn attempt_count_counts_disjoint_runs() {
        assert_eq!(attempt_count(&[]), 0);

        let records = [
            complete("2026-08-01"),
            incomplete("2026-08-02"),
            complete("2026-08-03"),
            complete("2026-08-04"),
            incomplete("2026-08-05"),
            complete("2026-08-06"),
        ];
        assert_eq!(attempt_count(&records), 3);
    }

    #[test]
    fn attempt_count_treats_one_unbroken_run_as_one_attempt() {
        let records = [
            complete("2026-08-01"),
            complete("2026-08-02"),
            complete("2026-08-03"),
        ];
        assert_eq!(attempt_count(&records), 1);
    }

    #[test]
    fn build_history_summarizes_each_day() {
        let mut progress = ChallengeProgress::new("2026-08-01");
        progress.daily_records = vec![
            complete("2026-08-01"),
            incomplete("2026-08-02"),
            complete("2026-08-03"),
        ];
        progress.current_day_index = 2;
        progress.is_active = true;

        let history = build_history(&progress);
        assert_eq!(history.days.len(), 3);
        assert_eq!(history.current_streak, 1);
        assert_eq!(history.attempt_count, 2);
        assert_eq!(history.current_day, 3);
        assert!(history.is_active);
        assert_eq!(history.start_date, "2026-08-01");

        let second = &history.days[1];
        assert_eq!(second.date, "2026-08-02");
        assert_eq!(second.day_number, 2);
        assert_eq!(second.completed_tasks, 5);
        assert!(!second.all_completed);
        assert!(!second.is_current);
        assert!(history.days[2].is_current);
    }

    #[test]
    fn build_history_of_empty_progress_is_all_zeroes() {
        let history = build_history(&ChallengeProgress::empty());
        assert!(history.days.is_empty());
        assert_eq!(history.current_streak, 0);
        assert_eq!(history.attempt_count, 0);
        assert_eq!(history.current_day, 0);
        assert!(!history.is_active);
        assert_eq!(history.start_date, "");
    }
}
