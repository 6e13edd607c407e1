use serde::{Deserialize, Serialize};

pub const CHALLENGE_LENGTH_DAYS: i64 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKey {
    Workout1,
    Workout2,
    Diet,
    Reading,
    Water,
    Photo,
}

impl TaskKey {
    pub const ALL: [TaskKey; 6] = [
        TaskKey::Workout1,
        TaskKey::Workout2,
        TaskKey::Diet,
        TaskKey::Reading,
        TaskKey::Water,
        TaskKey::Photo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TaskKey::Workout1 => "workout1",
            TaskKey::Workout2 => "workout2",
            TaskKey::Diet => "diet",
            TaskKey::Reading => "reading",
            TaskKey::Water => "water",
            TaskKey::Photo => "photo",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            TaskKey::Workout1 => "workout1_completed",
            TaskKey::Workout2 => "workout2_completed",
            TaskKey::Diet => "diet_followed",
            TaskKey::Reading => "read_10_pages_completed",
            TaskKey::Water => "drink_1_gallon_water_completed",
            TaskKey::Photo => "take_progress_photo_completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskKey::Workout1 => "First Workout",
            TaskKey::Workout2 => "Second Workout",
            TaskKey::Diet => "Follow Diet Plan",
            TaskKey::Reading => "Read 10 Pages",
            TaskKey::Water => "Drink Water",
            TaskKey::Photo => "Progress Photo",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TaskKey::Workout1 => "Complete a 45-minute workout (one must be outdoors)",
            TaskKey::Workout2 => "Complete another 45-minute workout (one must be outdoors)",
            TaskKey::Diet => "Stick to your chosen diet with zero cheat meals",
            TaskKey::Reading => "Read 10 pages of a non-fiction book",
            TaskKey::Water => "Drink 1 gallon (3.8 liters) of water",
            TaskKey::Photo => "Take a progress picture",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        TaskKey::ALL.into_iter().find(|task| task.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyRecord {
    pub date: String,
    pub workout1_completed: bool,
    pub workout2_completed: bool,
    pub diet_followed: bool,
    pub read_10_pages_completed: bool,
    pub drink_1_gallon_water_completed: bool,
    pub take_progress_photo_completed: bool,
}

impl DailyRecord {
    pub fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            ..Self::default()
        }
    }

    pub fn completed(&self, task: TaskKey) -> bool {
        match task {
            TaskKey::Workout1 => self.workout1_completed,
            TaskKey::Workout2 => self.workout2_completed,
            TaskKey::Diet => self.diet_followed,
            TaskKey::Reading => self.read_10_pages_completed,
            TaskKey::Water => self.drink_1_gallon_water_completed,
            TaskKey::Photo => self.take_progress_photo_completed,
        }
    }

    pub fn set_completed(&mut self, task: TaskKey, value: bool) {
        match task {
            TaskKey::Workout1 => self.workout1_completed = value,
            TaskKey::Workout2 => self.workout2_completed = value,
            TaskKey::Diet => self.diet_followed = value,
            TaskKey::Reading => self.read_10_pages_completed = value,
            TaskKey::Water => self.drink_1_gallon_water_completed = value,
            TaskKey::Photo => self.take_progress_photo_completed = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeProgress {
    pub daily_records: Vec<DailyRecord>,
    /// Index of the active day in `daily_records`, `-1` when no days exist.
    pub current_day_index: i64,
    pub start_date: String,
    pub is_active: bool,
    /// Carried for a future explicit close; no operation sets it.
    pub end_date: Option<String>,
}

impl ChallengeProgress {
    pub fn new(start_date: &str) -> Self {
        Self {
            daily_records: Vec::new(),
            current_day_index: -1,
            start_date: start_date.to_string(),
            is_active: false,
            end_date: None,
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }

    pub fn current_day_record(&self) -> Option<&DailyRecord> {
        usize::try_from(self.current_day_index)
            .ok()
            .and_then(|index| self.daily_records.get(index))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub record: DailyRecord,
    pub day_number: i64,
    pub is_current_day: bool,
    pub completed_tasks: u8,
    pub all_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub day_number: i64,
    pub completed_tasks: u8,
    pub all_completed: bool,
    pub is_current: bool,
}

#[derive(Debug, Serialize)]
pub struct HistorySummary {
    pub days: Vec<DaySummary>,
    pub current_streak: u32,
    pub attempt_count: u32,
    pub current_day: i64,
    pub is_active: bool,
    pub start_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_keys_parse_from_their_names() {
        for task in TaskKey::ALL {
            assert_eq!(TaskKey::parse(task.name()), Some(task));
        }
        assert_eq!(TaskKey::parse("sleep"), None);
    }

    #[test]
    fn task_accessors_cover_every_field() {
        let mut record = DailyRecord::new("2026-08-01");
        for task in TaskKey::ALL {
            assert!(!record.completed(task));
            record.set_completed(task, true);
            assert!(record.completed(task));
        }
        assert!(record.workout1_completed);
        assert!(record.workout2_completed);
        assert!(record.diet_followed);
        assert!(record.read_10_pages_completed);
        assert!(record.drink_1_gallon_water_completed);
        assert!(record.take_progress_photo_completed);
    }

    #[test]
    fn current_day_record_checks_bounds() {
        let mut progress = ChallengeProgress::empty();
        assert_eq!(progress.current_day_record(), None);

        progress.daily_records.push(DailyRecord::new("2026-08-01"));
        progress.current_day_index = 0;
        assert_eq!(
            progress.current_day_record().map(|r| r.date.as_str()),
            Some("2026-08-01")
        );

        progress.current_day_index = 7;
        assert_eq!(progress.current_day_record(), None);
    }
}
