use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::performance::dto::{format_date, parse_date};
use crate::wellness::repo::{NewWellnessEntry, WellnessEntry};

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    /// "YYYY-MM-DD"
    pub date: String,
    pub sleep_hours: f64,
    pub stress_level: i32,
    pub mood_rating: i32,
    #[serde(default)]
    pub exercise_minutes: i32,
    #[serde(default)]
    pub caffeine_intake: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub date: String,
    pub sleep_hours: f64,
    pub stress_level: i32,
    pub mood_rating: i32,
    pub exercise_minutes: i32,
    pub caffeine_intake: i32,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl EntryRequest {
    pub fn into_new(self) -> Result<NewWellnessEntry, ApiError> {
        if !(0.0..=24.0).contains(&self.sleep_hours) {
            return Err(ApiError::validation("Sleep hours must be between 0 and 24"));
        }
        if !(1..=5).contains(&self.stress_level) {
            return Err(ApiError::validation("Stress level must be between 1 and 5"));
        }
        if !(1..=5).contains(&self.mood_rating) {
            return Err(ApiError::validation("Mood rating must be between 1 and 5"));
        }
        if self.exercise_minutes < 0 {
            return Err(ApiError::validation("Exercise minutes cannot be negative"));
        }
        if self.caffeine_intake < 0 {
            return Err(ApiError::validation("Caffeine intake cannot be negative"));
        }
        let date = parse_date(&self.date, "date")?;
        Ok(NewWellnessEntry {
            date,
            sleep_hours: self.sleep_hours,
            stress_level: self.stress_level,
            mood_rating: self.mood_rating,
            exercise_minutes: self.exercise_minutes,
            caffeine_intake: self.caffeine_intake,
            notes: self.notes,
        })
    }
}

impl From<WellnessEntry> for EntryResponse {
    fn from(e: WellnessEntry) -> Self {
        Self {
            id: e.id,
            date: format_date(e.date),
            sleep_hours: e.sleep_hours,
            stress_level: e.stress_level,
            mood_rating: e.mood_rating,
            exercise_minutes: e.exercise_minutes,
            caffeine_intake: e.caffeine_intake,
            notes: e.notes,
            created_at: e.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EntryRequest {
        EntryRequest {
            date: "2026-04-01".into(),
            sleep_hours: 7.5,
            stress_level: 2,
            mood_rating: 4,
            exercise_minutes: 30,
            caffeine_intake: 1,
            notes: None,
        }
    }

    #[test]
    fn valid_entry_parses() {
        assert!(request().into_new().is_ok());
    }

    #[test]
    fn rejects_impossible_sleep() {
        let mut r = request();
        r.sleep_hours = 25.0;
        assert!(r.into_new().is_err());
    }

    #[test]
    fn rejects_negative_exercise() {
        let mut r = request();
        r.exercise_minutes = -10;
        assert!(r.into_new().is_err());
    }
}
