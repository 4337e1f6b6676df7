use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime, Time};
use uuid::Uuid;

use crate::error::ApiError;
use crate::sessions::repo::{NewStudySession, StudySession};

/// Request body for creating or replacing a study session.
/// Times come in as "HH:MM" strings, matching what the forms submit.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub subject: String,
    pub duration_minutes: i32,
    pub start_time: String,
    pub end_time: String,
    pub study_method: String,
    pub difficulty_level: i32,
    pub focus_rating: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub subject: String,
    pub duration_minutes: i32,
    pub start_time: String,
    pub end_time: String,
    pub study_method: String,
    pub difficulty_level: i32,
    pub focus_rating: i32,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub(crate) fn parse_hhmm(value: &str, field: &str) -> Result<Time, ApiError> {
    let fmt = format_description!("[hour]:[minute]");
    Time::parse(value, &fmt)
        .map_err(|_| ApiError::validation(format!("{field} must be in HH:MM format")))
}

pub(crate) fn format_hhmm(t: Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

impl SessionRequest {
    pub fn into_new(self) -> Result<NewStudySession, ApiError> {
        if self.subject.trim().is_empty() {
            return Err(ApiError::validation("Subject is required"));
        }
        if self.study_method.trim().is_empty() {
            return Err(ApiError::validation("Study method is required"));
        }
        if self.duration_minutes <= 0 {
            return Err(ApiError::validation("Duration must be positive"));
        }
        if !(1..=5).contains(&self.difficulty_level) {
            return Err(ApiError::validation("Difficulty level must be between 1 and 5"));
        }
        if !(1..=5).contains(&self.focus_rating) {
            return Err(ApiError::validation("Focus rating must be between 1 and 5"));
        }
        let start_time = parse_hhmm(&self.start_time, "start_time")?;
        let end_time = parse_hhmm(&self.end_time, "end_time")?;
        Ok(NewStudySession {
            subject: self.subject.trim().to_string(),
            duration_minutes: self.duration_minutes,
            start_time,
            end_time,
            study_method: self.study_method.trim().to_string(),
            difficulty_level: self.difficulty_level,
            focus_rating: self.focus_rating,
            notes: self.notes,
        })
    }
}

impl From<StudySession> for SessionResponse {
    fn from(s: StudySession) -> Self {
        Self {
            id: s.id,
            subject: s.subject,
            duration_minutes: s.duration_minutes,
            start_time: format_hhmm(s.start_time),
            end_time: format_hhmm(s.end_time),
            study_method: s.study_method,
            difficulty_level: s.difficulty_level,
            focus_rating: s.focus_rating,
            notes: s.notes,
            created_at: s.created_at,
        }
    }
}
