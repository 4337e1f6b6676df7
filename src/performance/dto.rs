use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::ApiError;
use crate::performance::repo::{NewPerformanceRecord, PerformanceRecord};

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub subject: String,
    pub assessment_type: String,
    pub score: f64,
    pub max_score: f64,
    /// "YYYY-MM-DD"
    pub date: String,
    #[serde(default)]
    pub topics_covered: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub id: Uuid,
    pub subject: String,
    pub assessment_type: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub date: String,
    pub topics_covered: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub(crate) fn parse_date(value: &str, field: &str) -> Result<Date, ApiError> {
    let fmt = format_description!("[year]-[month]-[day]");
    Date::parse(value, &fmt)
        .map_err(|_| ApiError::validation(format!("{field} must be in YYYY-MM-DD format")))
}

pub(crate) fn format_date(d: Date) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month() as u8, d.day())
}

impl RecordRequest {
    pub fn into_new(self) -> Result<NewPerformanceRecord, ApiError> {
        if self.subject.trim().is_empty() {
            return Err(ApiError::validation("Subject is required"));
        }
        if self.assessment_type.trim().is_empty() {
            return Err(ApiError::validation("Assessment type is required"));
        }
        if self.score < 0.0 {
            return Err(ApiError::validation("Score cannot be negative"));
        }
        if self.max_score <= 0.0 {
            return Err(ApiError::validation("Max score must be positive"));
        }
        if self.score > self.max_score {
            return Err(ApiError::validation("Score cannot exceed max score"));
        }
        let date = parse_date(&self.date, "date")?;
        Ok(NewPerformanceRecord {
            subject: self.subject.trim().to_string(),
            assessment_type: self.assessment_type.trim().to_string(),
            score: self.score,
            max_score: self.max_score,
            date,
            topics_covered: self.topics_covered,
        })
    }
}

impl From<PerformanceRecord> for RecordResponse {
    fn from(r: PerformanceRecord) -> Self {
        let percentage = r.percentage();
        Self {
            id: r.id,
            subject: r.subject,
            assessment_type: r.assessment_type,
            score: r.score,
            max_score: r.max_score,
            percentage,
            date: format_date(r.date),
            topics_covered: r.topics_covered,
            created_at: r.created_at,
        }
    }
}
