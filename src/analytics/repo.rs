use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::performance::repo::PerformanceRecord;
use crate::sessions::repo::StudySession;
use crate::wellness::repo::WellnessEntry;

/// Everything analytics needs for one user, fetched ordered by date.
pub struct UserData {
    pub sessions: Vec<StudySession>,
    pub records: Vec<PerformanceRecord>,
    pub entries: Vec<WellnessEntry>,
}

impl UserData {
    pub async fn fetch(db: &PgPool, user_id: Uuid) -> anyhow::Result<Self> {
        let sessions = StudySession::all_for_user(db, user_id).await?;
        let records = PerformanceRecord::all_for_user(db, user_id).await?;
        let entries = WellnessEntry::all_for_user(db, user_id).await?;
        Ok(Self {
            sessions,
            records,
            entries,
        })
    }

    pub fn data_points(&self) -> usize {
        self.sessions.len() + self.records.len() + self.entries.len()
    }
}

/// Headline numbers for the dashboard, computed in SQL.
#[derive(Debug, FromRow)]
pub struct DashboardTotals {
    pub total_sessions: i64,
    pub total_minutes: i64,
    pub avg_focus: Option<f64>,
}

impl DashboardTotals {
    pub async fn for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Self> {
        let totals = sqlx::query_as::<_, DashboardTotals>(
            r#"
            SELECT COUNT(*) AS total_sessions,
                   COALESCE(SUM(duration_minutes), 0)::BIGINT AS total_minutes,
                   AVG(focus_rating)::DOUBLE PRECISION AS avg_focus
            FROM study_sessions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(totals)
    }
}
