use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{OffsetDateTime, Time};
use uuid::Uuid;

/// One logged study session. Always read and written scoped to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudySession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub duration_minutes: i32,
    pub start_time: Time,
    pub end_time: Time,
    pub study_method: String,
    pub difficulty_level: i32,
    pub focus_rating: i32,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct NewStudySession {
    pub subject: String,
    pub duration_minutes: i32,
    pub start_time: Time,
    pub end_time: Time,
    pub study_method: String,
    pub difficulty_level: i32,
    pub focus_rating: i32,
    pub notes: Option<String>,
}

impl StudySession {
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<StudySession>> {
        let rows = sqlx::query_as::<_, StudySession>(
            r#"
            SELECT id, user_id, subject, duration_minutes, start_time, end_time,
                   study_method, difficulty_level, focus_rating, notes, created_at
            FROM study_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// All of a user's sessions ordered by creation time, for analytics.
    pub async fn all_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<StudySession>> {
        let rows = sqlx::query_as::<_, StudySession>(
            r#"
            SELECT id, user_id, subject, duration_minutes, start_time, end_time,
                   study_method, difficulty_level, focus_rating, notes, created_at
            FROM study_sessions
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<StudySession>> {
        let row = sqlx::query_as::<_, StudySession>(
            r#"
            SELECT id, user_id, subject, duration_minutes, start_time, end_time,
                   study_method, difficulty_level, focus_rating, notes, created_at
            FROM study_sessions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        new: &NewStudySession,
    ) -> anyhow::Result<StudySession> {
        let row = sqlx::query_as::<_, StudySession>(
            r#"
            INSERT INTO study_sessions
                (user_id, subject, duration_minutes, start_time, end_time,
                 study_method, difficulty_level, focus_rating, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, subject, duration_minutes, start_time, end_time,
                      study_method, difficulty_level, focus_rating, notes, created_at
            "#,
        )
        .bind(user_id)
        .bind(&new.subject)
        .bind(new.duration_minutes)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(&new.study_method)
        .bind(new.difficulty_level)
        .bind(new.focus_rating)
        .bind(&new.notes)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        new: &NewStudySession,
    ) -> anyhow::Result<Option<StudySession>> {
        let row = sqlx::query_as::<_, StudySession>(
            r#"
            UPDATE study_sessions
            SET subject = $3, duration_minutes = $4, start_time = $5, end_time = $6,
                study_method = $7, difficulty_level = $8, focus_rating = $9, notes = $10
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, subject, duration_minutes, start_time, end_time,
                      study_method, difficulty_level, focus_rating, notes, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&new.subject)
        .bind(new.duration_minutes)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(&new.study_method)
        .bind(new.difficulty_level)
        .bind(new.focus_rating)
        .bind(&new.notes)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM study_sessions WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
