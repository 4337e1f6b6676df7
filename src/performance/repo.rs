use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PerformanceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub assessment_type: String,
    pub score: f64,
    pub max_score: f64,
    pub date: Date,
    pub topics_covered: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct NewPerformanceRecord {
    pub subject: String,
    pub assessment_type: String,
    pub score: f64,
    pub max_score: f64,
    pub date: Date,
    pub topics_covered: Option<String>,
}

impl PerformanceRecord {
    /// Score as a percentage of the maximum, rounded to one decimal.
    pub fn percentage(&self) -> f64 {
        ((self.score / self.max_score) * 1000.0).round() / 10.0
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<PerformanceRecord>> {
        let rows = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            SELECT id, user_id, subject, assessment_type, score, max_score,
                   date, topics_covered, created_at
            FROM performance_records
            WHERE user_id = $1
            ORDER BY date DESC
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

    pub async fn all_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<PerformanceRecord>> {
        let rows = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            SELECT id, user_id, subject, assessment_type, score, max_score,
                   date, topics_covered, created_at
            FROM performance_records
            WHERE user_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<PerformanceRecord>> {
        let row = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            SELECT id, user_id, subject, assessment_type, score, max_score,
                   date, topics_covered, created_at
            FROM performance_records
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
        new: &NewPerformanceRecord,
    ) -> anyhow::Result<PerformanceRecord> {
        let row = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            INSERT INTO performance_records
                (user_id, subject, assessment_type, score, max_score, date, topics_covered)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, subject, assessment_type, score, max_score,
                      date, topics_covered, created_at
            "#,
        )
        .bind(user_id)
        .bind(&new.subject)
        .bind(&new.assessment_type)
        .bind(new.score)
        .bind(new.max_score)
        .bind(new.date)
        .bind(&new.topics_covered)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        new: &NewPerformanceRecord,
    ) -> anyhow::Result<Option<PerformanceRecord>> {
        let row = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            UPDATE performance_records
            SET subject = $3, assessment_type = $4, score = $5, max_score = $6,
                date = $7, topics_covered = $8
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, subject, assessment_type, score, max_score,
                      date, topics_covered, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&new.subject)
        .bind(&new.assessment_type)
        .bind(new.score)
        .bind(new.max_score)
        .bind(new.date)
        .bind(&new.topics_covered)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result =
            sqlx::query(r#"DELETE FROM performance_records WHERE id = $1 AND user_id = $2"#)
                .bind(id)
                .bind(user_id)
                .execute(db)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
