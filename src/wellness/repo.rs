use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WellnessEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub sleep_hours: f64,
    pub stress_level: i32,
    pub mood_rating: i32,
    pub exercise_minutes: i32,
    pub caffeine_intake: i32,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct NewWellnessEntry {
    pub date: Date,
    pub sleep_hours: f64,
    pub stress_level: i32,
    pub mood_rating: i32,
    pub exercise_minutes: i32,
    pub caffeine_intake: i32,
    pub notes: Option<String>,
}

impl WellnessEntry {
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<WellnessEntry>> {
        let rows = sqlx::query_as::<_, WellnessEntry>(
            r#"
            SELECT id, user_id, date, sleep_hours, stress_level, mood_rating,
                   exercise_minutes, caffeine_intake, notes, created_at
            FROM wellness_entries
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

    pub async fn all_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<WellnessEntry>> {
        let rows = sqlx::query_as::<_, WellnessEntry>(
            r#"
            SELECT id, user_id, date, sleep_hours, stress_level, mood_rating,
                   exercise_minutes, caffeine_intake, notes, created_at
            FROM wellness_entries
            WHERE user_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<WellnessEntry>> {
        let row = sqlx::query_as::<_, WellnessEntry>(
            r#"
            SELECT id, user_id, date, sleep_hours, stress_level, mood_rating,
                   exercise_minutes, caffeine_intake, notes, created_at
            FROM wellness_entries
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
        new: &NewWellnessEntry,
    ) -> anyhow::Result<WellnessEntry> {
        let row = sqlx::query_as::<_, WellnessEntry>(
            r#"
            INSERT INTO wellness_entries
                (user_id, date, sleep_hours, stress_level, mood_rating,
                 exercise_minutes, caffeine_intake, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, date, sleep_hours, stress_level, mood_rating,
                      exercise_minutes, caffeine_intake, notes, created_at
            "#,
        )
        .bind(user_id)
        .bind(new.date)
        .bind(new.sleep_hours)
        .bind(new.stress_level)
        .bind(new.mood_rating)
        .bind(new.exercise_minutes)
        .bind(new.caffeine_intake)
        .bind(&new.notes)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        new: &NewWellnessEntry,
    ) -> anyhow::Result<Option<WellnessEntry>> {
        let row = sqlx::query_as::<_, WellnessEntry>(
            r#"
            UPDATE wellness_entries
            SET date = $3, sleep_hours = $4, stress_level = $5, mood_rating = $6,
                exercise_minutes = $7, caffeine_intake = $8, notes = $9
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, date, sleep_hours, stress_level, mood_rating,
                      exercise_minutes, caffeine_intake, notes, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(new.date)
        .bind(new.sleep_hours)
        .bind(new.stress_level)
        .bind(new.mood_rating)
        .bind(new.exercise_minutes)
        .bind(new.caffeine_intake)
        .bind(&new.notes)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM wellness_entries WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
