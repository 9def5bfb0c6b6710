//! Database query functions for the `lesson_progress` table.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Mark a lesson as watched, recording the watch time.
///
/// Idempotent: re-watching keeps the original `watched_at`.
pub async fn mark_watched(pool: &PgPool, lesson_id: Uuid) -> Result<()> {
    sqlx::query(
        "INSERT INTO lesson_progress (lesson_id, watched, watched_at) \
         VALUES ($1, true, now()) \
         ON CONFLICT (lesson_id) DO UPDATE SET \
             watched = true, \
             watched_at = COALESCE(lesson_progress.watched_at, now())",
    )
    .bind(lesson_id)
    .execute(pool)
    .await
    .context("failed to mark lesson watched")?;

    Ok(())
}

/// Watched/total lesson counts for the progress report.
#[derive(Debug, Clone, FromRow)]
pub struct LearningProgress {
    pub watched: i64,
    pub total: i64,
}

/// Count watched lessons against the full catalog in one query.
pub async fn get_learning_progress(pool: &PgPool) -> Result<LearningProgress> {
    let progress = sqlx::query_as::<_, LearningProgress>(
        "SELECT \
             COUNT(p.lesson_id) FILTER (WHERE p.watched) AS watched, \
             COUNT(l.id)                                 AS total \
         FROM lessons l \
         LEFT JOIN lesson_progress p ON p.lesson_id = l.id",
    )
    .fetch_one(pool)
    .await
    .context("failed to compute learning progress")?;

    Ok(progress)
}

/// A lesson joined with its watched-state, for listings.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct LessonWithProgress {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub url: String,
    pub duration_minutes: i32,
    pub category: String,
    pub position: i32,
    pub watched: bool,
    pub watched_at: Option<DateTime<Utc>>,
}

/// List all lessons with their watched-state, in catalog order.
pub async fn list_lessons_with_progress(pool: &PgPool) -> Result<Vec<LessonWithProgress>> {
    let rows = sqlx::query_as::<_, LessonWithProgress>(
        "SELECT l.id, l.slug, l.title, l.url, l.duration_minutes, l.category, l.position, \
                COALESCE(p.watched, false) AS watched, \
                p.watched_at \
         FROM lessons l \
         LEFT JOIN lesson_progress p ON p.lesson_id = l.id \
         ORDER BY l.position",
    )
    .fetch_all(pool)
    .await
    .context("failed to list lessons with progress")?;

    Ok(rows)
}
