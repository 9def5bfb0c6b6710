//! Database query functions for the `lessons` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::Lesson;

/// Fields for inserting or refreshing a catalog lesson.
#[derive(Debug, Clone)]
pub struct NewLesson<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub duration_minutes: i32,
    pub category: &'a str,
    pub position: i32,
}

/// Insert a lesson, or refresh its fields if the slug already exists.
///
/// The catalog is fixed configuration, so seeding is idempotent: re-running
/// it updates titles/URLs in place without duplicating rows.
pub async fn upsert_lesson(pool: &PgPool, lesson: &NewLesson<'_>) -> Result<Lesson> {
    let row = sqlx::query_as::<_, Lesson>(
        "INSERT INTO lessons (slug, title, description, url, duration_minutes, category, position) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (slug) DO UPDATE SET \
             title = EXCLUDED.title, \
             description = EXCLUDED.description, \
             url = EXCLUDED.url, \
             duration_minutes = EXCLUDED.duration_minutes, \
             category = EXCLUDED.category, \
             position = EXCLUDED.position \
         RETURNING *",
    )
    .bind(lesson.slug)
    .bind(lesson.title)
    .bind(lesson.description)
    .bind(lesson.url)
    .bind(lesson.duration_minutes)
    .bind(lesson.category)
    .bind(lesson.position)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to upsert lesson {:?}", lesson.slug))?;

    Ok(row)
}

/// List all lessons in catalog order.
pub async fn list_lessons(pool: &PgPool) -> Result<Vec<Lesson>> {
    let lessons = sqlx::query_as::<_, Lesson>("SELECT * FROM lessons ORDER BY position")
        .fetch_all(pool)
        .await
        .context("failed to list lessons")?;

    Ok(lessons)
}

/// List lessons in one category, in catalog order.
pub async fn list_lessons_by_category(pool: &PgPool, category: &str) -> Result<Vec<Lesson>> {
    let lessons = sqlx::query_as::<_, Lesson>(
        "SELECT * FROM lessons WHERE category = $1 ORDER BY position",
    )
    .bind(category)
    .fetch_all(pool)
    .await
    .context("failed to list lessons by category")?;

    Ok(lessons)
}

/// Fetch a lesson by its slug.
pub async fn get_lesson_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Lesson>> {
    let lesson = sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("failed to fetch lesson")?;

    Ok(lesson)
}
