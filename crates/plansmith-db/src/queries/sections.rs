//! Database query functions for the `plan_sections` table.
//!
//! Section rows are inserted by the plan service inside its transaction;
//! this module covers reads and the direct-edit overwrite path.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PlanSection;

/// List the sections of a plan in stored order.
pub async fn list_sections_for_plan(pool: &PgPool, plan_id: Uuid) -> Result<Vec<PlanSection>> {
    let sections = sqlx::query_as::<_, PlanSection>(
        "SELECT * FROM plan_sections WHERE plan_id = $1 ORDER BY position",
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await
    .context("failed to list plan sections")?;

    Ok(sections)
}

/// Fetch one section of a plan by title (case-insensitive).
pub async fn get_section_by_title(
    pool: &PgPool,
    plan_id: Uuid,
    title: &str,
) -> Result<Option<PlanSection>> {
    let section = sqlx::query_as::<_, PlanSection>(
        "SELECT * FROM plan_sections \
         WHERE plan_id = $1 AND lower(title) = lower($2)",
    )
    .bind(plan_id)
    .bind(title)
    .fetch_optional(pool)
    .await
    .context("failed to fetch plan section")?;

    Ok(section)
}

/// Overwrite the content of one section, recording the edit time.
///
/// Returns the updated section. Fails if no section with that title exists
/// on the plan.
pub async fn update_section_content(
    pool: &PgPool,
    plan_id: Uuid,
    title: &str,
    content: &str,
) -> Result<PlanSection> {
    let section = sqlx::query_as::<_, PlanSection>(
        "UPDATE plan_sections \
         SET content = $3, edited_at = now() \
         WHERE plan_id = $1 AND lower(title) = lower($2) \
         RETURNING *",
    )
    .bind(plan_id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await
    .context("failed to update plan section")?;

    match section {
        Some(s) => Ok(s),
        None => anyhow::bail!("plan {plan_id} has no section titled {title:?}"),
    }
}

/// Count the sections of a plan.
pub async fn count_sections_for_plan(pool: &PgPool, plan_id: Uuid) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plan_sections WHERE plan_id = $1")
        .bind(plan_id)
        .fetch_one(pool)
        .await
        .context("failed to count plan sections")?;

    Ok(row.0)
}
