//! Database query functions for the `plans` table.

use anyhow::{Context, Result};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{Plan, PlanStatus};

/// Insert a new plan row. Returns the inserted plan with server-generated
/// defaults (id, created_at).
pub async fn insert_plan(
    pool: &PgPool,
    title: &str,
    industry: &str,
    status: PlanStatus,
) -> Result<Plan> {
    let plan = sqlx::query_as::<_, Plan>(
        "INSERT INTO plans (title, industry, status) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(title)
    .bind(industry)
    .bind(status)
    .fetch_one(pool)
    .await
    .context("failed to insert plan")?;

    Ok(plan)
}

/// Fetch a plan by its ID.
pub async fn get_plan(pool: &PgPool, id: Uuid) -> Result<Option<Plan>> {
    let plan = sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch plan")?;

    Ok(plan)
}

/// List all plans, ordered by creation time (newest first).
pub async fn list_plans(pool: &PgPool) -> Result<Vec<Plan>> {
    let plans = sqlx::query_as::<_, Plan>("SELECT * FROM plans ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
        .context("failed to list plans")?;

    Ok(plans)
}

/// Update the status of a plan.
pub async fn update_plan_status(pool: &PgPool, id: Uuid, status: PlanStatus) -> Result<()> {
    let result = sqlx::query("UPDATE plans SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update plan status")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("plan {id} not found");
    }

    Ok(())
}

/// Per-status plan counts for the progress report.
#[derive(Debug, Clone, FromRow)]
pub struct PlanCounts {
    pub draft: i64,
    pub complete: i64,
    pub total: i64,
}

/// Count plans grouped by status in a single aggregate query.
pub async fn count_plans_by_status(pool: &PgPool) -> Result<PlanCounts> {
    let counts = sqlx::query_as::<_, PlanCounts>(
        "SELECT \
             COUNT(*) FILTER (WHERE status = 'draft')    AS draft, \
             COUNT(*) FILTER (WHERE status = 'complete') AS complete, \
             COUNT(*)                                    AS total \
         FROM plans",
    )
    .fetch_one(pool)
    .await
    .context("failed to count plans by status")?;

    Ok(counts)
}
