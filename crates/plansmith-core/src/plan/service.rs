//! Plan service layer.
//!
//! Persists a [`GeneratedPlan`] -- the plan row plus all its ordered
//! section rows -- within a single database transaction, and loads stored
//! plans back into the in-memory form the generator works with.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use plansmith_db::models::{Plan, PlanSection as PlanSectionRow};
use plansmith_db::queries::{plans as plan_queries, sections as section_queries};

use crate::sectionize::PlanSection;

use super::GeneratedPlan;

/// Persist a generated plan and all its sections atomically.
///
/// Section positions record appearance order. If any insert fails, the
/// entire operation is rolled back and nothing partial remains.
pub async fn save_plan(pool: &PgPool, plan: &GeneratedPlan) -> Result<Plan> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let row = sqlx::query_as::<_, Plan>(
        "INSERT INTO plans (id, title, industry, status, created_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(plan.id)
    .bind(&plan.title)
    .bind(&plan.industry)
    .bind(plan.status)
    .bind(plan.created_at)
    .fetch_one(&mut *tx)
    .await
    .context("failed to insert plan")?;

    for (position, section) in plan.sections.iter().enumerate() {
        sqlx::query(
            "INSERT INTO plan_sections (plan_id, position, title, content) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(plan.id)
        .bind(position as i32)
        .bind(&section.title)
        .bind(&section.content)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to insert section {:?}", section.title))?;
    }

    tx.commit().await.context("failed to commit transaction")?;

    Ok(row)
}

/// Fetch a plan and its sections in stored order.
pub async fn get_plan_with_sections(
    pool: &PgPool,
    plan_id: Uuid,
) -> Result<(Plan, Vec<PlanSectionRow>)> {
    let plan = plan_queries::get_plan(pool, plan_id)
        .await?
        .with_context(|| format!("plan {plan_id} not found"))?;

    let sections = section_queries::list_sections_for_plan(pool, plan_id).await?;

    Ok((plan, sections))
}

/// Load a stored plan back into the in-memory [`GeneratedPlan`] form,
/// e.g. as the input to a revision.
pub async fn load_generated(pool: &PgPool, plan_id: Uuid) -> Result<GeneratedPlan> {
    let (plan, section_rows) = get_plan_with_sections(pool, plan_id).await?;

    let sections = section_rows
        .into_iter()
        .map(|row| PlanSection {
            title: row.title,
            content: row.content,
        })
        .collect();

    Ok(GeneratedPlan {
        id: plan.id,
        title: plan.title,
        industry: plan.industry,
        created_at: plan.created_at,
        sections,
        status: plan.status,
    })
}
