//! `plansmith progress` command: plan and lesson progress metrics.

use anyhow::Result;
use sqlx::PgPool;

use plansmith_db::queries::plans as plan_queries;
use plansmith_db::queries::progress as progress_queries;

/// Print plans-by-status and lessons-watched counts.
pub async fn run_progress(pool: &PgPool) -> Result<()> {
    let plan_counts = plan_queries::count_plans_by_status(pool).await?;
    let learning = progress_queries::get_learning_progress(pool).await?;

    println!("Plans:");
    println!("  total:    {}", plan_counts.total);
    println!("  complete: {}", plan_counts.complete);
    println!("  draft:    {}", plan_counts.draft);
    println!();
    println!("Lessons: {}/{} watched", learning.watched, learning.total);

    if learning.total > 0 {
        let pct = (learning.watched as f64 / learning.total as f64) * 100.0;
        println!("  ({pct:.0}% of the catalog)");
    }

    Ok(())
}
