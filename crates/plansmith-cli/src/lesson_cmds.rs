//! Operator CLI handlers for `plansmith lessons` subcommands.

use anyhow::{Context, Result};
use sqlx::PgPool;

use plansmith_core::catalog;
use plansmith_db::queries::lessons::{self, NewLesson};
use plansmith_db::queries::progress;

use crate::LessonCommands;

/// Dispatch a `LessonCommands` variant to the appropriate handler.
pub async fn run_lesson_command(command: LessonCommands, pool: &PgPool) -> Result<()> {
    match command {
        LessonCommands::Seed => cmd_seed(pool).await,
        LessonCommands::List { category } => cmd_list(pool, category.as_deref()).await,
        LessonCommands::Watch { slug } => cmd_watch(pool, &slug).await,
    }
}

// -----------------------------------------------------------------------
// plansmith lessons seed
// -----------------------------------------------------------------------

/// Seed the built-in catalog. Idempotent: re-seeding refreshes fields in
/// place.
async fn cmd_seed(pool: &PgPool) -> Result<()> {
    let catalog = catalog::builtin_catalog();
    let total = catalog.len();

    for (position, lesson) in catalog.iter().enumerate() {
        lessons::upsert_lesson(
            pool,
            &NewLesson {
                slug: &lesson.slug,
                title: &lesson.title,
                description: &lesson.description,
                url: &lesson.url,
                duration_minutes: lesson.duration_minutes,
                category: &lesson.category,
                position: position as i32,
            },
        )
        .await
        .with_context(|| format!("failed to seed lesson {:?}", lesson.slug))?;
    }

    println!("Seeded {total} lessons across {} categories.", catalog::categories().len());
    Ok(())
}

// -----------------------------------------------------------------------
// plansmith lessons list [--category <cat>]
// -----------------------------------------------------------------------

async fn cmd_list(pool: &PgPool, category: Option<&str>) -> Result<()> {
    let rows = match category {
        Some(cat) => lessons::list_lessons_by_category(pool, cat).await?,
        None => lessons::list_lessons(pool).await?,
    };

    if rows.is_empty() {
        println!("No lessons found. Run `plansmith lessons seed` first.");
        return Ok(());
    }

    let slug_w = rows.iter().map(|l| l.slug.len()).max().unwrap_or(4).max(4);
    println!("{:<slug_w$}  {:<12}  {:>4}  TITLE", "SLUG", "CATEGORY", "MIN");
    for lesson in &rows {
        println!(
            "{:<slug_w$}  {:<12}  {:>4}  {}",
            lesson.slug, lesson.category, lesson.duration_minutes, lesson.title,
        );
    }

    Ok(())
}

// -----------------------------------------------------------------------
// plansmith lessons watch <slug>
// -----------------------------------------------------------------------

async fn cmd_watch(pool: &PgPool, slug: &str) -> Result<()> {
    let lesson = lessons::get_lesson_by_slug(pool, slug)
        .await?
        .with_context(|| format!("no lesson with slug {slug:?}; see `plansmith lessons list`"))?;

    progress::mark_watched(pool, lesson.id).await?;

    println!("Marked {:?} as watched.", lesson.title);
    Ok(())
}
