//! Operator CLI handlers for `plansmith plan` subcommands.
//!
//! Implements:
//! - `plansmith plan generate`   -- generate a plan via the completion endpoint
//! - `plansmith plan modify`     -- revise a plan into a new record
//! - `plansmith plan show`       -- show plan details or list all plans
//! - `plansmith plan edit`       -- overwrite one section by hand
//! - `plansmith plan export`     -- materialize a plan as markdown

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use plansmith_core::completion::{CompletionConfig, MessagesClient};
use plansmith_core::outline::Outline;
use plansmith_core::plan::{
    GenerateRequest, PlanGenerator, get_plan_with_sections, load_generated, render_markdown,
    save_plan,
};
use plansmith_db::queries::{plans as plan_queries, sections as section_queries};

use crate::{PlanCommands, parse_plan_id};

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub async fn run_plan_command(
    command: PlanCommands,
    pool: &PgPool,
    completion: &CompletionConfig,
) -> Result<()> {
    match command {
        PlanCommands::Generate {
            title,
            industry,
            notes,
            model,
        } => cmd_generate(pool, completion, title, industry, notes, model).await,
        PlanCommands::Modify {
            plan_id,
            instruction,
        } => cmd_modify(pool, completion, &plan_id, &instruction).await,
        PlanCommands::Show { plan_id } => match plan_id {
            Some(id) => cmd_show_one(pool, &id).await,
            None => cmd_show_all(pool).await,
        },
        PlanCommands::Edit {
            plan_id,
            section,
            content,
            file,
        } => cmd_edit(pool, &plan_id, &section, content, file.as_deref()).await,
        PlanCommands::Export { plan_id, output } => {
            cmd_export(pool, &plan_id, output.as_deref()).await
        }
    }
}

/// Build the generator from config, honoring a per-call model override.
fn build_generator(
    completion: &CompletionConfig,
    model_override: Option<String>,
) -> Result<PlanGenerator> {
    let mut config = completion.clone();
    if let Some(model) = model_override {
        config.model = model;
    }
    let client = MessagesClient::from_config(&config)
        .context("failed to configure completion client")?;
    Ok(PlanGenerator::new(
        Arc::new(client),
        Outline::business_plan(),
        config.max_tokens,
    ))
}

// -----------------------------------------------------------------------
// plansmith plan generate
// -----------------------------------------------------------------------

async fn cmd_generate(
    pool: &PgPool,
    completion: &CompletionConfig,
    title: String,
    industry: String,
    notes: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let generator = build_generator(completion, model)?;
    let request = GenerateRequest {
        title,
        industry,
        notes,
    };

    println!("Generating plan (one completion call, this can take a minute)...");
    let plan = generator.generate(&request).await?;
    let row = save_plan(pool, &plan).await?;

    println!("Plan generated.");
    println!();
    println!("  Plan ID:   {}", row.id);
    println!("  Title:     {}", row.title);
    println!("  Industry:  {}", row.industry);
    println!("  Status:    {}", row.status);
    println!("  Sections:  {}", plan.sections.len());
    for section in &plan.sections {
        println!("    - {}", section.title);
    }

    Ok(())
}

// -----------------------------------------------------------------------
// plansmith plan modify <plan-id> <instruction>
// -----------------------------------------------------------------------

async fn cmd_modify(
    pool: &PgPool,
    completion: &CompletionConfig,
    plan_id_str: &str,
    instruction: &str,
) -> Result<()> {
    let plan_id = parse_plan_id(plan_id_str)?;
    let original = load_generated(pool, plan_id).await?;

    let generator = build_generator(completion, None)?;

    println!("Revising plan {plan_id}...");
    let revised = generator.modify(&original, instruction).await?;
    let row = save_plan(pool, &revised).await?;

    println!("Revision saved as a new plan; the original is unchanged.");
    println!();
    println!("  New plan ID:  {}", row.id);
    println!("  Title:        {}", row.title);
    println!("  Sections:     {}", revised.sections.len());

    Ok(())
}

// -----------------------------------------------------------------------
// plansmith plan show (list all)
// -----------------------------------------------------------------------

/// List all plans with summary info.
async fn cmd_show_all(pool: &PgPool) -> Result<()> {
    let plans = plan_queries::list_plans(pool).await?;

    if plans.is_empty() {
        println!("No plans found. Use `plansmith plan generate` to create one.");
        return Ok(());
    }

    // Compute column widths for a clean table.
    // ID is always 36 chars (UUID). Status max is 8 (complete).
    let id_w = 36;
    let title_w = plans
        .iter()
        .map(|p| p.title.len())
        .max()
        .unwrap_or(5)
        .max(5);
    let status_w = 8;

    println!(
        "{:<id_w$}  {:<title_w$}  {:<status_w$}  SECTIONS  CREATED",
        "ID", "TITLE", "STATUS",
    );

    for plan in &plans {
        let count = section_queries::count_sections_for_plan(pool, plan.id).await?;
        let created = plan.created_at.format("%Y-%m-%d %H:%M");
        println!(
            "{:<id_w$}  {:<title_w$}  {:<status_w$}  {:>8}  {}",
            plan.id, plan.title, plan.status, count, created,
        );
    }

    Ok(())
}

// -----------------------------------------------------------------------
// plansmith plan show <plan-id>
// -----------------------------------------------------------------------

/// Show detailed info for a single plan.
async fn cmd_show_one(pool: &PgPool, plan_id_str: &str) -> Result<()> {
    let plan_id = parse_plan_id(plan_id_str)?;

    let (plan, sections) = get_plan_with_sections(pool, plan_id).await?;

    println!("Plan: {}", plan.title);
    println!("  ID:        {}", plan.id);
    println!("  Industry:  {}", plan.industry);
    println!("  Status:    {}", plan.status);
    println!(
        "  Created:   {}",
        plan.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Sections:  {}", sections.len());

    for section in &sections {
        println!();
        let edited = match section.edited_at {
            Some(at) => format!("  (edited {})", at.format("%Y-%m-%d %H:%M")),
            None => String::new(),
        };
        println!("[{}] {}{edited}", section.position, section.title);
        for line in section.content.lines().take(10) {
            println!("  {line}");
        }
        if section.content.lines().count() > 10 {
            println!("  ...(truncated)");
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------
// plansmith plan edit <plan-id> <section>
// -----------------------------------------------------------------------

/// Overwrite one section's content from a flag or file.
async fn cmd_edit(
    pool: &PgPool,
    plan_id_str: &str,
    section_title: &str,
    content: Option<String>,
    file: Option<&str>,
) -> Result<()> {
    let plan_id = parse_plan_id(plan_id_str)?;

    let new_content = match (content, file) {
        (Some(inline), _) => inline,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read content file: {path}"))?,
        (None, None) => anyhow::bail!("provide the new content with --content or --file"),
    };

    let updated =
        section_queries::update_section_content(pool, plan_id, section_title, new_content.trim())
            .await?;

    println!("Section {:?} updated.", updated.title);
    Ok(())
}

// -----------------------------------------------------------------------
// plansmith plan export <plan-id> [--output <file>]
// -----------------------------------------------------------------------

/// Materialize a plan as markdown and write to a file or stdout.
async fn cmd_export(pool: &PgPool, plan_id_str: &str, output: Option<&str>) -> Result<()> {
    let plan_id = parse_plan_id(plan_id_str)?;

    let plan = load_generated(pool, plan_id).await?;
    let doc = render_markdown(&plan);

    match output {
        Some(path) => {
            std::fs::write(path, &doc)
                .with_context(|| format!("failed to write to {path}"))?;
            println!("Plan exported to {path}");
        }
        None => {
            print!("{doc}");
        }
    }

    Ok(())
}
