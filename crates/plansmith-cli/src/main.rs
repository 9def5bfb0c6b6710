mod ask_cmd;
mod config;
mod lesson_cmds;
mod plan_cmds;
mod progress_cmd;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use plansmith_db::pool;

use config::PlansmithConfig;

#[derive(Parser)]
#[command(name = "plansmith", about = "LLM-generated business plans, lessons, and progress")]
struct Cli {
    /// Database URL (overrides PLANSMITH_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a plansmith config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = "postgresql://localhost:5432/plansmith")]
        db_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Initialize the plansmith database (requires config file or env vars)
    DbInit,
    /// Plan management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Lesson catalog
    Lessons {
        #[command(subcommand)]
        command: LessonCommands,
    },
    /// Show plan and lesson progress metrics
    Progress,
    /// Ask the coaching assistant one question
    Ask {
        /// The question to ask
        question: String,
    },
    /// Serve the read-only HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8642)]
        port: u16,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a new plan via the completion endpoint
    Generate {
        /// Business or working title
        #[arg(long)]
        title: String,
        /// Industry the business operates in
        #[arg(long)]
        industry: String,
        /// Free-text notes describing the business idea
        #[arg(long)]
        notes: Option<String>,
        /// Override the configured model for this call
        #[arg(long)]
        model: Option<String>,
    },
    /// Revise an existing plan (creates a new plan, keeps the original)
    Modify {
        /// Plan ID to revise
        plan_id: String,
        /// The change to apply (e.g. "expand the risk section")
        instruction: String,
    },
    /// Show plan details (or list all plans)
    Show {
        /// Plan ID to show (omit to list all)
        plan_id: Option<String>,
    },
    /// Overwrite one section's content by hand
    Edit {
        /// Plan ID to edit
        plan_id: String,
        /// Section title (case-insensitive)
        section: String,
        /// New content, inline
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        /// Read new content from a file
        #[arg(long)]
        file: Option<String>,
    },
    /// Export a plan as a markdown document
    Export {
        /// Plan ID to export
        plan_id: String,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LessonCommands {
    /// Seed the built-in lesson catalog into the database
    Seed,
    /// List lessons (optionally filtered by category)
    List {
        /// Only show lessons in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Mark a lesson as watched
    Watch {
        /// Lesson slug (see `plansmith lessons list`)
        slug: String,
    },
}

/// Execute the `plansmith init` command: write config file.
fn cmd_init(db_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        completion: Default::default(),
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!(
        "  completion.model = {} (API key read from {})",
        cfg.completion.model, cfg.completion.api_key_env
    );
    println!();
    println!("Next: run `plansmith db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `plansmith db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = PlansmithConfig::resolve(cli_db_url)?;

    println!("Initializing plansmith database...");

    // 1. Create the database if it does not exist.
    pool::ensure_database_exists(&resolved.db_config).await?;

    // 2. Connect to the target database.
    let db_pool = pool::create_pool(&resolved.db_config).await?;

    // 3. Run migrations.
    pool::run_migrations(&db_pool).await?;

    // 4. Print success with table counts.
    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    // 5. Clean shutdown.
    db_pool.close().await;

    println!("plansmith db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_url, force } => {
            cmd_init(&db_url, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Plan { command } => {
            let resolved = PlansmithConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = plan_cmds::run_plan_command(command, &db_pool, &resolved.completion).await;
            db_pool.close().await;
            result?;
        }
        Commands::Lessons { command } => {
            let resolved = PlansmithConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = lesson_cmds::run_lesson_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Progress => {
            let resolved = PlansmithConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = progress_cmd::run_progress(&db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Ask { question } => {
            let resolved = PlansmithConfig::resolve(cli.database_url.as_deref())?;
            ask_cmd::run_ask(&resolved.completion, &question).await?;
        }
        Commands::Serve { bind, port } => {
            let resolved = PlansmithConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = serve_cmd::run_serve(db_pool.clone(), &bind, port).await;
            db_pool.close().await;
            result?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Parse a plan ID argument, with a friendly error for bad input.
pub(crate) fn parse_plan_id(plan_id_str: &str) -> anyhow::Result<uuid::Uuid> {
    plan_id_str
        .parse()
        .with_context(|| format!("invalid plan ID: {plan_id_str:?}"))
}
