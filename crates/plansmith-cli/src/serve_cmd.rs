//! `plansmith serve`: read-only HTTP API over plans, lessons, and progress.

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use plansmith_db::models::{Plan, PlanSection};
use plansmith_db::queries::plans::{self as plan_db, PlanCounts};
use plansmith_db::queries::progress::{self as progress_db, LearningProgress, LessonWithProgress};
use plansmith_db::queries::sections as section_db;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PlanSummaryResponse {
    #[serde(flatten)]
    pub plan: Plan,
    pub section_count: i64,
}

#[derive(Debug, Serialize)]
pub struct PlanDetailResponse {
    #[serde(flatten)]
    pub plan: Plan,
    pub sections: Vec<PlanSection>,
}

#[derive(Debug, Serialize)]
pub struct PlanCountsResponse {
    pub draft: i64,
    pub complete: i64,
    pub total: i64,
}

impl From<PlanCounts> for PlanCountsResponse {
    fn from(c: PlanCounts) -> Self {
        Self {
            draft: c.draft,
            complete: c.complete,
            total: c.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LearningProgressResponse {
    pub watched: i64,
    pub total: i64,
}

impl From<LearningProgress> for LearningProgressResponse {
    fn from(p: LearningProgress) -> Self {
        Self {
            watched: p.watched,
            total: p.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub plans: PlanCountsResponse,
    pub lessons: LearningProgressResponse,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(pool: PgPool) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/plans", get(list_plans))
        .route("/api/plans/{id}", get(get_plan_detail))
        .route("/api/lessons", get(list_lessons_handler))
        .route("/api/progress", get(get_progress))
        .layer(CorsLayer::permissive())
        .with_state(pool)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(pool: PgPool, bind: &str, port: u16) -> Result<()> {
    let app = build_router(pool);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("plansmith serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("plansmith serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(pool): State<PgPool>) -> Result<axum::response::Response, AppError> {
    let plans = plan_db::list_plans(&pool)
        .await
        .map_err(AppError::internal)?;

    let rows = if plans.is_empty() {
        "<tr><td colspan=\"3\">No plans found.</td></tr>".to_string()
    } else {
        plans
            .iter()
            .map(|p| {
                format!(
                    "<tr><td><a href=\"/api/plans/{id}\">{title}</a></td><td>{status}</td><td>{id}</td></tr>",
                    id = p.id,
                    title = p.title,
                    status = p.status,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let html = format!(
        "<!DOCTYPE html>\
<html><head><title>plansmith</title></head><body>\
<h1>plansmith</h1>\
<p><a href=\"/api/plans\">/api/plans</a> | <a href=\"/api/lessons\">/api/lessons</a> | <a href=\"/api/progress\">/api/progress</a></p>\
<table><tr><th>Plan</th><th>Status</th><th>ID</th></tr>{rows}</table>\
</body></html>"
    );

    Ok(Html(html).into_response())
}

async fn list_plans(State(pool): State<PgPool>) -> Result<axum::response::Response, AppError> {
    let plans = plan_db::list_plans(&pool)
        .await
        .map_err(AppError::internal)?;

    let mut results = Vec::with_capacity(plans.len());
    for plan in plans {
        let section_count = section_db::count_sections_for_plan(&pool, plan.id)
            .await
            .map_err(AppError::internal)?;
        results.push(PlanSummaryResponse {
            plan,
            section_count,
        });
    }

    Ok(Json(results).into_response())
}

async fn get_plan_detail(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    let plan = plan_db::get_plan(&pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("plan {id} not found")))?;

    let sections = section_db::list_sections_for_plan(&pool, id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(PlanDetailResponse { plan, sections }).into_response())
}

async fn list_lessons_handler(
    State(pool): State<PgPool>,
) -> Result<axum::response::Response, AppError> {
    let lessons: Vec<LessonWithProgress> = progress_db::list_lessons_with_progress(&pool)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(lessons).into_response())
}

async fn get_progress(State(pool): State<PgPool>) -> Result<axum::response::Response, AppError> {
    let plans = plan_db::count_plans_by_status(&pool)
        .await
        .map_err(AppError::internal)?;
    let lessons = progress_db::get_learning_progress(&pool)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(ProgressResponse {
        plans: plans.into(),
        lessons: lessons.into(),
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
