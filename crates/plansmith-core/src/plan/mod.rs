//! Plan generation and persistence: prompts, the generator, markdown
//! rendering, and the service layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use plansmith_db::models::PlanStatus;

use crate::sectionize::PlanSection;

pub mod generate;
pub mod prompt;
pub mod render;
pub mod service;

pub use generate::PlanGenerator;
pub use render::render_markdown;
pub use service::{get_plan_with_sections, load_generated, save_plan};

/// Inputs for generating a new plan.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Business or working title for the plan.
    pub title: String,
    /// Industry the business operates in.
    pub industry: String,
    /// Optional free-text notes describing the business idea.
    pub notes: Option<String>,
}

/// A fully generated plan record, pre-persistence.
///
/// Owns its sections exclusively; `sections.len() >= 1` always (the
/// sectionizer guarantees a fallback section). A modification produces a
/// brand-new record with a fresh identity -- the original is never mutated,
/// so prior versions survive as immutable history in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub id: Uuid,
    pub title: String,
    pub industry: String,
    pub created_at: DateTime<Utc>,
    pub sections: Vec<PlanSection>,
    pub status: PlanStatus,
}
