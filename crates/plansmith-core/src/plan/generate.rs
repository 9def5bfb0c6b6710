//! The plan generator: one completion call, then sectionizing.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use plansmith_db::models::PlanStatus;

use crate::completion::{CompletionClient, CompletionError, CompletionRequest};
use crate::outline::Outline;
use crate::sectionize::Sectionizer;

use super::{GenerateRequest, GeneratedPlan, prompt};

/// Suffix appended to the title of a revised plan.
const REVISED_SUFFIX: &str = " (revised)";

/// Generates and revises plans by calling the completion endpoint once per
/// operation and sectionizing the result.
///
/// Upstream failures are propagated unchanged: no retry, no partial
/// record. Sectionizing itself cannot fail, so a completion that returns
/// at all always yields a complete plan.
pub struct PlanGenerator {
    client: Arc<dyn CompletionClient>,
    sectionizer: Sectionizer,
    max_tokens: u32,
}

impl PlanGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, outline: Outline, max_tokens: u32) -> Self {
        Self {
            client,
            sectionizer: Sectionizer::new(outline),
            max_tokens,
        }
    }

    /// Generate a new plan from scratch.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GeneratedPlan, CompletionError> {
        let completion_request = CompletionRequest::new(
            prompt::generation_system_prompt(self.sectionizer.outline()),
            prompt::generation_user_prompt(request),
            self.max_tokens,
        );

        debug!(title = %request.title, industry = %request.industry, "requesting plan completion");
        let text = self.client.complete(completion_request).await?;

        let sections = self.sectionizer.sectionize(&text);
        info!(
            title = %request.title,
            sections = sections.len(),
            "plan generated"
        );

        Ok(GeneratedPlan {
            id: Uuid::new_v4(),
            title: request.title.clone(),
            industry: request.industry.clone(),
            created_at: Utc::now(),
            sections,
            status: PlanStatus::Complete,
        })
    }

    /// Revise an existing plan according to an instruction.
    ///
    /// Mints a new identity (new id, suffixed title, fresh timestamp) so
    /// the original record stays untouched in the store as history.
    pub async fn modify(
        &self,
        plan: &GeneratedPlan,
        instruction: &str,
    ) -> Result<GeneratedPlan, CompletionError> {
        let completion_request = CompletionRequest::new(
            prompt::revision_system_prompt(self.sectionizer.outline()),
            prompt::revision_user_prompt(plan, instruction),
            self.max_tokens,
        );

        debug!(plan_id = %plan.id, "requesting plan revision");
        let text = self.client.complete(completion_request).await?;

        let sections = self.sectionizer.sectionize(&text);
        info!(
            original = %plan.id,
            sections = sections.len(),
            "plan revised"
        );

        Ok(GeneratedPlan {
            id: Uuid::new_v4(),
            title: format!("{}{REVISED_SUFFIX}", plan.title),
            industry: plan.industry.clone(),
            created_at: Utc::now(),
            sections,
            status: PlanStatus::Complete,
        })
    }
}
