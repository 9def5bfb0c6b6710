//! Prompt construction for plan generation and revision.
//!
//! Pure string builders, no I/O. The system prompts name every outline
//! section in order and ask for plain-text headings, because the
//! sectionizer keys its boundaries on header lines. The endpoint does not
//! reliably comply; that is the sectionizer's problem, not ours.

use crate::outline::Outline;

use super::{GenerateRequest, GeneratedPlan};

/// System prompt for generating a new plan.
pub fn generation_system_prompt(outline: &Outline) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a business-plan writer. Produce a complete business plan \
         as plain text.\n\n",
    );
    prompt.push_str(
        "Structure the document as the following sections, in this exact \
         order, each introduced by its name alone on a line:\n\n",
    );
    for (i, name) in outline.names().iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, name));
    }
    prompt.push('\n');
    prompt.push_str(
        "Write each section as prose paragraphs. Use a leading dash for \
         bullet points. Do not use markdown emphasis or # headings.\n",
    );

    prompt
}

/// User prompt for generating a new plan.
pub fn generation_user_prompt(request: &GenerateRequest) -> String {
    let mut prompt = String::with_capacity(256);

    prompt.push_str(&format!(
        "Write a business plan for {:?}, a business in the {} industry.\n",
        request.title, request.industry
    ));
    if let Some(notes) = &request.notes {
        prompt.push_str(&format!("\nAbout the business:\n{notes}\n"));
    }

    prompt
}

/// System prompt for revising an existing plan.
pub fn revision_system_prompt(outline: &Outline) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a business-plan editor. You will be given a complete \
         business plan and a change request. Rewrite the full plan with \
         the change applied, keeping everything else intact.\n\n",
    );
    prompt.push_str("Return the whole document with these sections, each introduced by its name alone on a line:\n\n");
    for (i, name) in outline.names().iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, name));
    }
    prompt.push('\n');
    prompt.push_str(
        "Write plain text. Use a leading dash for bullet points. Do not \
         use markdown emphasis or # headings.\n",
    );

    prompt
}

/// User prompt for revising an existing plan.
///
/// Embeds the rendered current plan so the endpoint sees the full document
/// it is editing.
pub fn revision_user_prompt(plan: &GeneratedPlan, instruction: &str) -> String {
    let mut prompt = String::with_capacity(4096);

    prompt.push_str("Here is the current plan:\n\n");
    prompt.push_str(&super::render::render_markdown(plan));
    prompt.push_str("\n\nChange request: ");
    prompt.push_str(instruction);
    prompt.push('\n');

    prompt
}
