//! Markdown rendering of a plan for export and for revision prompts.

use super::GeneratedPlan;

/// Materialize a plan as a markdown document.
///
/// The title becomes an `#` heading, each section an `##` heading with its
/// content below. The industry and creation date go on a metadata line
/// under the title.
pub fn render_markdown(plan: &GeneratedPlan) -> String {
    let mut doc = String::with_capacity(4096);

    doc.push_str(&format!("# {}\n\n", plan.title));
    doc.push_str(&format!(
        "Industry: {} | Created: {}\n",
        plan.industry,
        plan.created_at.format("%Y-%m-%d")
    ));

    for section in &plan.sections {
        doc.push_str(&format!("\n## {}\n\n", section.title));
        doc.push_str(&section.content);
        doc.push('\n');
    }

    doc
}
