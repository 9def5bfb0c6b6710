//! The sectionizer: partitions raw completion text into named sections.
//!
//! The completion endpoint is only loosely instructed to emit the outline's
//! sections in order, so the input carries no guaranteed structure. The
//! sectionizer is deliberately permissive: it never fails, and garbage
//! input degrades to a single fallback section.

use serde::{Deserialize, Serialize};

use crate::format::{clean_document, format_section};
use crate::outline::Outline;

/// Title used when no canonical header is found anywhere in the input.
pub const FALLBACK_TITLE: &str = "Business Plan";

/// One named, cleaned section of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSection {
    /// When produced by header matching, equals one outline entry verbatim.
    pub title: String,
    /// Cleaned prose; satisfies the [`format_section`] invariants.
    pub content: String,
}

/// Deterministically partitions one completion into [`PlanSection`]s
/// aligned to a fixed [`Outline`].
#[derive(Debug, Clone)]
pub struct Sectionizer {
    outline: Outline,
    /// Lowercased outline names, same order, for case-insensitive matching.
    lowered: Vec<String>,
}

impl Sectionizer {
    /// Build a sectionizer for the given outline.
    pub fn new(outline: Outline) -> Self {
        let lowered = outline.names().iter().map(|n| n.to_lowercase()).collect();
        Self { outline, lowered }
    }

    /// The outline this sectionizer matches against.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Partition `raw` into sections. Never fails; never returns an empty
    /// list.
    ///
    /// Two documented edge cases, preserved deliberately:
    /// - Text before the first matched header is discarded.
    /// - Sections come back in the order their headers appear in `raw`,
    ///   which is not necessarily the outline's order. No re-sorting.
    pub fn sectionize(&self, raw: &str) -> Vec<PlanSection> {
        let cleaned = clean_document(raw);

        let mut sections: Vec<PlanSection> = Vec::new();
        let mut current_title = "";
        let mut current_content = String::new();

        for line in cleaned.lines() {
            match self.match_header(line) {
                Some(name) => {
                    // The header line itself is consumed, never kept as content.
                    if !current_title.is_empty() && !current_content.trim().is_empty() {
                        sections.push(PlanSection {
                            title: current_title.to_string(),
                            content: format_section(&current_content),
                        });
                    }
                    current_title = name;
                    current_content.clear();
                }
                None => {
                    current_content.push_str(line);
                    current_content.push('\n');
                }
            }
        }

        // Flush the still-open section, even if its content is blank, so a
        // matched header always yields a section.
        if !current_title.is_empty() {
            sections.push(PlanSection {
                title: current_title.to_string(),
                content: format_section(&current_content),
            });
        }

        if sections.is_empty() {
            sections.push(PlanSection {
                title: FALLBACK_TITLE.to_string(),
                content: format_section(&cleaned),
            });
        }

        sections
    }

    /// Test whether a cleaned line is a section header.
    ///
    /// Two accepted forms: the trimmed line case-insensitively equals an
    /// outline name exactly, or the line starts with a `<digits>.` numbering
    /// prefix and case-insensitively contains an outline name anywhere.
    fn match_header(&self, line: &str) -> Option<&str> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered_line = trimmed.to_lowercase();

        for (name, lowered) in self.outline.names().iter().zip(&self.lowered) {
            if lowered_line == *lowered {
                return Some(name);
            }
        }

        if has_numbering_prefix(trimmed) {
            for (name, lowered) in self.outline.names().iter().zip(&self.lowered) {
                if lowered_line.contains(lowered.as_str()) {
                    return Some(name);
                }
            }
        }

        None
    }
}

impl Default for Sectionizer {
    fn default() -> Self {
        Self::new(Outline::business_plan())
    }
}

/// True when the string starts with one or more ASCII digits followed by
/// a dot, e.g. `"3. Market Analysis"`.
fn has_numbering_prefix(s: &str) -> bool {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && s[digits..].starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sectionizer() -> Sectionizer {
        Sectionizer::new(Outline::business_plan())
    }

    // -- testable properties --

    #[test]
    fn output_is_never_empty() {
        let inputs = [
            "",
            "\n\n\n",
            "Random preamble with no headers at all.",
            "Executive Summary",
            "Executive Summary\ntext\nMarket Analysis\nmore",
            "***",
        ];
        for input in inputs {
            let sections = sectionizer().sectionize(input);
            assert!(!sections.is_empty(), "empty output for input {input:?}");
        }
    }

    #[test]
    fn fallback_when_no_headers_match() {
        let sections = sectionizer().sectionize("Random preamble with no headers at all.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, FALLBACK_TITLE);
        assert_eq!(
            sections[0].content,
            "Random preamble with no headers at all."
        );
    }

    #[test]
    fn fallback_on_empty_input() {
        let sections = sectionizer().sectionize("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, FALLBACK_TITLE);
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn splits_two_basic_sections() {
        let raw = "Executive Summary\nWe build solar kits.\n\nMarket Analysis\nRural demand is high.\n";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(
            sections,
            vec![
                PlanSection {
                    title: "Executive Summary".to_string(),
                    content: "We build solar kits.".to_string(),
                },
                PlanSection {
                    title: "Market Analysis".to_string(),
                    content: "Rural demand is high.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn header_lines_are_consumed() {
        let raw = "Executive Summary\ntext one\nMarket Analysis\ntext two";
        let sections = sectionizer().sectionize(raw);
        for section in &sections {
            for name in Outline::business_plan().names() {
                assert!(
                    !section
                        .content
                        .lines()
                        .any(|l| l.trim().eq_ignore_ascii_case(name)),
                    "header {name:?} leaked into content of {:?}",
                    section.title
                );
            }
        }
    }

    #[test]
    fn preserves_appearance_order_not_outline_order() {
        let raw = "Market Analysis\nDemand first.\nExecutive Summary\nSummary second.";
        let sections = sectionizer().sectionize(raw);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Market Analysis", "Executive Summary"]);
    }

    #[test]
    fn numbered_header_matches_by_containment() {
        let raw = "3. Market Analysis — Q1\nDemand is strong.";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Market Analysis");
        assert_eq!(sections[0].content, "Demand is strong.");
    }

    #[test]
    fn bold_header_and_bullets_are_normalized() {
        let raw = "**Executive Summary**\n- Point one\n- Point two";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Executive Summary");
        assert_eq!(sections[0].content, "• Point one\n• Point two");
    }

    // -- matching details --

    #[test]
    fn exact_match_is_case_insensitive() {
        let raw = "EXECUTIVE SUMMARY\ntext";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections[0].title, "Executive Summary");
    }

    #[test]
    fn markdown_heading_marker_does_not_hide_header() {
        let raw = "## Executive Summary\ntext";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections[0].title, "Executive Summary");
    }

    #[test]
    fn containment_requires_numbering_prefix() {
        // Without a "<digits>." prefix, containment alone is not a header.
        let raw = "Executive Summary\nOur market analysis shows growth.";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Executive Summary");
        assert_eq!(sections[0].content, "Our market analysis shows growth.");
    }

    #[test]
    fn numbering_prefix_needs_digits_and_dot() {
        assert!(has_numbering_prefix("3. Market Analysis"));
        assert!(has_numbering_prefix("12.x"));
        assert!(!has_numbering_prefix(".3 nope"));
        assert!(!has_numbering_prefix("three. nope"));
        assert!(!has_numbering_prefix("3 no dot"));
    }

    // -- edge cases --

    #[test]
    fn text_before_first_header_is_discarded() {
        let raw = "Here is your plan!\n\nExecutive Summary\nThe real content.";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Executive Summary");
        assert_eq!(sections[0].content, "The real content.");
    }

    #[test]
    fn header_only_input_yields_blank_section() {
        let sections = sectionizer().sectionize("Executive Summary\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Executive Summary");
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn consecutive_headers_drop_the_blank_one() {
        let raw = "Executive Summary\nMarket Analysis\nActual content.";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Market Analysis");
        assert_eq!(sections[0].content, "Actual content.");
    }

    #[test]
    fn duplicate_headers_yield_two_sections() {
        let raw = "Executive Summary\nFirst take.\nExecutive Summary\nSecond take.";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "First take.");
        assert_eq!(sections[1].content, "Second take.");
    }

    #[test]
    fn section_content_is_formatted() {
        let raw = "Executive Summary\n   indented line\n\n\n\n- bullet";
        let sections = sectionizer().sectionize(raw);
        assert_eq!(sections[0].content, "indented line\n\n• bullet");
    }

    #[test]
    fn alternate_outline_is_respected() {
        let outline = Outline::new(["Intro", "Body", "Outro"]);
        let s = Sectionizer::new(outline);
        let raw = "Intro\nhello\nBody\nworld\nExecutive Summary\nnot a header here";
        let sections = s.sectionize(raw);
        let titles: Vec<&str> = sections.iter().map(|x| x.title.as_str()).collect();
        assert_eq!(titles, vec!["Intro", "Body"]);
        assert_eq!(
            sections[1].content,
            "world\nExecutive Summary\nnot a header here"
        );
    }

    #[test]
    fn all_ten_sections_in_order() {
        let outline = Outline::business_plan();
        let mut raw = String::new();
        for name in outline.names() {
            raw.push_str(name);
            raw.push('\n');
            raw.push_str("Some content here.\n\n");
        }
        let sections = sectionizer().sectionize(&raw);
        assert_eq!(sections.len(), 10);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        let expected: Vec<&str> = outline.names().iter().map(|s| s.as_str()).collect();
        assert_eq!(titles, expected);
    }
}
