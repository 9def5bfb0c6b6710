//! Text normalization for completion output.
//!
//! Completions arrive as free-form prose with markdown artifacts the
//! endpoint was only loosely instructed to avoid: `**bold**`, stray `*`,
//! `#` headings, mixed bullet markers, and irregular blank-line runs.
//! [`clean_document`] normalizes a whole completion before the line scan;
//! [`format_section`] re-normalizes one section's accumulated content and
//! additionally strips per-line indentation.
//!
//! `format_section` is idempotent: applying it twice yields the same text.

/// Normalize a whole document before sectionizing.
///
/// Strips `**` and remaining `*`, removes `#`..`######` heading markers,
/// normalizes `-`/`•` bullets to a `• ` prefix, collapses runs of blank
/// lines to a single blank line, and trims the result. Per-line
/// indentation of ordinary prose is left alone here; it is removed by the
/// per-section pass.
pub fn clean_document(raw: &str) -> String {
    normalize(raw, false)
}

/// Normalize one section's content.
///
/// Repeats every [`clean_document`] normalization and also strips leading
/// whitespace from each line.
pub fn format_section(text: &str) -> String {
    normalize(text, true)
}

fn normalize(text: &str, strip_indent: bool) -> String {
    let stripped = strip_emphasis(text);

    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0usize;

    for line in stripped.lines() {
        let line = if strip_indent { line.trim_start() } else { line };
        let line = normalize_line(line);

        // Collapse runs of two or more blank lines down to one.
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run <= 1 {
                lines.push(String::new());
            }
        } else {
            blank_run = 0;
            lines.push(line);
        }
    }

    lines.join("\n").trim().to_string()
}

/// Strip `**` pairs first, then any asterisks left over.
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace('*', "")
}

/// Strip a leading markdown heading marker and normalize bullet markers.
fn normalize_line(line: &str) -> String {
    let line = strip_heading_marker(line);

    // A line starting with `-` or `•` (optionally indented) becomes `• ...`,
    // with the indentation dropped.
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('•'))
    {
        return format!("• {}", rest.trim_start());
    }

    line.to_string()
}

/// Remove a `#`..`######` prefix followed by a space at the start of a line.
fn strip_heading_marker(line: &str) -> &str {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return rest;
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- clean_document --

    #[test]
    fn strips_bold_markers() {
        assert_eq!(clean_document("**Executive Summary**"), "Executive Summary");
    }

    #[test]
    fn strips_stray_asterisks() {
        assert_eq!(clean_document("a * b ** c"), "a  b  c");
    }

    #[test]
    fn strips_heading_markers_up_to_six() {
        assert_eq!(clean_document("# Title"), "Title");
        assert_eq!(clean_document("### Title"), "Title");
        assert_eq!(clean_document("###### Title"), "Title");
    }

    #[test]
    fn seven_hashes_are_not_a_heading() {
        assert_eq!(clean_document("####### Title"), "####### Title");
    }

    #[test]
    fn hash_without_space_is_kept() {
        assert_eq!(clean_document("#hashtag"), "#hashtag");
    }

    #[test]
    fn normalizes_dash_bullets() {
        assert_eq!(clean_document("- Point one"), "• Point one");
    }

    #[test]
    fn normalizes_indented_bullets() {
        assert_eq!(clean_document("   - Point one"), "• Point one");
        assert_eq!(clean_document("\t• Point two"), "• Point two");
    }

    #[test]
    fn normalizes_bullet_without_space() {
        assert_eq!(clean_document("-Point"), "• Point");
    }

    #[test]
    fn collapses_blank_line_runs() {
        assert_eq!(clean_document("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_document("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean_document("\n\n  hello  \n\n"), "hello");
    }

    #[test]
    fn keeps_prose_indentation() {
        // Only the per-section pass strips indentation of ordinary lines.
        assert_eq!(clean_document("  indented prose"), "  indented prose");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_document(""), "");
    }

    // -- format_section --

    #[test]
    fn section_pass_strips_indentation() {
        assert_eq!(format_section("  indented prose"), "indented prose");
    }

    #[test]
    fn section_pass_repeats_all_normalizations() {
        let raw = "  **Bold** text\n\n\n   - bullet\n";
        assert_eq!(format_section(raw), "Bold text\n\n• bullet");
    }

    #[test]
    fn format_section_is_idempotent() {
        let inputs = [
            "plain text",
            "  **Bold** text\n\n\n   - bullet\n# heading\n",
            "• already normalized\n\nmore",
            "",
            "\n\n\n",
            "1. Numbered line\n   trailing indent",
        ];
        for input in inputs {
            let once = format_section(input);
            let twice = format_section(&once);
            assert_eq!(once, twice, "not idempotent for input {input:?}");
        }
    }

    #[test]
    fn whitespace_only_lines_count_as_blank() {
        assert_eq!(format_section("a\n   \n\t\nb"), "a\n\nb");
    }
}
