//! Best-effort structural parsing of completion-service output.
//!
//! The narrative is free text. A line starting with a number and period is a
//! heading, a line starting with a dash or bullet glyph is a list item, a
//! short line containing a colon is a key/value heading, and anything else
//! is a paragraph. Input with no recognizable structure degrades to one
//! paragraph per line; nothing here can fail.

/// Headings are only inferred from a colon when the line is short enough to
/// plausibly be a label rather than prose.
const KEY_VALUE_MAX_LEN: usize = 100;

const SUMMARY_MARKERS: &[&str] = &["recommendation", "conclusion", "summary", "verdict", "final"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    KeyValue { key: String, value: String },
    List(Vec<String>),
    Paragraph(String),
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

fn is_numbered_heading(line: &str) -> bool {
    let mut chars = line.chars();
    let mut saw_digit = false;
    for c in chars.by_ref() {
        if c.is_ascii_digit() {
            saw_digit = true;
        } else {
            return saw_digit && c == '.';
        }
    }
    false
}

/// Parse narrative text into display blocks.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let text = strip_emphasis(text);
    let mut blocks = Vec::new();
    let mut list_items: Vec<String> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(item) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
            list_items.push(item.trim().to_string());
            continue;
        }

        if !list_items.is_empty() {
            blocks.push(Block::List(std::mem::take(&mut list_items)));
        }

        if is_numbered_heading(line) || (line.contains(':') && line.len() < KEY_VALUE_MAX_LEN) {
            match line.split_once(':') {
                Some((key, value)) if !value.trim().is_empty() => blocks.push(Block::KeyValue {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                }),
                _ => blocks.push(Block::Heading(line.trim_end_matches(':').trim().to_string())),
            }
        } else {
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }

    if !list_items.is_empty() {
        blocks.push(Block::List(list_items));
    }

    blocks
}

/// Render blocks back to display text for the composed view.
pub fn render_plain(blocks: &[Block]) -> String {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            Block::Heading(h) => out.push(h.clone()),
            Block::KeyValue { key, value } => out.push(format!("{key}: {value}")),
            Block::List(items) => {
                out.push(items.iter().map(|i| format!("• {i}")).collect::<Vec<_>>().join("\n"))
            }
            Block::Paragraph(p) => out.push(p.clone()),
        }
    }
    out.join("\n")
}

/// Parse and immediately re-render: the degradation-tolerant formatting pass
/// applied to every narrative before display or persistence.
pub fn format_narrative(text: &str) -> String {
    render_plain(&parse_blocks(text))
}

/// Pull a closing summary out of a narrative: the tail starting at the last
/// line that looks like a recommendation/conclusion, or the last three lines
/// when no marker is present. `None` only for blank input.
pub fn extract_summary(text: &str) -> Option<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    let tail = lines
        .iter()
        .rposition(|line| {
            let lower = line.to_lowercase();
            SUMMARY_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(|i| &lines[i..])
        .unwrap_or_else(|| &lines[lines.len().saturating_sub(3)..]);

    let joined = strip_emphasis(&tail.join(" "));
    let cleaned = joined
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
        .trim()
        .to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_line_becomes_key_value() {
        let blocks = parse_blocks("1. Overall Risk Assessment: High Risk");
        assert_eq!(
            blocks,
            vec![Block::KeyValue {
                key: "1. Overall Risk Assessment".into(),
                value: "High Risk".into()
            }]
        );
    }

    #[test]
    fn test_bullets_collect_into_one_list() {
        let blocks = parse_blocks("- mint authority active\n- top holder owns 40%\n• thin liquidity");
        assert_eq!(
            blocks,
            vec![Block::List(vec![
                "mint authority active".into(),
                "top holder owns 40%".into(),
                "thin liquidity".into()
            ])]
        );
    }

    #[test]
    fn test_long_colon_line_is_paragraph() {
        let long = format!("{}: and then a very long explanation {}", "Note", "x".repeat(100));
        let blocks = parse_blocks(&long);
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_unstructured_text_degrades_to_paragraphs() {
        let blocks = parse_blocks("just some prose\nanother line of prose");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::Paragraph(_))));
    }

    #[test]
    fn test_emphasis_markers_are_stripped() {
        let rendered = format_narrative("**Price trend** is flat");
        assert_eq!(rendered, "Price trend is flat");
    }

    #[test]
    fn test_empty_input_renders_empty() {
        assert_eq!(format_narrative(""), "");
        assert!(parse_blocks("\n\n").is_empty());
    }

    #[test]
    fn test_roundtrip_keeps_structure_readable() {
        let text = "Risk Factors:\n- low liquidity\n- unverified contract\nOverall it looks weak.";
        let out = format_narrative(text);
        assert!(out.contains("Risk Factors"));
        assert!(out.contains("• low liquidity"));
        assert!(out.ends_with("Overall it looks weak."));
    }

    #[test]
    fn test_summary_found_by_marker() {
        let text = "1. Risk: high\nsome detail\nFinal Recommendation: avoid this token";
        let summary = extract_summary(text).unwrap();
        assert!(summary.contains("avoid this token"));
    }

    #[test]
    fn test_summary_falls_back_to_tail() {
        let text = "line one\nline two\nline three\nline four";
        let summary = extract_summary(text).unwrap();
        assert_eq!(summary, "line two line three line four");
    }

    #[test]
    fn test_summary_none_for_blank() {
        assert_eq!(extract_summary("   \n\n"), None);
    }
}
