//! Explicit chart JSON embedded in the response.

use serde_json::Value;

use super::{fenced_blocks, ChartExtractor, ExtractionContext};
use crate::domain::chart::{validate_chart_candidate, ChartSpec};

/// Upper bound on `{` positions scanned for inline objects.
const MAX_INLINE_STARTS: usize = 256;

/// Finds chart JSON in fenced blocks, inline objects or the whole text.
///
/// A parsed value is accepted either as a chart itself or through a
/// `chartData` member, and only if it passes shape validation.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExtractor;

impl ChartExtractor for JsonExtractor {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Option<ChartSpec> {
        let text = ctx.text;

        fenced_blocks(text)
            .find_map(|body| parse_chart(body.trim()))
            .or_else(|| inline_objects(text).find_map(parse_chart))
            .or_else(|| parse_chart(text.trim()))
    }
}

fn parse_chart(candidate: &str) -> Option<ChartSpec> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    value
        .get("chartData")
        .and_then(validate_chart_candidate)
        .or_else(|| validate_chart_candidate(&value))
}

/// Yields balanced `{...}` spans that mention chart keys.
fn inline_objects(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .filter(|(_, c)| *c == '{')
        .take(MAX_INLINE_STARTS)
        .filter_map(move |(start, _)| balanced_object(text, start))
        .filter(|span| span.contains("\"type\"") && span.contains("\"data\""))
}

/// Returns the balanced object starting at byte `start`, honouring string
/// literals and escapes.
fn balanced_object(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
