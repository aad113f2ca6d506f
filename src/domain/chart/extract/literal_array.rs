//! Charts derived from literal array assignments in plotting code.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{label_value_spec, ChartExtractor, ExtractionContext};
use crate::domain::chart::{ChartPolicy, ChartSpec};

/// `name = [ ... ]` on a single logical line.
static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\p{L}_][\w]*)\s*=\s*\[([^\]]*)\]").unwrap());

/// A single- or double-quoted literal.
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).unwrap());

/// Pairs a label array with a value array, e.g. `meses = [...]` and
/// `investimentos = [...]`.
///
/// Only runs for explicit chart requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralArrayExtractor;

impl ChartExtractor for LiteralArrayExtractor {
    fn name(&self) -> &'static str {
        "literal_array"
    }

    fn requires_chart_request(&self) -> bool {
        true
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Option<ChartSpec> {
        let policy = ctx.policy;
        let (labels, values) = find_arrays(ctx.text, policy)?;

        let labels = parse_labels(labels);
        let values = parse_values(values);
        if labels.len() != values.len() || labels.len() < policy.min_points.max(2) {
            return None;
        }

        let temporal = labels.iter().any(|label| policy.is_temporal_label(label));
        let points = labels.into_iter().zip(values).collect();
        Some(label_value_spec(points, temporal, policy.default_title.clone(), policy))
    }
}

/// Returns the bodies of the first label array and the first value array.
///
/// Nested arrays are not flat series, so an assignment whose body opens
/// another `[` is skipped.
fn find_arrays<'t>(text: &'t str, policy: &ChartPolicy) -> Option<(&'t str, &'t str)> {
    let mut labels = None;
    let mut values = None;

    for caps in ASSIGNMENT.captures_iter(text) {
        let (Some(name), Some(body)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if body.as_str().contains('[') {
            continue;
        }
        let name = name.as_str();
        if labels.is_none() && policy.is_label_variable(name) {
            labels = Some(body.as_str());
        } else if values.is_none() && policy.is_value_variable(name) {
            values = Some(body.as_str());
        }
        if labels.is_some() && values.is_some() {
            break;
        }
    }

    labels.zip(values)
}

fn parse_labels(body: &str) -> Vec<String> {
    if body.contains('"') || body.contains('\'') {
        QUOTED
            .captures_iter(body)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    } else {
        body.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parses source-code numerals; `1_500.25` style separators are allowed and
/// anything unparseable counts as zero.
fn parse_values(body: &str) -> Vec<f64> {
    body.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.replace('_', "")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        })
        .collect()
}
