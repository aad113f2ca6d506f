//! Candidate extractors and the cascade that runs them.
//!
//! Each extractor is an independent strategy over the response text. The
//! cascade tries them in a fixed priority order and stops at the first one
//! that yields a chart. Extractors never fail: a non-match is `None`.

mod json;
mod list;
mod literal_array;

pub use json::JsonExtractor;
pub use list::{BulletListExtractor, DelimitedPairExtractor};
pub use literal_array::LiteralArrayExtractor;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::{ChartData, ChartKind, ChartPolicy, ChartSpec, Row, Scalar};

/// Matches a fenced code block, capturing its body.
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[\w+-]*[ \t]*\r?\n?(.*?)```").unwrap());

/// Input shared by every extractor in one cascade run.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// Raw response text.
    pub text: &'a str,
    /// Whether the triggering user message asked for a chart.
    pub chart_requested: bool,
    /// Heuristic policy.
    pub policy: &'a ChartPolicy,
}

/// A single extraction strategy.
pub trait ChartExtractor: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the strategy only runs for explicit chart requests.
    fn requires_chart_request(&self) -> bool {
        false
    }

    /// Attempts to derive a chart from the text.
    fn extract(&self, ctx: &ExtractionContext<'_>) -> Option<ChartSpec>;
}

/// Ordered list of extractors, short-circuiting on the first match.
pub struct ExtractionCascade {
    extractors: Vec<Box<dyn ChartExtractor>>,
}

impl ExtractionCascade {
    /// Creates a cascade from extractors in priority order.
    pub fn new(extractors: Vec<Box<dyn ChartExtractor>>) -> Self {
        Self { extractors }
    }

    /// Extractors for charts the response states explicitly.
    pub fn explicit() -> Self {
        Self::new(vec![Box::new(JsonExtractor)])
    }

    /// Extractors that infer a chart from prose, code and lists.
    pub fn inferred() -> Self {
        Self::new(vec![
            Box::new(LiteralArrayExtractor),
            Box::new(BulletListExtractor),
            Box::new(DelimitedPairExtractor),
        ])
    }

    /// Names of the extractors, in the order they run.
    pub fn names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Runs the extractors in order and returns the first chart found.
    pub fn run(&self, ctx: &ExtractionContext<'_>) -> Option<ChartSpec> {
        for extractor in &self.extractors {
            if extractor.requires_chart_request() && !ctx.chart_requested {
                tracing::debug!(extractor = extractor.name(), "skipped without chart request");
                continue;
            }
            if let Some(spec) = extractor.extract(ctx) {
                tracing::debug!(
                    extractor = extractor.name(),
                    kind = %spec.kind,
                    rows = spec.data.rows.len(),
                    "chart extracted"
                );
                return Some(spec);
            }
        }
        None
    }
}

impl std::fmt::Debug for ExtractionCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionCascade")
            .field("extractors", &self.names())
            .finish()
    }
}

/// Returns the bodies of all fenced code blocks.
pub(crate) fn fenced_blocks(text: &str) -> impl Iterator<Item = &str> {
    FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Removes every fenced code block.
pub(crate) fn strip_fenced_blocks(text: &str) -> String {
    FENCED_BLOCK.replace_all(text, "").into_owned()
}

/// Builds a two-field label/value chart from parallel series.
///
/// Temporal series become a line chart keyed by the temporal field, the
/// rest a bar chart keyed by the categorical field.
pub(crate) fn label_value_spec(
    points: Vec<(String, f64)>,
    temporal: bool,
    title: String,
    policy: &ChartPolicy,
) -> ChartSpec {
    let fields = &policy.fields;
    let (kind, x_key, x_label) = if temporal {
        (ChartKind::Line, &fields.temporal_x, &fields.temporal_x_label)
    } else {
        (ChartKind::Bar, &fields.categorical_x, &fields.categorical_x_label)
    };

    let rows: Vec<Row> = points
        .into_iter()
        .map(|(label, value)| {
            let mut row = Row::new();
            row.insert(x_key.clone(), Scalar::Text(label));
            row.insert(fields.value.clone(), Scalar::Number(value));
            row
        })
        .collect();

    let mut labels = BTreeMap::new();
    labels.insert(x_key.clone(), x_label.clone());
    labels.insert(fields.value.clone(), fields.value_label.clone());

    let data = ChartData::new(rows, x_key.clone(), fields.value.as_str())
        .with_title(title)
        .with_labels(labels);
    ChartSpec::new(kind, data)
}
