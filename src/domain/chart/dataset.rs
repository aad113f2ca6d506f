//! Chart data model: rows, axis keys and the three chart payload shapes.
//!
//! The wire shapes follow the chat backend's JSON conventions:
//!
//! - `ChartSpec` serializes as `{type, data, xKey, yKey, title?, labels?}`
//! - `ChartOptions` serializes as `{data, xKey, yKey, availableTypes, title?, labels?}`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::ChartKind;

/// A single cell of a dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Converts a JSON value, returning `None` for anything that is not a
    /// string or a finite number.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(Scalar::Number),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }

    /// Returns the text value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Number(_) => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One row of a dataset: field key to scalar.
pub type Row = BTreeMap<String, Scalar>;

/// Y-axis key: a single series or several series sharing the x axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YKey {
    Single(String),
    Multiple(Vec<String>),
}

impl YKey {
    /// Returns the referenced keys in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            YKey::Single(key) => vec![key.as_str()],
            YKey::Multiple(keys) => keys.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true when exactly one series is requested.
    pub fn is_single(&self) -> bool {
        self.keys().len() == 1
    }
}

impl From<&str> for YKey {
    fn from(key: &str) -> Self {
        YKey::Single(key.to_string())
    }
}

/// Dataset plus axis configuration, shared by every chart payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Ordered dataset rows.
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
    /// Field holding the x-axis (category or period) value.
    pub x_key: String,
    /// Field(s) holding the plotted values.
    pub y_key: YKey,
    /// Optional chart title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional display label per field key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl ChartData {
    /// Creates chart data without title or labels.
    pub fn new(rows: Vec<Row>, x_key: impl Into<String>, y_key: impl Into<YKey>) -> Self {
        Self {
            rows,
            x_key: x_key.into(),
            y_key: y_key.into(),
            title: None,
            labels: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the label map.
    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Returns the display label for a field, falling back to the key.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Returns true if the axes resolve against the first row.
    ///
    /// The x key must exist in the first row and at least one y key must
    /// exist there too.
    pub fn axes_resolve(&self) -> bool {
        let Some(first) = self.rows.first() else {
            return false;
        };
        first.contains_key(&self.x_key) && self.y_key.keys().iter().any(|k| first.contains_key(*k))
    }
}

/// A fully resolved, renderable chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(flatten)]
    pub data: ChartData,
}

impl ChartSpec {
    /// Creates a chart spec.
    pub fn new(kind: ChartKind, data: ChartData) -> Self {
        Self { kind, data }
    }
}

/// Chart data that is ready to draw, with the kinds the user may pick.
///
/// Used both for explicit options (the user asked for a chart) and for
/// suggestions (the data is chartable but nobody asked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(flatten)]
    pub data: ChartData,
    #[serde(rename = "availableTypes")]
    pub available_kinds: Vec<ChartKind>,
}

impl ChartOptions {
    /// Creates options over the given data.
    pub fn new(data: ChartData, available_kinds: Vec<ChartKind>) -> Self {
        Self {
            data,
            available_kinds,
        }
    }

    /// Returns true if the kind may be selected.
    pub fn offers(&self, kind: ChartKind) -> bool {
        self.available_kinds.contains(&kind)
    }

    /// Builds the spec for a chosen kind, or `None` if it is not offered.
    pub fn render(&self, kind: ChartKind) -> Option<ChartSpec> {
        self.offers(kind)
            .then(|| ChartSpec::new(kind, self.data.clone()))
    }
}
