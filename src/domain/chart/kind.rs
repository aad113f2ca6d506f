//! The closed set of renderable chart kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A chart rendering the display layer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
}

impl ChartKind {
    /// Every kind, in canonical order.
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie, ChartKind::Area];

    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Area => "area",
        }
    }

    /// Returns the label shown on the style picker.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Barras",
            ChartKind::Line => "Linha",
            ChartKind::Pie => "Pizza",
            ChartKind::Area => "Área",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format("type", format!("unknown chart kind '{}'", wanted))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_lowercase() {
        assert_eq!(serde_json::to_string(&ChartKind::Area).unwrap(), "\"area\"");
    }

    #[test]
    fn deserializes_from_lowercase() {
        let kind: ChartKind = serde_json::from_str("\"pie\"").unwrap();
        assert_eq!(kind, ChartKind::Pie);
    }

    #[test]
    fn deserialize_rejects_unknown_kind() {
        assert!(serde_json::from_str::<ChartKind>("\"scatter\"").is_err());
    }

    #[test]
    fn from_str_ignores_case_and_whitespace() {
        assert_eq!(" Bar ".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("LINE".parse::<ChartKind>().unwrap(), ChartKind::Line);
    }

    #[test]
    fn from_str_rejects_unknown_kind() {
        assert!("donut".parse::<ChartKind>().is_err());
    }

    #[test]
    fn display_matches_wire_name() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> = ChartKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels.len(), ChartKind::ALL.len());
    }
}
