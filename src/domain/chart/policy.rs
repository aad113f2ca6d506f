//! Locale-specific chart heuristics.
//!
//! Thresholds and vocabularies used by the extractors, the intent classifier
//! and the kind resolver. The default policy targets Brazilian Portuguese
//! responses (`R$ 252.951,59`, month names such as "Junho"); every field can
//! be overridden through configuration.

use serde::{Deserialize, Serialize};

/// Field names and display labels given to text-derived datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// X field used when the labels look like periods.
    pub temporal_x: String,
    /// Display label of the temporal x field.
    pub temporal_x_label: String,
    /// X field used for categorical labels.
    pub categorical_x: String,
    /// Display label of the categorical x field.
    pub categorical_x_label: String,
    /// Field holding the numeric value.
    pub value: String,
    /// Display label of the value field.
    pub value_label: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            temporal_x: "periodo".to_string(),
            temporal_x_label: "Período".to_string(),
            categorical_x: "item".to_string(),
            categorical_x_label: "Item".to_string(),
            value: "valor".to_string(),
            value_label: "Valor".to_string(),
        }
    }
}

/// Heuristic policy for chart extraction and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPolicy {
    /// Pie charts are offered only up to this many rows.
    pub pie_max_rows: usize,
    /// Directly rendered charts default to pie up to this many rows.
    pub direct_pie_max_rows: usize,
    /// Minimum number of points a text extractor must find.
    pub min_points: usize,
    /// Month names and abbreviations marking a label as temporal.
    pub month_words: Vec<String>,
    /// Substrings marking a user message as a chart request.
    pub intent_keywords: Vec<String>,
    /// Variable names of literal arrays holding labels or periods.
    pub label_variables: Vec<String>,
    /// Variable names of literal arrays holding values.
    pub value_variables: Vec<String>,
    /// Field naming for text-derived datasets.
    pub fields: FieldNames,
    /// Title used when none can be found in the text.
    pub default_title: String,
}

impl Default for ChartPolicy {
    fn default() -> Self {
        Self {
            pie_max_rows: 8,
            direct_pie_max_rows: 5,
            min_points: 2,
            month_words: words(&[
                "janeiro", "fevereiro", "março", "marco", "abril", "maio", "junho", "julho",
                "agosto", "setembro", "outubro", "novembro", "dezembro", "jan", "fev", "mar",
                "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
            ]),
            intent_keywords: words(&[
                "gráfico", "grafico", "gráficos", "graficos", "visualizar", "visualização",
                "visualizacao", "plotar", "plot", "chart", "visualize", "visualise", "graph",
            ]),
            label_variables: words(&[
                "meses", "mes", "periodo", "periodos", "labels", "months", "periods",
            ]),
            value_variables: words(&[
                "investimentos", "investimento", "valores", "valor", "dados", "data",
                "impressoes", "impressões", "cpm", "values", "investments", "impressions",
            ]),
            fields: FieldNames::default(),
            default_title: "Gráfico de Dados".to_string(),
        }
    }
}

impl ChartPolicy {
    /// Returns true if a label names a month or contains a four-digit year.
    ///
    /// The label is split into alphanumeric words; matching is per word so
    /// that "Marketing" is not mistaken for "mar".
    pub fn is_temporal_label(&self, label: &str) -> bool {
        let lower = label.to_lowercase();
        lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| {
                is_year(word) || self.month_words.iter().any(|m| m.to_lowercase() == word)
            })
    }

    /// Returns true if a variable name belongs to the label vocabulary.
    pub fn is_label_variable(&self, name: &str) -> bool {
        matches_vocabulary(name, &self.label_variables)
    }

    /// Returns true if a variable name belongs to the value vocabulary.
    pub fn is_value_variable(&self, name: &str) -> bool {
        matches_vocabulary(name, &self.value_variables)
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn is_year(word: &str) -> bool {
    word.len() == 4 && word.chars().all(|c| c.is_ascii_digit())
}

/// Matches `name` or a `prefix_name` style identifier, ignoring case.
fn matches_vocabulary(name: &str, vocabulary: &[String]) -> bool {
    let lower = name.to_lowercase();
    vocabulary.iter().any(|word| {
        let word = word.to_lowercase();
        lower == word || lower.ends_with(&format!("_{}", word))
    })
}
