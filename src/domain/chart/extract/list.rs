//! Charts derived from `label: value` lists in prose.
//!
//! Both extractors work on the text with fenced code removed, so plotting
//! code is never read as data.

use once_cell::sync::Lazy;
use regex::{Match, Regex};
use std::ops::Range;

use super::{label_value_spec, strip_fenced_blocks, ChartExtractor, ExtractionContext};
use crate::domain::chart::{parse_locale_number, ChartPolicy, ChartSpec};

/// `- Junho: R$ 252.951,59`
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*[-•*][ \t]*([^:\n]+?)[ \t]*:[ \t]*(?:R\$|US\$|\$|€)?[ \t]*(\d(?:[\d.,]*\d)?)",
    )
    .unwrap()
});

/// `Loja A: 120` or `| Loja A | 120 |`, one pair per line.
static DELIMITED_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*\|?[ \t]*([^:\n|]+?)[ \t]*([:|])[ \t]*(?:R\$|US\$|\$|€)?[ \t]*(\d(?:[\d.,]*\d)?)",
    )
    .unwrap()
});

/// "Aqui está o gráfico das vendas", "here is a chart of revenue"
static TITLE_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:aqui está|here is|gráfico|grafico|chart)\s+(?:com|de|do|da|dos|das|of|with|for)\s+([^:.\n]+)",
    )
    .unwrap()
});

/// "Vendas por mês:" introducing a list, or closing the text.
static TITLE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^:.\n]+?)\s*:\s*(?:[-•*]|\z)").unwrap());

/// Bulleted `label: value` lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct BulletListExtractor;

impl ChartExtractor for BulletListExtractor {
    fn name(&self) -> &'static str {
        "bullet_list"
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Option<ChartSpec> {
        let text = strip_fenced_blocks(ctx.text);
        let points: Vec<_> = BULLET_ITEM
            .captures_iter(&text)
            .filter_map(|caps| point(caps.get(1)?.as_str(), caps.get(2)?.as_str()))
            .collect();
        build_spec(points, &text, ctx.policy)
    }
}

/// Free-standing `label: value` or `label | value` pairs.
///
/// Only used when the text does not already hold a bulleted list, and
/// ignores pairs that overlap a bullet item.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelimitedPairExtractor;

impl ChartExtractor for DelimitedPairExtractor {
    fn name(&self) -> &'static str {
        "delimited_pair"
    }

    fn extract(&self, ctx: &ExtractionContext<'_>) -> Option<ChartSpec> {
        let text = strip_fenced_blocks(ctx.text);
        let bullets: Vec<Range<usize>> = BULLET_ITEM
            .find_iter(&text)
            .map(|m| m.range())
            .collect();
        if bullets.len() >= ctx.policy.min_points.max(2) {
            return None;
        }

        let points: Vec<_> = DELIMITED_PAIR
            .captures_iter(&text)
            .filter(|caps| {
                caps.get(0)
                    .map(|m| !bullets.iter().any(|b| overlaps(b, &m.range())))
                    .unwrap_or(false)
            })
            .filter_map(|caps| {
                let (label, separator, value) = (caps.get(1)?, caps.get(2)?, caps.get(3)?);
                if is_embedded_number(&text, label.as_str(), separator, value) {
                    return None;
                }
                point(label.as_str(), value.as_str())
            })
            .collect();
        build_spec(points, &text, ctx.policy)
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Clock times (`14:30`), ports and URLs are not pairs.
fn is_embedded_number(text: &str, label: &str, separator: Match<'_>, value: Match<'_>) -> bool {
    let glued_colon = separator.as_str() == ":"
        && separator.end() == value.start()
        && label.ends_with(|c: char| c.is_ascii_digit());
    let followed = text[value.end()..].starts_with(|c: char| c == ':' || c.is_ascii_digit());
    glued_colon || followed || label.ends_with('/')
}

fn point(label: &str, value: &str) -> Option<(String, f64)> {
    let label = label
        .trim_start_matches(|c: char| matches!(c, '-' | '•' | '*' | '|') || c.is_whitespace())
        .trim_matches(|c: char| c == '*' || c.is_whitespace());
    if label.is_empty() {
        return None;
    }
    Some((label.to_string(), parse_locale_number(value)))
}

fn build_spec(points: Vec<(String, f64)>, text: &str, policy: &ChartPolicy) -> Option<ChartSpec> {
    if points.len() < policy.min_points.max(2) {
        return None;
    }
    let temporal = points
        .first()
        .map(|(label, _)| policy.is_temporal_label(label))
        .unwrap_or(false);
    let title = extract_title(text).unwrap_or_else(|| policy.default_title.clone());
    Some(label_value_spec(points, temporal, title, policy))
}

/// Finds an introductory title phrase in the text.
pub(crate) fn extract_title(text: &str) -> Option<String> {
    [&*TITLE_PHRASE, &*TITLE_HEADING]
        .iter()
        .filter_map(|re| re.captures(text))
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
                .to_string()
        })
        .find(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartKind, Scalar};

    fn run(extractor: &dyn ChartExtractor, text: &str) -> Option<ChartSpec> {
        let policy = ChartPolicy::default();
        extractor.extract(&ExtractionContext {
            text,
            chart_requested: false,
            policy: &policy,
        })
    }

    fn values(spec: &ChartSpec) -> Vec<f64> {
        spec.data
            .rows
            .iter()
            .filter_map(|row| row.get("valor").and_then(Scalar::as_f64))
            .collect()
    }

    mod bullets {
        use super::*;

        const SALES: &str = "Vendas por mês:\n- Junho: R$ 100.000,00\n- Julho: R$ 150.000,00\n- Agosto: R$ 200.000,00";

        #[test]
        fn extracts_monthly_series() {
            let spec = run(&BulletListExtractor, SALES).unwrap();
            assert_eq!(spec.kind, ChartKind::Line);
            assert_eq!(spec.data.x_key, "periodo");
            assert_eq!(values(&spec), vec![100000.0, 150000.0, 200000.0]);
            assert_eq!(spec.data.title.as_deref(), Some("Vendas por mês"));
        }

        #[test]
        fn accepts_other_markers_and_parenthesised_labels() {
            let text = "• Novembro (até 19/11): R$ 218.903,93\n* **Outubro**: 1.000";
            let spec = run(&BulletListExtractor, text).unwrap();
            assert_eq!(
                spec.data.rows[0].get("periodo"),
                Some(&Scalar::Text("Novembro (até 19/11)".into()))
            );
            assert_eq!(
                spec.data.rows[1].get("periodo"),
                Some(&Scalar::Text("Outubro".into()))
            );
            assert_eq!(values(&spec), vec![218903.93, 1000.0]);
        }

        #[test]
        fn categorical_labels_become_bar() {
            let text = "- Loja A: 10\n- Loja B: 20";
            let spec = run(&BulletListExtractor, text).unwrap();
            assert_eq!(spec.kind, ChartKind::Bar);
            assert_eq!(spec.data.x_key, "item");
            assert_eq!(spec.data.title.as_deref(), Some("Gráfico de Dados"));
        }

        #[test]
        fn needs_two_items() {
            assert!(run(&BulletListExtractor, "- Junho: 10").is_none());
        }

        #[test]
        fn ignores_lists_inside_code_fences() {
            let text = "```\n- a: 1\n- b: 2\n```";
            assert!(run(&BulletListExtractor, text).is_none());
        }
    }

    mod pairs {
        use super::*;

        #[test]
        fn extracts_colon_pairs() {
            let text = "Loja A: 120\nLoja B: 80";
            let spec = run(&DelimitedPairExtractor, text).unwrap();
            assert_eq!(spec.kind, ChartKind::Bar);
            assert_eq!(values(&spec), vec![120.0, 80.0]);
        }

        #[test]
        fn extracts_pipe_tables() {
            let text = "| Janeiro | 1.500,50 |\n| Fevereiro | 2.000 |";
            let spec = run(&DelimitedPairExtractor, text).unwrap();
            assert_eq!(spec.kind, ChartKind::Line);
            assert_eq!(
                spec.data.rows[0].get("periodo"),
                Some(&Scalar::Text("Janeiro".into()))
            );
            assert_eq!(values(&spec), vec![1500.5, 2000.0]);
        }

        #[test]
        fn defers_to_bulleted_lists() {
            let text = "- Loja A: 1\n- Loja B: 2\nTotal: 3";
            assert!(run(&DelimitedPairExtractor, text).is_none());
        }

        #[test]
        fn skips_pairs_claimed_by_a_single_bullet() {
            let text = "- Loja A: 1\nLoja B: 2\nLoja C: 3";
            let spec = run(&DelimitedPairExtractor, text).unwrap();
            assert_eq!(spec.data.rows.len(), 2);
            assert_eq!(values(&spec), vec![2.0, 3.0]);
        }

        #[test]
        fn needs_two_pairs() {
            assert!(run(&DelimitedPairExtractor, "Total: 3").is_none());
        }

        #[test]
        fn keeps_numbered_labels_spaced_from_the_colon() {
            let text = "Loja 1: 120\nLoja 2: 80";
            let spec = run(&DelimitedPairExtractor, text).unwrap();
            assert_eq!(values(&spec), vec![120.0, 80.0]);
        }

        #[test]
        fn ignores_clock_times() {
            let text = "A reunião começa às 14:30 e termina às 15:45.";
            assert!(run(&DelimitedPairExtractor, text).is_none());

            let text = "Início: 09:00\nFim: 18:00";
            assert!(run(&DelimitedPairExtractor, text).is_none());
        }

        #[test]
        fn ignores_urls_and_ports() {
            let text = "Use http://localhost:8080 ou http://localhost:9090";
            assert!(run(&DelimitedPairExtractor, text).is_none());

            let text = "http://localhost:8080\nhttp://localhost:9090";
            assert!(run(&DelimitedPairExtractor, text).is_none());
        }

        #[test]
        fn reads_one_pair_per_line() {
            let text = "Loja A: 120 e Loja B: 80";
            assert!(run(&DelimitedPairExtractor, text).is_none());
        }
    }

    mod titles {
        use super::*;

        #[test]
        fn phrase_title() {
            assert_eq!(
                extract_title("Aqui está o gráfico das vendas mensais:\n- a: 1").as_deref(),
                Some("vendas mensais")
            );
        }

        #[test]
        fn english_phrase_title() {
            assert_eq!(
                extract_title("Here is a chart of revenue by store.").as_deref(),
                Some("revenue by store")
            );
        }

        #[test]
        fn heading_title() {
            assert_eq!(
                extract_title("## Impressões por canal:\n- TV: 10").as_deref(),
                Some("Impressões por canal")
            );
        }

        #[test]
        fn no_title() {
            assert_eq!(extract_title("Sem título aqui"), None);
        }
    }
}
