//! Structural validation of untyped chart candidates.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::{ChartData, ChartKind, ChartSpec, Row, Scalar, YKey};

/// Validates an untyped candidate and converts it into a `ChartSpec`.
///
/// Requires an object with a known `type`, a non-empty `data` array of
/// objects, an `xKey` present in the first row, and a `yKey` (string or
/// list of strings) with at least one key present in the first row.
/// Non-scalar row values are dropped. Returns `None` on any violation.
pub fn validate_chart_candidate(candidate: &Value) -> Option<ChartSpec> {
    let object = candidate.as_object()?;

    let kind: ChartKind = object.get("type")?.as_str()?.parse().ok()?;
    let rows = parse_rows(object.get("data")?)?;
    let x_key = object.get("xKey")?.as_str()?.to_string();
    let y_key = parse_y_key(object.get("yKey")?)?;

    let mut data = ChartData::new(rows, x_key, y_key);
    if !data.axes_resolve() {
        return None;
    }

    if let Some(title) = object.get("title").and_then(Value::as_str) {
        data = data.with_title(title);
    }
    if let Some(labels) = object.get("labels").and_then(parse_labels) {
        data = data.with_labels(labels);
    }

    Some(ChartSpec::new(kind, data))
}

fn parse_rows(value: &Value) -> Option<Vec<Row>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_object().map(parse_row))
        .collect()
}

fn parse_row(object: &Map<String, Value>) -> Row {
    object
        .iter()
        .filter_map(|(key, value)| Scalar::from_json(value).map(|s| (key.clone(), s)))
        .collect()
}

fn parse_y_key(value: &Value) -> Option<YKey> {
    match value {
        Value::String(key) => Some(YKey::Single(key.clone())),
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(YKey::Multiple),
        _ => None,
    }
}

fn parse_labels(value: &Value) -> Option<BTreeMap<String, String>> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|label| (k.clone(), label.to_string())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "type": "bar",
            "data": [{"mes": "Jan", "total": 10}, {"mes": "Fev", "total": 20}],
            "xKey": "mes",
            "yKey": "total",
        })
    }

    mod accepts {
        use super::*;

        #[test]
        fn well_formed_candidate() {
            let spec = validate_chart_candidate(&valid()).unwrap();
            assert_eq!(spec.kind, ChartKind::Bar);
            assert_eq!(spec.data.rows.len(), 2);
            assert_eq!(spec.data.x_key, "mes");
        }

        #[test]
        fn multi_series_with_one_resolvable_key() {
            let mut candidate = valid();
            candidate["yKey"] = json!(["total", "missing"]);
            let spec = validate_chart_candidate(&candidate).unwrap();
            assert_eq!(spec.data.y_key.keys(), vec!["total", "missing"]);
        }

        #[test]
        fn title_and_labels_are_kept() {
            let mut candidate = valid();
            candidate["title"] = json!("Vendas");
            candidate["labels"] = json!({"mes": "Mês", "total": 5});
            let spec = validate_chart_candidate(&candidate).unwrap();
            assert_eq!(spec.data.title.as_deref(), Some("Vendas"));
            let labels = spec.data.labels.unwrap();
            assert_eq!(labels.get("mes").map(String::as_str), Some("Mês"));
            assert!(!labels.contains_key("total"));
        }

        #[test]
        fn non_scalar_row_values_are_dropped() {
            let mut candidate = valid();
            candidate["data"][0]["extra"] = json!({"nested": true});
            candidate["data"][0]["flag"] = json!(null);
            let spec = validate_chart_candidate(&candidate).unwrap();
            assert_eq!(spec.data.rows[0].len(), 2);
        }

        #[test]
        fn kind_is_case_insensitive() {
            let mut candidate = valid();
            candidate["type"] = json!("Area");
            assert_eq!(validate_chart_candidate(&candidate).unwrap().kind, ChartKind::Area);
        }
    }

    mod rejects {
        use super::*;

        #[test]
        fn non_objects() {
            assert!(validate_chart_candidate(&json!(null)).is_none());
            assert!(validate_chart_candidate(&json!([1, 2])).is_none());
            assert!(validate_chart_candidate(&json!("bar")).is_none());
        }

        #[test]
        fn unknown_kind() {
            let mut candidate = valid();
            candidate["type"] = json!("scatter");
            assert!(validate_chart_candidate(&candidate).is_none());
        }

        #[test]
        fn empty_rows() {
            let mut candidate = valid();
            candidate["data"] = json!([]);
            assert!(validate_chart_candidate(&candidate).is_none());
        }

        #[test]
        fn rows_that_are_not_objects() {
            let mut candidate = valid();
            candidate["data"] = json!([{"mes": "Jan", "total": 1}, 5]);
            assert!(validate_chart_candidate(&candidate).is_none());
        }

        #[test]
        fn missing_x_key() {
            let mut candidate = valid();
            candidate["xKey"] = json!("dia");
            assert!(validate_chart_candidate(&candidate).is_none());
        }

        #[test]
        fn every_y_key_missing() {
            let mut candidate = valid();
            candidate["yKey"] = json!(["a", "b"]);
            assert!(validate_chart_candidate(&candidate).is_none());
        }

        #[test]
        fn empty_y_key_list() {
            let mut candidate = valid();
            candidate["yKey"] = json!([]);
            assert!(validate_chart_candidate(&candidate).is_none());
        }

        #[test]
        fn x_key_only_in_later_rows() {
            let mut candidate = valid();
            candidate["data"] = json!([{"total": 1}, {"mes": "Fev", "total": 2}]);
            assert!(validate_chart_candidate(&candidate).is_none());
        }
    }
}
