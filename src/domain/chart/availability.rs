//! Chart kind availability and default kind inference.

use super::{ChartData, ChartKind, ChartPolicy, Scalar};

/// Returns the kinds the data may be rendered as, in picker order.
///
/// Bar, line and area are always legal for resolvable data. Pie is added
/// for a single series of at most `pie_max_rows` rows. Data whose axes do
/// not resolve yields an empty list.
pub fn available_kinds(data: &ChartData, policy: &ChartPolicy) -> Vec<ChartKind> {
    if !data.axes_resolve() {
        return Vec::new();
    }

    let mut kinds = vec![ChartKind::Bar, ChartKind::Line, ChartKind::Area];
    if data.rows.len() <= policy.pie_max_rows && data.y_key.is_single() {
        kinds.push(ChartKind::Pie);
    }
    kinds
}

/// Returns true if at least one kind is available.
pub fn can_visualize(data: &ChartData, policy: &ChartPolicy) -> bool {
    !available_kinds(data, policy).is_empty()
}

/// Picks a default kind for data rendered without a user choice.
pub fn infer_chart_kind(data: &ChartData, policy: &ChartPolicy) -> ChartKind {
    if data.rows.len() <= policy.direct_pie_max_rows {
        return ChartKind::Pie;
    }

    let first_x = data.rows.first().and_then(|row| row.get(&data.x_key));
    match first_x {
        Some(Scalar::Text(label)) if looks_like_date(label) => ChartKind::Line,
        _ => ChartKind::Bar,
    }
}

fn looks_like_date(label: &str) -> bool {
    label.contains('/')
        || label.contains('-')
        || (label.len() >= 4 && label.chars().take(4).all(|c| c.is_ascii_digit()))
}
