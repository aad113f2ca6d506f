//! Chart request detection.

use super::ChartPolicy;

/// Returns true if the user message asks for a chart.
///
/// Case-insensitive substring match against the policy's intent keywords.
/// Recall is favoured: a miss only downgrades options to a suggestion.
pub fn is_chart_request(message: &str, policy: &ChartPolicy) -> bool {
    let lower = message.to_lowercase();
    policy
        .intent_keywords
        .iter()
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
}
