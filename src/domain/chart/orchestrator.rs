//! Turns a backend response into displayable text plus a chart presentation.

use serde_json::Value;

use super::{
    available_kinds, infer_chart_kind, is_chart_request, strip_code_residue,
    validate_chart_candidate, ChartOptions, ChartPolicy, ChartPresentation, ChartSpec,
    ExtractionCascade, ExtractionContext,
};

/// Displayable outcome of one bot response.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedResponse {
    /// Text to show; code residue is removed when a chart is attached.
    pub content: String,
    /// Chart attached to the message.
    pub presentation: ChartPresentation,
}

/// Decides how a response is presented.
///
/// An explicit chart (structured payload or JSON in the text) wins over
/// anything inferred from prose or code. When the user asked for a chart
/// the data is offered as options; otherwise it is only suggested.
#[derive(Debug)]
pub struct ExtractionOrchestrator {
    policy: ChartPolicy,
    explicit: ExtractionCascade,
    inferred: ExtractionCascade,
}

impl ExtractionOrchestrator {
    pub fn new(policy: ChartPolicy) -> Self {
        Self {
            policy,
            explicit: ExtractionCascade::explicit(),
            inferred: ExtractionCascade::inferred(),
        }
    }

    pub fn policy(&self) -> &ChartPolicy {
        &self.policy
    }

    /// Interprets a response to `user_message`.
    pub fn interpret(
        &self,
        response_text: &str,
        user_message: &str,
        payload: Option<&Value>,
    ) -> InterpretedResponse {
        let chart_requested = is_chart_request(user_message, &self.policy);
        let ctx = ExtractionContext {
            text: response_text,
            chart_requested,
            policy: &self.policy,
        };

        let candidate = payload
            .and_then(validate_chart_candidate)
            .or_else(|| self.explicit.run(&ctx))
            .or_else(|| self.inferred.run(&ctx));

        let presentation = match candidate {
            Some(spec) => self.present(spec, chart_requested),
            None => ChartPresentation::None,
        };

        let content = if presentation.is_none() {
            response_text.to_string()
        } else {
            strip_code_residue(response_text)
        };

        tracing::debug!(
            chart_requested,
            state = ?presentation.state(),
            "response interpreted"
        );

        InterpretedResponse {
            content,
            presentation,
        }
    }

    fn present(&self, spec: ChartSpec, chart_requested: bool) -> ChartPresentation {
        let kinds = available_kinds(&spec.data, &self.policy);

        if chart_requested {
            if kinds.is_empty() {
                let kind = infer_chart_kind(&spec.data, &self.policy);
                ChartPresentation::rendered(ChartSpec::new(kind, spec.data))
            } else {
                ChartPresentation::Options(ChartOptions::new(spec.data, kinds))
            }
        } else if kinds.is_empty() {
            ChartPresentation::None
        } else {
            ChartPresentation::Suggested(ChartOptions::new(spec.data, kinds))
        }
    }
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new(ChartPolicy::default())
    }
}
