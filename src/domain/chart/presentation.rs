//! Per-message chart presentation lifecycle.
//!
//! - `None` to `Suggested`, `OptionsOffered` or `Rendered` when the bot turn
//!   is created
//! - `Suggested` to `OptionsOffered` when the user accepts the suggestion
//! - `OptionsOffered` to `Rendered` when the user picks a kind
//! - `Rendered` back to `OptionsOffered`, or to another kind
//!
//! Options are kept next to a rendered spec so the kind can be changed
//! after rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ChartKind, ChartOptions, ChartSpec};
use crate::domain::foundation::{StateMachine, ValidationError};

/// Errors raised by presentation transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("Chart kind '{0}' is not available for this message")]
    KindUnavailable(ChartKind),

    #[error("This message has no chart options")]
    NoOptions,

    #[error(transparent)]
    Transition(#[from] ValidationError),
}

/// Lifecycle position of a message's chart presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationState {
    None,
    Suggested,
    OptionsOffered,
    Rendered,
}

impl StateMachine for PresentationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PresentationState::*;
        matches!(
            (self, target),
            (None, Suggested)
                | (None, OptionsOffered)
                | (None, Rendered)
                | (Suggested, OptionsOffered)
                | (OptionsOffered, Rendered)
                | (Rendered, Rendered)
                | (Rendered, OptionsOffered)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PresentationState::*;
        match self {
            None => vec![Suggested, OptionsOffered, Rendered],
            Suggested => vec![OptionsOffered],
            OptionsOffered => vec![Rendered],
            Rendered => vec![Rendered, OptionsOffered],
        }
    }
}

/// Chart attached to a message. At most one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "chart", rename_all = "snake_case")]
pub enum ChartPresentation {
    /// Plain text, no chart.
    #[default]
    None,
    /// Chartable data the user did not ask for.
    Suggested(ChartOptions),
    /// Data ready, the user picks a kind.
    Options(ChartOptions),
    /// A chosen chart, with the options it came from when there were any.
    Rendered {
        spec: ChartSpec,
        options: Option<ChartOptions>,
    },
}

impl ChartPresentation {
    /// A chart rendered without offering a choice.
    pub fn rendered(spec: ChartSpec) -> Self {
        ChartPresentation::Rendered {
            spec,
            options: None,
        }
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> PresentationState {
        match self {
            ChartPresentation::None => PresentationState::None,
            ChartPresentation::Suggested(_) => PresentationState::Suggested,
            ChartPresentation::Options(_) => PresentationState::OptionsOffered,
            ChartPresentation::Rendered { .. } => PresentationState::Rendered,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ChartPresentation::None)
    }

    /// The chart to draw, if one was chosen.
    pub fn chart_spec(&self) -> Option<&ChartSpec> {
        match self {
            ChartPresentation::Rendered { spec, .. } => Some(spec),
            _ => None,
        }
    }

    /// The kinds on offer, including those retained after rendering.
    pub fn chart_options(&self) -> Option<&ChartOptions> {
        match self {
            ChartPresentation::Options(options) => Some(options),
            ChartPresentation::Rendered { options, .. } => options.as_ref(),
            _ => None,
        }
    }

    /// The unsolicited suggestion, if any.
    pub fn chart_suggestion(&self) -> Option<&ChartOptions> {
        match self {
            ChartPresentation::Suggested(suggestion) => Some(suggestion),
            _ => None,
        }
    }

    /// Accepts a suggestion, turning it into options with the same kinds.
    pub fn visualize(&mut self) -> Result<(), PresentationError> {
        if self.state() != PresentationState::Suggested {
            return Err(ValidationError::invalid_transition(
                self.state(),
                PresentationState::OptionsOffered,
            )
            .into());
        }
        if let ChartPresentation::Suggested(suggestion) = self {
            *self = ChartPresentation::Options(suggestion.clone());
        }
        Ok(())
    }

    /// Renders the data as `kind`.
    ///
    /// Allowed while options are on offer, including after a previous
    /// selection. Choosing a kind that is not on offer leaves the
    /// presentation unchanged.
    pub fn select_kind(&mut self, kind: ChartKind) -> Result<&ChartSpec, PresentationError> {
        self.state().transition_to(PresentationState::Rendered)?;
        let options = self.chart_options().ok_or(PresentationError::NoOptions)?;
        let spec = options
            .render(kind)
            .ok_or(PresentationError::KindUnavailable(kind))?;
        let options = options.clone();

        *self = ChartPresentation::Rendered {
            spec,
            options: Some(options),
        };
        self.chart_spec().ok_or(PresentationError::NoOptions)
    }

    /// Returns a rendered chart to the kind picker.
    pub fn reopen_options(&mut self) -> Result<(), PresentationError> {
        self.state().transition_to(PresentationState::OptionsOffered)?;
        match std::mem::take(self) {
            ChartPresentation::Rendered {
                options: Some(options),
                ..
            } => {
                *self = ChartPresentation::Options(options);
                Ok(())
            }
            other => {
                *self = other;
                Err(PresentationError::NoOptions)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartData, Row, Scalar};

    fn options() -> ChartOptions {
        let rows: Vec<Row> = ["Jan", "Fev"]
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let mut row = Row::new();
                row.insert("mes".into(), Scalar::from(*m));
                row.insert("v".into(), Scalar::Number(i as f64));
                row
            })
            .collect();
        ChartOptions::new(
            ChartData::new(rows, "mes", "v"),
            vec![ChartKind::Bar, ChartKind::Line, ChartKind::Area],
        )
    }

    mod state_machine {
        use super::*;

        #[test]
        fn none_can_reach_every_attached_state() {
            let state = PresentationState::None;
            assert!(state.can_transition_to(&PresentationState::Suggested));
            assert!(state.can_transition_to(&PresentationState::OptionsOffered));
            assert!(state.can_transition_to(&PresentationState::Rendered));
        }

        #[test]
        fn suggestion_only_leads_to_options() {
            let state = PresentationState::Suggested;
            assert_eq!(state.valid_transitions(), vec![PresentationState::OptionsOffered]);
            assert!(state.transition_to(PresentationState::Rendered).is_err());
        }

        #[test]
        fn nothing_returns_to_none() {
            for state in [
                PresentationState::Suggested,
                PresentationState::OptionsOffered,
                PresentationState::Rendered,
            ] {
                assert!(!state.can_transition_to(&PresentationState::None));
                assert!(!state.is_terminal());
            }
        }
    }

    mod visualize {
        use super::*;

        #[test]
        fn suggestion_becomes_options_with_same_kinds() {
            let mut presentation = ChartPresentation::Suggested(options());
            presentation.visualize().unwrap();
            assert_eq!(presentation.state(), PresentationState::OptionsOffered);
            assert!(presentation.chart_suggestion().is_none());
            assert_eq!(presentation.chart_options(), Some(&options()));
        }

        #[test]
        fn rejected_without_suggestion() {
            let mut presentation = ChartPresentation::Options(options());
            assert!(matches!(
                presentation.visualize(),
                Err(PresentationError::Transition(_))
            ));
            assert_eq!(presentation, ChartPresentation::Options(options()));

            let mut none = ChartPresentation::None;
            assert!(none.visualize().is_err());
            assert!(none.is_none());
        }
    }

    mod select_kind {
        use super::*;

        #[test]
        fn renders_and_keeps_options() {
            let mut presentation = ChartPresentation::Options(options());
            let spec = presentation.select_kind(ChartKind::Line).unwrap().clone();
            assert_eq!(spec.kind, ChartKind::Line);
            assert_eq!(spec.data, options().data);
            assert_eq!(presentation.chart_options(), Some(&options()));
            assert_eq!(presentation.chart_spec(), Some(&spec));
        }

        #[test]
        fn unavailable_kind_changes_nothing() {
            let mut presentation = ChartPresentation::Options(options());
            let result = presentation.select_kind(ChartKind::Pie);
            assert_eq!(result, Err(PresentationError::KindUnavailable(ChartKind::Pie)));
            assert_eq!(presentation, ChartPresentation::Options(options()));
        }

        #[test]
        fn selecting_twice_is_idempotent() {
            let mut presentation = ChartPresentation::Options(options());
            presentation.select_kind(ChartKind::Bar).unwrap();
            let first = presentation.clone();
            presentation.select_kind(ChartKind::Bar).unwrap();
            assert_eq!(presentation, first);
        }

        #[test]
        fn kind_can_change_after_rendering() {
            let mut presentation = ChartPresentation::Options(options());
            presentation.select_kind(ChartKind::Bar).unwrap();
            presentation.select_kind(ChartKind::Area).unwrap();
            assert_eq!(presentation.chart_spec().map(|s| s.kind), Some(ChartKind::Area));
        }

        #[test]
        fn suggestion_must_be_visualized_first() {
            let mut presentation = ChartPresentation::Suggested(options());
            assert!(matches!(
                presentation.select_kind(ChartKind::Bar),
                Err(PresentationError::Transition(_))
            ));
        }

        #[test]
        fn direct_render_has_no_options() {
            let spec = options().render(ChartKind::Bar).unwrap();
            let mut presentation = ChartPresentation::rendered(spec);
            assert_eq!(
                presentation.select_kind(ChartKind::Line),
                Err(PresentationError::NoOptions)
            );
        }
    }

    mod reopen {
        use super::*;

        #[test]
        fn rendered_returns_to_options() {
            let mut presentation = ChartPresentation::Options(options());
            presentation.select_kind(ChartKind::Bar).unwrap();
            presentation.reopen_options().unwrap();
            assert_eq!(presentation, ChartPresentation::Options(options()));
        }

        #[test]
        fn direct_render_cannot_reopen() {
            let spec = options().render(ChartKind::Bar).unwrap();
            let mut presentation = ChartPresentation::rendered(spec.clone());
            assert_eq!(presentation.reopen_options(), Err(PresentationError::NoOptions));
            assert_eq!(presentation.chart_spec(), Some(&spec));
        }

        #[test]
        fn options_cannot_reopen() {
            let mut presentation = ChartPresentation::Options(options());
            assert!(presentation.reopen_options().is_err());
        }
    }

    #[test]
    fn serializes_with_state_tag() {
        let value = serde_json::to_value(ChartPresentation::Suggested(options())).unwrap();
        assert_eq!(value["state"], "suggested");
        assert_eq!(value["chart"]["availableTypes"], serde_json::json!(["bar", "line", "area"]));
    }
}
