//! Chart domain: extraction of chart data from free text and the
//! presentation lifecycle of a chart attached to a message.

mod availability;
mod dataset;
mod extract;
mod intent;
mod kind;
mod numeric;
mod orchestrator;
mod policy;
mod presentation;
mod residue;
mod validator;

pub use availability::{available_kinds, can_visualize, infer_chart_kind};
pub use dataset::{ChartData, ChartOptions, ChartSpec, Row, Scalar, YKey};
pub use extract::{
    BulletListExtractor, ChartExtractor, DelimitedPairExtractor, ExtractionCascade,
    ExtractionContext, JsonExtractor, LiteralArrayExtractor,
};
pub use intent::is_chart_request;
pub use kind::ChartKind;
pub use numeric::parse_locale_number;
pub use orchestrator::{ExtractionOrchestrator, InterpretedResponse};
pub use policy::{ChartPolicy, FieldNames};
pub use presentation::{ChartPresentation, PresentationError, PresentationState};
pub use residue::strip_code_residue;
pub use validator::validate_chart_candidate;
