use crate::model::catalog::{MaturityPolicy, Mode, Template};

/// Everything the generation chain needs for one turn. History is a
/// rendered snapshot of the session's memory taken when the turn began.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub input: String,
    pub mode: Mode,
    pub template: &'static Template,
    pub maturity: &'static MaturityPolicy,
    pub history: String,
}
