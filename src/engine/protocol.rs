use crate::error::GenerationError;
use crate::model::generation_request::GenerationRequest;
use crate::model::params::GenerationParameters;

pub enum EngineCommand {
    /// Rebuild the generation chain with new slider values.
    Configure(GenerationParameters),
    Generate {
        ticket: u64,
        request: GenerationRequest,
    },
}

pub enum EngineResponse {
    Configured(GenerationParameters),

    Generated {
        ticket: u64,
        result: Result<String, GenerationError>,
    },
}
