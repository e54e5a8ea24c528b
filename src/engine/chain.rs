use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::llm_client::{ChatBackend, Embedder};
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::retriever::{LoreIndex, Retriever};
use crate::error::GenerationError;
use crate::model::generation_request::GenerationRequest;
use crate::model::params::GenerationParameters;

/// retrieve -> prompt -> LLM -> text. No retries: the first error is
/// returned to the caller.
pub struct GenerationChain {
    index: Arc<LoreIndex>,
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn ChatBackend>,
    retriever: Retriever,
    params: GenerationParameters,
}

impl GenerationChain {
    pub fn new(
        index: Arc<LoreIndex>,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn ChatBackend>,
        params: GenerationParameters,
    ) -> Self {
        let params = params.clamped();
        let retriever = Retriever::new(index.clone(), embedder.clone(), params.retrieval_k);
        Self {
            index,
            embedder,
            llm,
            retriever,
            params,
        }
    }

    /// Re-points the chain at new parameters. The retriever is always
    /// recreated, even if the values did not change.
    pub fn rebuild(&mut self, params: GenerationParameters) {
        self.params = params.clamped();
        self.retriever = Retriever::new(
            self.index.clone(),
            self.embedder.clone(),
            self.params.retrieval_k,
        );
        info!(
            temperature = self.params.temperature,
            top_p = self.params.top_p,
            k = self.params.retrieval_k,
            "Generation chain rebuilt"
        );
    }

    pub fn params(&self) -> GenerationParameters {
        self.params
    }

    pub fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let context = self.retriever.retrieve(&request.input)?;
        let prompt = PromptBuilder::build(request, &context);

        debug!(
            mode = %request.mode,
            template = request.template.name,
            context_chunks = context.len(),
            "Invoking LLM"
        );

        let raw = self
            .llm
            .complete(&prompt, self.params.temperature, self.params.top_p)?;

        Ok(raw.trim().to_string())
    }
}
