use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::GenerationError;

/// Inputs per embeddings request.
const EMBEDDING_BATCH: usize = 256;

/// Text generation seam. The production backend is [`OpenAiClient`].
pub trait ChatBackend: Send + Sync {
    fn complete(&self, prompt: &str, temperature: f32, top_p: f32)
        -> Result<String, GenerationError>;
}

/// Embedding seam, used both for indexing lore and for queries.
pub trait Embedder: Send + Sync {
    fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, GenerationError>;
}

#[derive(Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    pub content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// OpenAI-compatible HTTP client (chat completions + embeddings).
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
        }
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, GenerationError> {
        let resp = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;

        check_status(resp)
    }
}

fn check_status(resp: Response) -> Result<Response, GenerationError> {
    let status = resp.status().as_u16();
    match status {
        200..=299 => Ok(resp),
        401 | 403 => Err(GenerationError::Authentication(
            resp.text().unwrap_or_default(),
        )),
        429 => Err(GenerationError::RateLimited),
        _ => Err(GenerationError::Api {
            status,
            message: resp.text().unwrap_or_default(),
        }),
    }
}

impl ChatBackend for OpenAiClient {
    fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        top_p: f32,
    ) -> Result<String, GenerationError> {
        let req = ChatCompletionRequest {
            model: &self.chat_model,
            temperature,
            top_p,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            model = %self.chat_model,
            temperature,
            top_p,
            prompt_chars = prompt.len(),
            "Sending completion request"
        );

        let resp = self
            .post("chat/completions", &req)?
            .json::<ChatCompletionResponse>()?;

        extract_content(resp)
    }
}

impl Embedder for OpenAiClient {
    fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, GenerationError> {
        let mut embeddings = Vec::with_capacity(inputs.len());

        for batch in inputs.chunks(EMBEDDING_BATCH) {
            debug!(
                model = %self.embedding_model,
                count = batch.len(),
                "Sending embedding request"
            );

            let req = EmbeddingRequest {
                model: &self.embedding_model,
                input: batch,
                encoding_format: "float",
            };
            let resp = self
                .post("embeddings", &req)?
                .json::<EmbeddingResponse>()?;

            embeddings.extend(order_embeddings(resp, batch.len())?);
        }

        Ok(embeddings)
    }
}

fn extract_content(resp: ChatCompletionResponse) -> Result<String, GenerationError> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| GenerationError::MalformedResponse("response has no content".into()))
}

/// Puts embeddings back in input order and checks none are missing.
fn order_embeddings(
    resp: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, GenerationError> {
    if resp.data.len() != expected {
        return Err(GenerationError::MalformedResponse(format!(
            "expected {expected} embeddings, got {}",
            resp.data.len()
        )));
    }

    let mut data = resp.data;
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
}
