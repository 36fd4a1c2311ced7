//! Gemini service for text generation and retrieval embeddings.
//!
//! Minimal, non-streaming client around the Gemini REST API. Endpoints are
//! derived from `LlmModelConfig::endpoint`:
//! - `POST {endpoint}/v1beta/models/{model}:generateContent` — text generation
//! - `POST {endpoint}/v1beta/models/{model}:embedContent`    — embeddings
//!
//! Embedding requests carry a task type so the service can optimize the
//! representation: [`EmbeddingTask::RetrievalDocument`] while indexing,
//! [`EmbeddingTask::RetrievalQuery`] at question time.
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.model` must be non-empty
//!
//! Errors are normalized via the unified types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{
    AiLlmError, ConfigError, make_snippet, validate_http_endpoint,
};

/// Task type attached to embedding requests.
///
/// The hosted model produces differently optimized vectors for corpus
/// documents and for free-text queries; indexing and querying must not mix
/// them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    /// Embedding a corpus document during index building.
    RetrievalDocument,
    /// Embedding a user question at retrieval time.
    RetrievalQuery,
}

impl EmbeddingTask {
    /// Wire value expected by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddingTask::RetrievalDocument => "RETRIEVAL_DOCUMENT",
            EmbeddingTask::RetrievalQuery => "RETRIEVAL_QUERY",
        }
    }
}

/// Thin client for the Gemini API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and the API key header).
///
/// High-level operations:
/// - [`GeminiService::generate`] — single, non-streaming content generation
/// - [`GeminiService::embed`]    — single embeddings vector retrieval
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embed: String,
    /// Fully qualified model name (`models/...`) repeated in embed bodies.
    qualified_model: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// Validates the API key, model name, and endpoint scheme. Builds an HTTP
    /// client with default headers and a configurable timeout.
    ///
    /// # Errors
    /// - [`ConfigError::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ConfigError::EmptyModel`] if `cfg.model` is blank
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let endpoint = cfg.endpoint.trim();
        validate_http_endpoint("GEMINI_URL", endpoint)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            header::HeaderValue::from_str(&api_key).map_err(|e| {
                AiLlmError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let model = cfg.model.trim();
        let qualified_model = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        let url_generate = format!("{base}/v1beta/{qualified_model}:generateContent");
        let url_embed = format!("{base}/v1beta/{qualified_model}:embedContent");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embed,
            qualified_model,
        })
    }

    /// Performs a **non-streaming** generation request (`:generateContent`).
    ///
    /// Mapped options from config: `temperature`, `top_p`, `max_tokens`
    /// (→ `maxOutputTokens`).
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Decode`] if the JSON cannot be parsed
    /// - [`AiLlmError::EmptyCandidates`] if no candidate text is returned
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateRequest::from_cfg(&self.cfg, prompt);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "generateContent returned non-success status"
            );
            return Err(AiLlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            AiLlmError::Decode(format!(
                "serde error: {e}; expected `candidates[0].content.parts[*].text`"
            ))
        })?;

        let text = out.first_text().ok_or(AiLlmError::EmptyCandidates)?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            "generation completed"
        );
        Ok(text)
    }

    /// Retrieves a single embeddings vector via `:embedContent`.
    ///
    /// The `task` steers the representation; use
    /// [`EmbeddingTask::RetrievalDocument`] while indexing and
    /// [`EmbeddingTask::RetrievalQuery`] for user questions.
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Decode`] if the JSON cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model, task = task.as_str()))]
    pub async fn embed(&self, input: &str, task: EmbeddingTask) -> Result<Vec<f32>, AiLlmError> {
        let started = Instant::now();
        let body = EmbedRequest {
            model: &self.qualified_model,
            content: Content::from_text(input),
            task_type: task.as_str(),
        };

        debug!(input_len = input.len(), "POST {}", self.url_embed);
        let resp = self.client.post(&self.url_embed).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embed.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "embedContent returned non-success status"
            );
            return Err(AiLlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: EmbedResponse = resp.json().await.map_err(|e| {
            AiLlmError::Decode(format!("serde error: {e}; expected `embedding.values`"))
        })?;

        info!(
            dim = out.embedding.values.len(),
            latency_ms = started.elapsed().as_millis(),
            "embedding completed"
        );
        Ok(out.embedding.values)
    }
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Request body for `:generateContent` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateRequest<'a> {
    /// Builds a minimal single-turn request from config and `prompt`.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        let generation_config = if cfg.temperature.is_some()
            || cfg.top_p.is_some()
            || cfg.max_tokens.is_some()
        {
            Some(GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            })
        } else {
            None
        };

        Self {
            contents: vec![Content::from_text(prompt)],
            generation_config,
        }
    }
}

/// Subset of `generationConfig`.
///
/// Extend this struct as needed (stop sequences, candidate count, etc.).
#[derive(Debug, Default, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// One content turn (request side).
#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn from_text(text: &'a str) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response body for `:generateContent`.
///
/// Minimal shape: the generated text lives in
/// `candidates[*].content.parts[*].text`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Joins the parts of the first candidate that carries any text.
    fn first_text(self) -> Option<String> {
        self.candidates.into_iter().find_map(|c| {
            let parts = c.content?.parts;
            let text: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
            if text.is_empty() {
                None
            } else {
                Some(text.join(""))
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    text: Option<String>,
}

/// Request body for `:embedContent`.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

/// Response body for `:embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(api_key: Option<&str>, endpoint: &str, model: &str) -> LlmModelConfig {
        LlmModelConfig {
            model: model.to_string(),
            endpoint: endpoint.to_string(),
            api_key: api_key.map(|k| k.to_string()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn new_requires_api_key() {
        let err = GeminiService::new(cfg(None, "https://example.com", "gemini-1.5-flash"))
            .err()
            .expect("missing key must fail");
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn new_rejects_bad_endpoint_and_empty_model() {
        assert!(GeminiService::new(cfg(Some("k"), "grpc://x", "m")).is_err());
        assert!(GeminiService::new(cfg(Some("k"), "https://example.com", "  ")).is_err());
    }

    #[test]
    fn urls_qualify_the_model_once() {
        let svc =
            GeminiService::new(cfg(Some("k"), "https://example.com/", "text-embedding-004"))
                .unwrap();
        assert_eq!(
            svc.url_embed,
            "https://example.com/v1beta/models/text-embedding-004:embedContent"
        );

        let svc2 =
            GeminiService::new(cfg(Some("k"), "https://example.com", "models/custom")).unwrap();
        assert_eq!(
            svc2.url_generate,
            "https://example.com/v1beta/models/custom:generateContent"
        );
    }

    #[test]
    fn task_wire_values() {
        assert_eq!(EmbeddingTask::RetrievalDocument.as_str(), "RETRIEVAL_DOCUMENT");
        assert_eq!(EmbeddingTask::RetrievalQuery.as_str(), "RETRIEVAL_QUERY");
    }

    #[test]
    fn generate_response_joins_first_candidate_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "there"}]}}
            ]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("Hello there"));
    }

    #[test]
    fn generate_response_without_candidates_is_empty() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn embed_response_shape() {
        let raw = r#"{"embedding": {"values": [0.1, -0.5, 2.0]}}"#;
        let resp: EmbedResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.embedding.values, vec![0.1, -0.5, 2.0]);
    }
}
