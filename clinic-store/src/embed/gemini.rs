//! Gemini embedding provider implementation.
//!
//! Bridges the store's [`EmbeddingsProvider`] seam to the shared
//! [`LlmServiceProfiles`] embedding profile and enforces the expected
//! vector dimensionality.

use std::sync::Arc;

use ai_llm_service::{EmbeddingTask, LlmServiceProfiles};

use crate::embed::{EmbeddingMode, EmbeddingsProvider};
use crate::errors::StoreError;

/// Configuration for the Gemini embedding backend.
#[derive(Clone)]
pub struct GeminiEmbedderConfig {
    pub svc: Arc<LlmServiceProfiles>,
    /// Expected embedding dimension size.
    pub dim: usize,
}

/// Gemini embedding provider (async).
#[derive(Clone)]
pub struct GeminiEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl GeminiEmbedder {
    /// Construct a new embedder from configuration.
    pub fn new(cfg: GeminiEmbedderConfig) -> Self {
        Self {
            svc: cfg.svc,
            dim: cfg.dim,
        }
    }
}

impl EmbeddingsProvider for GeminiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
        mode: EmbeddingMode,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>,
    > {
        Box::pin(async move {
            let task = match mode {
                EmbeddingMode::Document => EmbeddingTask::RetrievalDocument,
                EmbeddingMode::Query => EmbeddingTask::RetrievalQuery,
            };

            let vector = self
                .svc
                .embed(text, task)
                .await
                .map_err(|e| StoreError::Embedding(e.to_string()))?;

            if vector.len() != self.dim {
                return Err(StoreError::VectorSizeMismatch {
                    got: vector.len(),
                    want: self.dim,
                });
            }

            Ok(vector)
        })
    }
}
