//! Shared LLM service with two active profiles: **generation** and **embedding**.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Each profile owns its preconfigured HTTP client.

use std::sync::Arc;

use crate::{
    config::{
        default_config::{config_gemini_embedding, config_gemini_generation},
        llm_model_config::LlmModelConfig,
    },
    error_handler::AiLlmError,
    services::gemini_service::{EmbeddingTask, GeminiService},
};

/// Shared service that manages the two logical model profiles.
///
/// The generation profile phrases recommendations; the embedding profile
/// produces retrieval vectors. Both talk to the same hosted API with the
/// same credential.
pub struct LlmServiceProfiles {
    generation: GeminiService,
    embedding: GeminiService,
}

impl LlmServiceProfiles {
    /// Creates a new service from two explicit profile configs.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client fails validation.
    pub fn new(
        generation: LlmModelConfig,
        embedding: LlmModelConfig,
    ) -> Result<Self, AiLlmError> {
        Ok(Self {
            generation: GeminiService::new(generation)?,
            embedding: GeminiService::new(embedding)?,
        })
    }

    /// Creates the service from environment variables and wraps it in `Arc`.
    ///
    /// This is the startup entry point: a missing `GEMINI_API_KEY` surfaces
    /// here, before any network interface is touched.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] on missing/invalid environment values.
    pub fn from_env() -> Result<Arc<Self>, AiLlmError> {
        let svc = Self::new(config_gemini_generation()?, config_gemini_embedding()?)?;
        Ok(Arc::new(svc))
    }

    /// Generates text using the **generation** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.generation.generate(prompt).await
    }

    /// Computes an embedding using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed(&self, input: &str, task: EmbeddingTask) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embed(input, task).await
    }
}
