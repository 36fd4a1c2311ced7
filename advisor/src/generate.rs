//! Generation seam: object-safe trait over the hosted generation model.

use std::{future::Future, pin::Pin};

use ai_llm_service::LlmServiceProfiles;

use crate::error::AdvisorError;

/// Provider interface for natural-language generation.
///
/// Async because real providers perform HTTP requests. Implement this trait
/// to plug in your own generation backend (hosted API, local model, mock).
pub trait TextGenerator: Send + Sync {
    /// Submit a full prompt and return the generated text verbatim.
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AdvisorError>> + Send + 'a>>;
}

impl TextGenerator for LlmServiceProfiles {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AdvisorError>> + Send + 'a>> {
        Box::pin(async move { Ok(LlmServiceProfiles::generate(self, prompt).await?) })
    }
}
