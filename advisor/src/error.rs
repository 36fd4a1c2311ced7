//! Typed error for the advisor crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Errors from the underlying clinic-store crate.
    #[error("store error: {0}")]
    Store(#[from] clinic_store::StoreError),

    /// Errors from the hosted LLM service.
    #[error("llm error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),
}
