//! Hosted LLM access for the clinic advisor.
//!
//! A thin, non-streaming client for the Gemini REST API
//! (`generativelanguage.googleapis.com`) with two logical profiles:
//! **generation** (phrasing the recommendation) and **embedding**
//! (retrieval vectors). Configuration is strictly environment-driven;
//! the API key is validated before any network call is made.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError};
pub use service_profiles::LlmServiceProfiles;
pub use services::gemini_service::{EmbeddingTask, GeminiService};
