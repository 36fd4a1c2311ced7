//! Default model configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by role:
//!
//! - **Generation** → phrases the clinic recommendation
//! - **Embedding**  → retrieval vectors for indexing and querying
//!
//! # Environment variables
//!
//! Common:
//! - `GEMINI_API_KEY` = API key (mandatory; checked before any request)
//! - `GEMINI_URL`     = optional endpoint override
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! Role-specific:
//! - `GEMINI_MODEL`    = generation model (default `gemini-1.5-flash`)
//! - `EMBEDDING_MODEL` = embedding model (default `text-embedding-004`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, env_opt_u32, must_env},
};

/// Hosted API base used when `GEMINI_URL` is not set.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Resolves the API endpoint: `GEMINI_URL` if present, hosted default otherwise.
fn gemini_endpoint() -> String {
    std::env::var("GEMINI_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

/// Resolves an optional model override with a fallback name.
fn model_or(var: &str, fallback: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Constructs a config for the **generation** model.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `GEMINI_MODEL` (optional, default `gemini-1.5-flash`)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Errors
/// Returns [`AiLlmError::Config`] when the API key is missing or
/// `LLM_MAX_TOKENS` fails to parse.
pub fn config_gemini_generation() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        model: model_or("GEMINI_MODEL", "gemini-1.5-flash"),
        endpoint: gemini_endpoint(),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs a config for the **embedding** model.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `EMBEDDING_MODEL` (optional, default `text-embedding-004`)
///
/// # Errors
/// Returns [`AiLlmError::Config`] when the API key is missing.
pub fn config_gemini_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GEMINI_API_KEY")?;

    Ok(LlmModelConfig {
        model: model_or("EMBEDDING_MODEL", "text-embedding-004"),
        endpoint: gemini_endpoint(),
        api_key: Some(api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(30),
    })
}
