/// Configuration for a hosted model invocation.
///
/// One instance describes one model binding (generation or embedding).
/// It can be extended as needed to support new parameters.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gemini-1.5-flash"`,
///   `"text-embedding-004"`).
/// - `endpoint`: API base URL (normally
///   `https://generativelanguage.googleapis.com`).
/// - `api_key`: API key used for authentication; required by the service.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"gemini-1.5-flash"`).
    pub model: String,

    /// API base URL.
    pub endpoint: String,

    /// API key for authentication. Validated at client construction.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
