//! Retrieve-then-generate pipeline for clinic recommendations.
//!
//! Public entry point: [`Advisor::recommend`]. It embeds the question in
//! query mode, retrieves the top-K most similar known symptoms from the
//! clinic store, composes a context block, and asks the hosted generation
//! model to phrase the recommendation. Failures degrade into fixed fallback
//! messages; the surface never panics or leaks raw errors.

mod error;
mod generate;
mod prompt;
mod recommend;

pub use error::AdvisorError;
pub use generate::TextGenerator;
pub use prompt::{build_prompt, compose_context};
pub use recommend::{
    Advisor, ContextSource, DEFAULT_TOP_K, FALLBACK_FAILURE, FALLBACK_NO_MATCH,
};
