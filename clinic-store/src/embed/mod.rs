use crate::errors::StoreError;
use std::{future::Future, pin::Pin};

/// Representation mode requested from the embedding backend.
///
/// Corpus documents and user queries are embedded differently by hosted
/// models; the indexer always uses [`EmbeddingMode::Document`], the query
/// pipeline always uses [`EmbeddingMode::Query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbeddingMode {
    /// Indexing a corpus document.
    Document,
    /// Embedding a user question for retrieval.
    Query,
}

/// Provider interface for embedding generation.
///
/// Async because real providers perform HTTP requests. Implement this trait
/// to plug in your own embedding backend (hosted API, local model, mock).
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
        mode: EmbeddingMode,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;
}

pub mod gemini;
