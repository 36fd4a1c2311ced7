//! High-level facade over the symptom→clinic vector collection.
//!
//! This crate provides a clean API to:
//! - Ingest a CSV dataset of symptom/clinic pairs into Qdrant, embedding
//!   each symptom with a pluggable provider
//! - Retrieve the top‑K most similar symptoms for a query vector
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules.

mod config;
mod dataset;
mod embed;
mod errors;
mod ingest;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::{DistanceKind, StoreConfig, VectorSpace};
pub use embed::{
    EmbeddingMode, EmbeddingsProvider,
    gemini::{GeminiEmbedder, GeminiEmbedderConfig},
};
pub use errors::StoreError;
pub use ingest::IngestOutcome;
pub use record::{ClinicHit, EmbeddedEntry, SymptomRow};

use std::path::Path;
use tracing::trace;

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct ClinicStore {
    cfg: StoreConfig,
    client: qdrant_facade::QdrantFacade,
}

impl ClinicStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Config` or `StoreError::Qdrant` if client
    /// initialization fails.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        trace!("ClinicStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Target collection name.
    pub fn collection(&self) -> &str {
        self.client.collection()
    }

    /// Number of indexed entries, or `None` when the collection is absent.
    pub async fn count(&self) -> Result<Option<u64>, StoreError> {
        self.client.count().await
    }

    /// Runs the indexing pipeline: one indexed entry per valid dataset row.
    ///
    /// Idempotent: an already-populated collection short-circuits the rebuild
    /// without issuing any embedding call.
    ///
    /// # Errors
    /// Returns errors on dataset I/O, total embedding failure, or Qdrant
    /// failures. Per-row embedding failures only skip the row.
    pub async fn ingest_dataset(
        &self,
        dataset_path: impl AsRef<Path>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<IngestOutcome, StoreError> {
        ingest::ingest_dataset(&self.cfg, dataset_path, provider, &self.client).await
    }

    /// Performs a similarity search for a ready query vector and returns the
    /// ranked hits.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if the search fails.
    pub async fn search_by_vector(
        &self,
        query_vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<ClinicHit>, StoreError> {
        trace!("ClinicStore::search_by_vector top_k={top_k}");
        retrieve::search_by_vector(&self.client, query_vector, top_k).await
    }
}
