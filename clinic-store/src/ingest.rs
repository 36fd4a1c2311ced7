//! End-to-end indexing pipeline: read CSV → embed symptoms → upsert into Qdrant.
//!
//! The pipeline is idempotent: a collection that already holds points is
//! reused as-is, without issuing a single embedding call. Embedding is the
//! dominant cost, so progress is reported per row.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{StoreConfig, VectorSpace};
use crate::dataset::read_dataset;
use crate::embed::{EmbeddingMode, EmbeddingsProvider};
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{EmbeddedEntry, SymptomRow};

/// Result of one indexing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The collection was already populated; nothing was embedded or written.
    Reused {
        /// Number of points already present.
        points: u64,
    },
    /// The collection was (re)built from the dataset.
    Built {
        /// Rows successfully embedded and written.
        indexed: usize,
        /// Rows dropped because their embedding call failed.
        skipped: usize,
    },
}

/// What to do with the target collection before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RebuildDecision {
    /// Collection holds data; reuse it and skip the rebuild entirely.
    Reuse(u64),
    /// Collection exists but is empty; drop and recreate it.
    Recreate,
    /// Collection is absent; create it fresh.
    CreateFresh,
}

impl RebuildDecision {
    pub(crate) fn from_count(count: Option<u64>) -> Self {
        match count {
            Some(n) if n > 0 => RebuildDecision::Reuse(n),
            Some(_) => RebuildDecision::Recreate,
            None => RebuildDecision::CreateFresh,
        }
    }
}

/// Ensures the collection contains one indexed entry per valid dataset row.
///
/// # Errors
/// - [`StoreError::Dataset`] if the dataset is missing, unreadable, or empty
///   (raised before any embedding call).
/// - [`StoreError::NoValidDocuments`] if every row failed embedding.
/// - [`StoreError::Qdrant`] on collection failures.
///
/// Per-row embedding failures are logged and skipped, never fatal.
pub async fn ingest_dataset(
    cfg: &StoreConfig,
    dataset_path: impl AsRef<Path>,
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<IngestOutcome, StoreError> {
    // Dataset problems must surface before the first paid API call.
    let rows = read_dataset(dataset_path)?;

    match RebuildDecision::from_count(client.count().await?) {
        RebuildDecision::Reuse(points) => {
            info!(
                "Collection '{}' already holds {} entries, skipping rebuild",
                client.collection(),
                points
            );
            return Ok(IngestOutcome::Reused { points });
        }
        RebuildDecision::Recreate => {
            warn!(
                "Collection '{}' exists but is empty, rebuilding",
                client.collection()
            );
            client.delete_collection().await?;
        }
        RebuildDecision::CreateFresh => {}
    }

    client
        .create_collection(&VectorSpace {
            size: cfg.embedding_dim,
            distance: cfg.distance,
        })
        .await?;

    let (entries, skipped) = embed_rows(&rows, provider).await?;

    // Single batched write, chunked to keep request sizes bounded.
    let indexed = entries.len();
    let batch_size = cfg.upsert_batch.max(1);
    let points = build_points(&entries)?;
    for chunk in points.chunks(batch_size) {
        client.upsert_points(chunk.to_vec()).await?;
    }

    info!(
        "Indexed {} symptoms into '{}' ({} rows skipped)",
        indexed,
        client.collection(),
        skipped
    );
    Ok(IngestOutcome::Built { indexed, skipped })
}

/// Embeds each row in document mode, sequentially.
///
/// A failing row is reported with a warning and dropped; the batch never
/// aborts for one bad row. Returns [`StoreError::NoValidDocuments`] when no
/// row survives.
pub(crate) async fn embed_rows(
    rows: &[SymptomRow],
    provider: &dyn EmbeddingsProvider,
) -> Result<(Vec<EmbeddedEntry>, usize), StoreError> {
    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("##-"),
    );

    let mut entries = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (i, row) in rows.iter().enumerate() {
        match provider.embed(&row.symptom, EmbeddingMode::Document).await {
            Ok(vector) => entries.push(EmbeddedEntry {
                row_id: i.to_string(),
                vector,
                symptom: row.symptom.clone(),
                clinic: row.clinic.clone(),
            }),
            Err(e) => {
                warn!("Embedding failed for row {i} ('{}'): {e}, skipping", row.symptom);
                skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if entries.is_empty() {
        return Err(StoreError::NoValidDocuments);
    }
    Ok((entries, skipped))
}

/// Builds Qdrant points for the embedded entries.
///
/// Point ids must be UUIDs, so the row-position id is mapped through a
/// deterministic UUIDv5 and kept verbatim in the payload (`row_id`).
fn build_points(entries: &[EmbeddedEntry]) -> Result<Vec<PointStruct>, StoreError> {
    let mut points = Vec::with_capacity(entries.len());
    for e in entries {
        let payload = Payload::try_from(serde_json::json!({
            "row_id": e.row_id,
            "symptom": e.symptom,
            "clinic": e.clinic,
        }))
        .map_err(|err| StoreError::Qdrant(err.to_string()))?;

        points.push(PointStruct::new(
            stable_point_id(&e.row_id).to_string(),
            e.vector.clone(),
            payload,
        ));
    }
    Ok(points)
}

/// Deterministic UUIDv5 from the row-position id.
fn stable_point_id(row_id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, row_id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock provider that counts calls and fails on configured symptoms.
    struct CountingProvider {
        calls: AtomicUsize,
        fail_on: Vec<&'static str>,
    }

    impl CountingProvider {
        fn new(fail_on: Vec<&'static str>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on,
            }
        }
    }

    impl EmbeddingsProvider for CountingProvider {
        fn embed<'a>(
            &'a self,
            text: &'a str,
            _mode: EmbeddingMode,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if self.fail_on.contains(&text) {
                    Err(StoreError::Embedding("simulated outage".into()))
                } else {
                    Ok(vec![0.0, 1.0, 0.5])
                }
            })
        }
    }

    fn rows(specs: &[(&str, &str)]) -> Vec<SymptomRow> {
        specs
            .iter()
            .map(|(s, c)| SymptomRow {
                symptom: s.to_string(),
                clinic: c.to_string(),
            })
            .collect()
    }

    #[test]
    fn populated_collection_is_reused() {
        assert_eq!(
            RebuildDecision::from_count(Some(42)),
            RebuildDecision::Reuse(42)
        );
    }

    #[test]
    fn empty_collection_is_recreated() {
        assert_eq!(RebuildDecision::from_count(Some(0)), RebuildDecision::Recreate);
    }

    #[test]
    fn missing_collection_is_created_fresh() {
        assert_eq!(RebuildDecision::from_count(None), RebuildDecision::CreateFresh);
    }

    #[tokio::test]
    async fn embeds_one_entry_per_row_with_traceable_ids() {
        let provider = CountingProvider::new(vec![]);
        let input = rows(&[("fever", "Internal Medicine"), ("cough", "Pulmonology")]);

        let (entries, skipped) = embed_rows(&input, &provider).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(skipped, 0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(entries[0].row_id, "0");
        assert_eq!(entries[1].row_id, "1");
        assert_eq!(entries[1].clinic, "Pulmonology");
    }

    #[tokio::test]
    async fn failing_rows_are_skipped_not_fatal() {
        let provider = CountingProvider::new(vec!["cough"]);
        let input = rows(&[("fever", "Internal Medicine"), ("cough", "Pulmonology")]);

        let (entries, skipped) = embed_rows(&input, &provider).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(skipped, 1);
        assert_eq!(entries[0].symptom, "fever");
    }

    #[tokio::test]
    async fn all_rows_failing_is_fatal() {
        let provider = CountingProvider::new(vec!["fever", "cough"]);
        let input = rows(&[("fever", "Internal Medicine"), ("cough", "Pulmonology")]);

        let err = embed_rows(&input, &provider).await.unwrap_err();
        assert!(matches!(err, StoreError::NoValidDocuments));
    }

    #[test]
    fn point_ids_are_stable_and_unique_per_row() {
        assert_eq!(stable_point_id("7"), stable_point_id("7"));
        assert_ne!(stable_point_id("7"), stable_point_id("8"));
    }
}
