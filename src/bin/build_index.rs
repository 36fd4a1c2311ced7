//! Offline index builder.
//!
//! Reads the symptom CSV, embeds every valid row in document mode, and loads
//! the vectors into the persistent collection. Safe to re-run: a populated
//! collection is reused without issuing any embedding call.

use ai_llm_service::LlmServiceProfiles;
use clinic_store::{ClinicStore, GeminiEmbedder, GeminiEmbedderConfig, IngestOutcome, StoreConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let svc = LlmServiceProfiles::from_env()?;

    let cfg = StoreConfig::from_env();
    let embedder = GeminiEmbedder::new(GeminiEmbedderConfig {
        svc,
        dim: cfg.embedding_dim,
    });
    let store = ClinicStore::new(cfg)?;

    let dataset = std::env::var("DATASET_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "data/semptom_veri_seti.csv".to_string());

    match store.ingest_dataset(&dataset, &embedder).await? {
        IngestOutcome::Reused { points } => info!(
            "Collection '{}' already holds {} entries; nothing to do",
            store.collection(),
            points
        ),
        IngestOutcome::Built { indexed, skipped } => info!(
            "Indexed {} symptoms into '{}' ({} rows skipped)",
            indexed,
            store.collection(),
            skipped
        ),
    }

    Ok(())
}
