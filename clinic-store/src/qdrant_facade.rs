//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! application decoupled from `qdrant-client`.

use crate::config::{DistanceKind, StoreConfig, VectorSpace};
use crate::errors::StoreError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, ScoredPoint, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use tracing::{debug, info, warn};

/// A facade over the Qdrant client to keep the rest of the code clean and stable.
///
/// This struct encapsulates:
/// - The underlying Qdrant client.
/// - The target collection name.
/// - The distance function used in the vector space.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the builder-based API of `qdrant-client` and supports optional
    /// API key authentication.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?; // Early validation of config.

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
        })
    }

    /// Target collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the number of stored points, or `None` if the collection does
    /// not exist (or cannot be reached, which the caller treats the same way:
    /// it will surface on the next write).
    pub async fn count(&self) -> Result<Option<u64>, StoreError> {
        match self.client.collection_info(&self.collection).await {
            Ok(info) => {
                let points = info.result.and_then(|r| r.points_count).unwrap_or(0);
                debug!("Collection '{}' holds {} points", self.collection, points);
                Ok(Some(points))
            }
            Err(err) => {
                warn!(
                    "Collection '{}' not available (error={})",
                    self.collection, err
                );
                Ok(None)
            }
        }
    }

    /// Creates the collection with the given vector space configuration.
    ///
    /// The caller is responsible for deleting a stale collection first; this
    /// call assumes the name is free.
    pub async fn create_collection(&self, space: &VectorSpace) -> Result<(), StoreError> {
        info!(
            "Creating collection '{}' with size={} distance={:?}",
            self.collection, space.size, self.distance
        );

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(space.size as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }

    /// Drops the collection. Used when an existing collection turns out to be
    /// empty or unusable and must be rebuilt.
    pub async fn delete_collection(&self) -> Result<(), StoreError> {
        warn!("Deleting collection '{}'", self.collection);
        self.client
            .delete_collection(self.collection.as_str())
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;
        Ok(())
    }

    /// Upserts (inserts or updates) a batch of points into the collection.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<(), StoreError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(());
        }

        info!(
            "Upserting {} points into collection '{}'",
            points.len(),
            self.collection
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(())
    }

    /// Performs a similarity search and returns raw scored points sorted by
    /// score. Ranking and tie-breaking are the store's responsibility; this
    /// crate does not re-rank.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<ScoredPoint>, StoreError> {
        debug!(
            "Searching in '{}' with top_k={}",
            self.collection, top_k
        );

        let res = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        debug!("Search completed: {} hits returned", res.result.len());
        Ok(res.result)
    }
}
