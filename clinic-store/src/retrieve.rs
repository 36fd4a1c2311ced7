//! Retrieval helpers: vector search and payload → hit mapping.

use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::value::Kind;
use tracing::{trace, warn};

use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::ClinicHit;

/// Performs a similarity search given a ready query vector and maps the
/// results into [`ClinicHit`]s, preserving the store's ranking.
///
/// # Errors
/// Returns [`StoreError::Qdrant`] on client failures.
pub async fn search_by_vector(
    client: &QdrantFacade,
    query_vector: Vec<f32>,
    top_k: u64,
) -> Result<Vec<ClinicHit>, StoreError> {
    trace!("retrieve::search_by_vector top_k={top_k}");

    let points = client.search(query_vector, top_k).await?;

    let mut out = Vec::with_capacity(points.len());
    for p in points {
        match to_hit(&p) {
            Some(hit) => out.push(hit),
            None => warn!("Dropping hit with malformed payload (id={:?})", p.id),
        }
    }

    trace!("retrieve::search_by_vector hits={}", out.len());
    Ok(out)
}

/// Extracts the symptom/clinic payload of a scored point.
///
/// A point without a symptom text is unusable for context composition and is
/// dropped by the caller.
fn to_hit(point: &ScoredPoint) -> Option<ClinicHit> {
    let symptom = payload_str(point, "symptom")?;
    let clinic = payload_str(point, "clinic").unwrap_or_default();
    Some(ClinicHit {
        score: point.score,
        symptom,
        clinic,
    })
}

fn payload_str(point: &ScoredPoint, key: &str) -> Option<String> {
    match point.payload.get(key).and_then(|v| v.kind.as_ref()) {
        Some(Kind::StringValue(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::Value;
    use std::collections::HashMap;

    fn point(score: f32, fields: &[(&str, &str)]) -> ScoredPoint {
        let payload: HashMap<String, Value> = fields
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    Value {
                        kind: Some(Kind::StringValue(v.to_string())),
                    },
                )
            })
            .collect();
        ScoredPoint {
            payload,
            score,
            ..Default::default()
        }
    }

    #[test]
    fn maps_payload_fields() {
        let p = point(0.91, &[("symptom", "fever"), ("clinic", "Internal Medicine")]);
        let hit = to_hit(&p).unwrap();
        assert_eq!(hit.symptom, "fever");
        assert_eq!(hit.clinic, "Internal Medicine");
        assert!((hit.score - 0.91).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_symptom_drops_the_hit() {
        let p = point(0.5, &[("clinic", "ENT")]);
        assert!(to_hit(&p).is_none());
    }

    #[test]
    fn missing_clinic_defaults_to_empty() {
        let p = point(0.5, &[("symptom", "sore throat")]);
        let hit = to_hit(&p).unwrap();
        assert_eq!(hit.clinic, "");
    }
}
