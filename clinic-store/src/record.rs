//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// One valid dataset row: a symptom description and the clinic that treats it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomRow {
    pub symptom: String,
    pub clinic: String,
}

/// A row that has been embedded and is ready for upsert.
///
/// `row_id` is the source row position as a string; every indexed entry is
/// traceable back to exactly one dataset row through it.
#[derive(Clone, Debug)]
pub struct EmbeddedEntry {
    pub row_id: String,
    pub vector: Vec<f32>,
    pub symptom: String,
    pub clinic: String,
}

/// A single retrieval hit, ranked by similarity score.
#[derive(Clone, Debug, PartialEq)]
pub struct ClinicHit {
    pub score: f32,
    pub symptom: String,
    pub clinic: String,
}
