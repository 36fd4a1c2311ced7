//! CSV dataset reader.
//!
//! The source dataset is a CSV file with at least the two named columns
//! `semptom` (symptom text) and `poliklinik` (clinic name), one example per
//! row. Rows whose symptom field is missing, empty, or whitespace-only are
//! skipped silently; they are invalid examples, not errors.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::record::SymptomRow;

/// Raw CSV row shape. Both fields optional so short rows deserialize and can
/// be filtered instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "semptom")]
    symptom: Option<String>,
    #[serde(rename = "poliklinik")]
    clinic: Option<String>,
}

/// Reads and filters the dataset.
///
/// # Errors
/// - [`StoreError::Dataset`] if the file cannot be opened or contains no
///   data rows at all.
/// - [`StoreError::Csv`] if a row is structurally malformed.
///
/// A dataset where every row fails the symptom check yields an empty vector;
/// the caller decides whether that is fatal (it is, for indexing).
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Vec<SymptomRow>, StoreError> {
    let path = path.as_ref();
    info!("Reading symptom dataset: {:?}", path);

    let mut rdr = csv::Reader::from_path(path)
        .map_err(|e| StoreError::Dataset(format!("cannot read {}: {e}", path.display())))?;

    let mut rows = Vec::new();
    let mut total = 0usize;
    for result in rdr.deserialize::<RawRow>() {
        let raw = result?;
        total += 1;

        let symptom = match raw.symptom {
            Some(s) if !s.trim().is_empty() => s,
            _ => continue,
        };
        let clinic = raw.clinic.unwrap_or_default();

        rows.push(SymptomRow { symptom, clinic });
    }

    if total == 0 {
        return Err(StoreError::Dataset(format!(
            "{} was read but contains no rows",
            path.display()
        )));
    }

    debug!("Loaded {} valid rows out of {}", rows.len(), total);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn skips_empty_and_whitespace_symptoms() {
        let f = write_csv(
            "semptom,poliklinik\n\
             fever,Internal Medicine\n\
             ,Neurology\n\
             \"   \",Cardiology\n\
             cough,Pulmonology\n",
        );
        let rows = read_dataset(f.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symptom, "fever");
        assert_eq!(rows[0].clinic, "Internal Medicine");
        assert_eq!(rows[1].symptom, "cough");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = read_dataset("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, StoreError::Dataset(_)));
    }

    #[test]
    fn header_only_file_is_fatal() {
        let f = write_csv("semptom,poliklinik\n");
        let err = read_dataset(f.path()).unwrap_err();
        assert!(matches!(err, StoreError::Dataset(_)));
    }

    #[test]
    fn all_invalid_rows_yield_empty_vec() {
        let f = write_csv("semptom,poliklinik\n,Neurology\n\" \",ENT\n");
        let rows = read_dataset(f.path()).unwrap();
        assert!(rows.is_empty());
    }
}
