//! Patient record - what the details editor saves and reloads
//!
//! Stored as pretty JSON so it can be diffed and edited by hand.

use super::group::TermRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A gene as stored with the patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneEntry {
    pub id: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub saved_at: DateTime<Local>,
    #[serde(default)]
    pub cancers: Vec<TermRecord>,
    #[serde(default)]
    pub genes: Vec<GeneEntry>,
}

impl PatientRecord {
    pub fn new(cancers: Vec<TermRecord>, genes: Vec<GeneEntry>) -> Self {
        Self {
            saved_at: Local::now(),
            cancers,
            genes,
        }
    }

    /// Stored record of one cancer term
    pub fn cancer(&self, id: &str) -> Option<&TermRecord> {
        self.cancers.iter().find(|c| c.id == id)
    }

    /// Load a record, `Ok(None)` when the file does not exist yet
    pub fn load_from(path: &Path) -> anyhow::Result<Option<PatientRecord>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        tracing::info!(path = %path.display(), cancers = self.cancers.len(), "patient record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::qualifier::QualifierValues;

    fn sample() -> PatientRecord {
        PatientRecord::new(
            vec![TermRecord {
                id: "HP:0100013".to_string(),
                label: "Breast".to_string(),
                affected: true,
                qualifiers: vec![QualifierValues::from([
                    ("ageAtDiagnosis".to_string(), "before_50".to_string()),
                    ("notes".to_string(), "left".to_string()),
                ])],
            }],
            vec![GeneEntry {
                id: "ENSG00000169181".to_string(),
                symbol: "GSG1L".to_string(),
            }],
        )
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("patient.json");

        let record = sample();
        record.save_to(&path).unwrap();
        let loaded = PatientRecord::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, record);
        assert!(loaded.cancer("HP:0100013").is_some());
        assert!(loaded.cancer("HP:0100526").is_none());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = PatientRecord::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_record_without_qualifiers_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patient.json");
        fs::write(
            &path,
            r#"{"saved_at":"2024-01-01T10:00:00+00:00","cancers":[{"id":"HP:0100526","label":"Lung"}]}"#,
        )
        .unwrap();

        let loaded = PatientRecord::load_from(&path).unwrap().unwrap();
        assert!(!loaded.cancers[0].affected);
        assert!(loaded.cancers[0].qualifiers.is_empty());
        assert!(loaded.genes.is_empty());
    }
}
