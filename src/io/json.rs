//! JSON input loading.
//!
//! Documents are parsed in two steps so malformed JSON (`ErrorKind::Parse`)
//! stays distinguishable from well-formed JSON that lacks expected keys
//! (`ErrorKind::Schema`).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// Read and parse a JSON document without interpreting it.
pub fn load_json_value(path: &Path) -> Result<Value, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::parse(format!("Invalid JSON in '{}': {e}", path.display())))
}

/// Load a JSON document into a typed value.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let value = load_json_value(path)?;
    serde_json::from_value(value)
        .map_err(|e| AppError::schema(format!("Unexpected content in '{}': {e}", path.display())))
}

/// Load a JSON array, decoding every element as `T`.
///
/// The first element that does not decode fails the whole load; the error
/// names its index.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    let Value::Array(items) = load_json_value(path)? else {
        return Err(AppError::schema(format!(
            "Expected a JSON array in '{}'",
            path.display()
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value(item).map_err(|e| {
                AppError::schema(format!("Record {idx} in '{}': {e}", path.display()))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DonationRecord, RunSummary};
    use crate::error::ErrorKind;
    use std::fs;

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        fs::write(&path, "{\"label\": ").unwrap();

        let err = load_json::<RunSummary>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn missing_label_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        fs::write(&path, r#"{"date": "2021-04-01 09:30:00"}"#).unwrap();

        let err = load_json::<RunSummary>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json_value(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn bad_record_names_its_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("donations.json");
        fs::write(
            &path,
            r#"[
                {"bbDonorName":"A B","bbDonorId":"bb1","rdDonorId":"rd1","donation":{"amount":10},"rdDonationStatus":{"name":"matched"}},
                {"bbDonorName":"C D","rdDonorId":"rd2","donation":{"amount":5},"rdDonationStatus":{"name":"matched"}}
            ]"#,
        )
        .unwrap();

        let err = load_records::<DonationRecord>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("Record 1"));
        assert!(err.to_string().contains("bbDonorId"));
    }

    #[test]
    fn non_array_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("donations.json");
        fs::write(&path, "{}").unwrap();

        let err = load_records::<DonationRecord>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}
