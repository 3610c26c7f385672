//! JSON encoding of the review map.
//! The same blob format is used for the persisted copy and for file backups.

use crate::error::Result;
use crate::models::ReviewMap;
use std::fs;
use std::path::Path;

/// Serializes the whole map as one JSON object keyed by item id.
pub fn encode_snapshot(snapshot: &ReviewMap) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Parses a blob produced by [`encode_snapshot`] (or by the original web store).
pub fn decode_snapshot(blob: &str) -> Result<ReviewMap> {
    Ok(serde_json::from_str(blob)?)
}

/// Writes a pretty-printed backup of the map to `path`.
pub fn export_json_to_path<P: AsRef<Path>>(snapshot: &ReviewMap, path: P) -> Result<()> {
    let json_string = serde_json::to_string_pretty(snapshot)?;
    fs::write(path.as_ref(), json_string)?;
    tracing::info!(
        items = snapshot.len(),
        path = %path.as_ref().display(),
        "Exported review data"
    );
    Ok(())
}

/// Reads a backup written by [`export_json_to_path`].
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json<P: AsRef<Path>>(path: P) -> Result<ReviewMap> {
    let contents = fs::read_to_string(path.as_ref())?;
    let snapshot = decode_snapshot(&contents)?;
    tracing::info!(
        items = snapshot.len(),
        path = %path.as_ref().display(),
        "Imported review data"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SrsError;
    use crate::models::ReviewState;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::tempdir;

    fn create_test_snapshot() -> ReviewMap {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
        let mut snapshot = ReviewMap::new();
        snapshot.insert("你好".to_string(), ReviewState::new(now));
        snapshot.insert(
            "谢谢".to_string(),
            ReviewState {
                interval: 6,
                repetition: 2,
                efactor: 2.36,
                due_date: now + Duration::days(6),
            },
        );
        snapshot
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = create_test_snapshot();
        let blob = encode_snapshot(&original).unwrap();
        let decoded = decode_snapshot(&blob).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn test_decode_blob_from_web_store() {
        let blob = r#"{
  "学": {"interval": 1, "repetition": 1, "efactor": 2.5, "dueDate": "2024-06-01T12:01:00.000Z"},
  "生": {"interval": 0, "repetition": 0, "efactor": 2.5, "dueDate": "2024-06-01T12:00:00.000Z"}
}"#;

        let snapshot = decode_snapshot(blob).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["学"].repetition, 1);
        assert_eq!(
            snapshot["生"].due_date,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_empty_object() {
        assert!(decode_snapshot("{}").unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode_snapshot("{ this is not valid json }");
        assert!(matches!(result, Err(SrsError::Serialization(_))));

        // Valid JSON, wrong shape
        assert!(decode_snapshot(r#"{"a": {"interval": "soon"}}"#).is_err());
    }

    #[test]
    fn test_export_and_import_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let original = create_test_snapshot();

        export_json_to_path(&original, &path).unwrap();
        assert!(path.exists(), "File should exist");

        let imported = import_json(&path).unwrap();
        assert_eq!(original, imported);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_json("nonexistent_file_xyz123.json");
        assert!(matches!(result, Err(SrsError::Io(_))));
    }
}
