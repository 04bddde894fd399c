//! # JSON Order Files
//!
//! Encodes orders as pretty-printed JSON (4-space indent, non-ASCII kept as
//! is) and writes them atomically.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JsonStore::save(record)                                                │
//! │       │                                                                 │
//! │       ├── stamp saved_at = now                                          │
//! │       ├── to_json_bytes(record)                                         │
//! │       ├── create parent directory                                       │
//! │       ├── write + fsync a temp file next to the target                 │
//! │       └── persist temp file over data/orders.json                      │
//! │                                                                         │
//! │  A crash mid-save leaves the previous file intact.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use tally_core::validation::normalize_order_name;
use tally_core::OrderRecord;

use crate::error::{StoreError, StoreResult};

const INDENT: &[u8] = b"    ";

// =============================================================================
// Pure Encode / Decode
// =============================================================================

/// Serializes a record to pretty JSON bytes.
pub fn to_json_bytes(record: &OrderRecord) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut ser)?;
    Ok(buf)
}

/// Decodes and checks a record.
///
/// ## Rules
/// - `order_name` and `items` are required; every item needs all four fields
/// - Blank `order_name` is normalized to `"Order"`
/// - Negative or non-finite numbers reject the whole record
pub fn from_json_bytes(bytes: &[u8]) -> StoreResult<OrderRecord> {
    let mut record: OrderRecord = serde_json::from_slice(bytes)?;
    record.order_name = normalize_order_name(&record.order_name);
    record.validate()?;
    Ok(record)
}

// =============================================================================
// File Store
// =============================================================================

/// A single JSON order file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store bound to `path`. Nothing is touched until save/load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the record, replacing any previous file.
    ///
    /// The written copy carries a fresh `saved_at`; the caller's record is
    /// not modified.
    pub fn save(&self, record: &OrderRecord) -> StoreResult<()> {
        let stamped = OrderRecord {
            saved_at: Some(Utc::now()),
            ..record.clone()
        };
        let bytes = to_json_bytes(&stamped)?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.flush())
            .and_then(|_| tmp.as_file_mut().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;

        // rename over the target; the old file stays until this succeeds
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        info!(
            path = %self.path.display(),
            items = record.items.len(),
            "Order saved"
        );
        Ok(())
    }

    /// Reads and decodes the file.
    pub fn load(&self) -> StoreResult<OrderRecord> {
        let bytes = fs::read(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read order file");

        let record = from_json_bytes(&bytes)?;
        info!(
            path = %self.path.display(),
            order_name = %record.order_name,
            items = record.items.len(),
            "Order loaded"
        );
        Ok(record)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::LineItem;

    fn sample() -> OrderRecord {
        OrderRecord::new(
            "Kavárna",
            vec![
                LineItem::new("Espresso", 2.0, 45.0, 21.0),
                LineItem::new("Croissant", 1.0, 39.5, 12.0),
            ],
        )
    }

    #[test]
    fn test_json_uses_four_space_indent_and_keeps_unicode() {
        let bytes = to_json_bytes(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\n    \"order_name\": \"Kavárna\""));
        assert!(text.contains("\n        {"));
    }

    #[test]
    fn test_decode_accepts_files_without_saved_at() {
        let json = br#"{
            "order_name": "Order",
            "items": [{"name": "Pen", "quantity": 3, "unit_price": 10, "vat_rate": 21}]
        }"#;
        let record = from_json_bytes(json).unwrap();

        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].quantity, 3.0);
        assert!(record.saved_at.is_none());
    }

    #[test]
    fn test_decode_normalizes_blank_name() {
        let json = br#"{"order_name": "   ", "items": []}"#;
        assert_eq!(from_json_bytes(json).unwrap().order_name, "Order");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(
            from_json_bytes(b"{not json"),
            Err(StoreError::Parse(_))
        ));

        let missing_field = br#"{"order_name": "x", "items": [{"name": "Pen", "quantity": 1}]}"#;
        assert!(matches!(
            from_json_bytes(missing_field),
            Err(StoreError::Parse(_))
        ));

        let negative = br#"{"order_name": "x", "items": [
            {"name": "Pen", "quantity": 1, "unit_price": -2, "vat_rate": 0}
        ]}"#;
        assert!(matches!(
            from_json_bytes(negative),
            Err(StoreError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested").join("orders.json"));

        store.save(&sample()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.order_name, "Kavárna");
        assert_eq!(loaded.items, sample().items);
        assert!(loaded.saved_at.is_some());
    }

    #[test]
    fn test_save_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("orders.json"));

        store.save(&sample()).unwrap();
        store.save(&OrderRecord::new("Empty", Vec::new())).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.order_name, "Empty");
        assert!(loaded.items.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("absent.json"));

        assert!(matches!(store.load(), Err(StoreError::NotFound(_))));
    }
}
