//! JSON export functionality
//!
//! Provides JSON serialization for shipment records with a summary block.

use serde::Serialize;

use crate::metrics::summary::{summarize, RecordSummary};
use crate::models::shipment::ShipmentRecord;
use crate::CommandError;

/// Version tag of the JSON export layout
pub const EXPORT_VERSION: &str = "1.0";

/// Complete export structure for JSON
#[derive(Debug, Clone, Serialize)]
pub struct RecordsExportJson {
    pub export_date: String,
    pub export_version: &'static str,
    pub total_records: usize,
    pub records: Vec<ShipmentRecord>,
    pub summary: RecordSummary,
}

impl RecordsExportJson {
    /// Build an export document for the given records
    pub fn new(records: Vec<ShipmentRecord>) -> Self {
        let summary = summarize(&records);
        Self {
            export_date: chrono::Utc::now().to_rfc3339(),
            export_version: EXPORT_VERSION,
            total_records: records.len(),
            records,
            summary,
        }
    }
}

/// Render records as a pretty-printed JSON export document
pub fn records_to_json(records: Vec<ShipmentRecord>) -> Result<String, CommandError> {
    let export = RecordsExportJson::new(records);

    serde_json::to_string_pretty(&export)
        .map_err(|e| CommandError::Internal(format!("Failed to serialize JSON: {}", e)))
}
