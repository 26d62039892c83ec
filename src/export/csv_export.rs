//! CSV export functionality
//!
//! Provides CSV serialization for shipment records.

use std::io::Write;

use csv::Writer;

use crate::models::shipment::ShipmentRecord;
use crate::CommandError;

/// Column order of the CSV export
pub const CSV_HEADERS: [&str; 11] = [
    "id",
    "weight",
    "volume",
    "distance",
    "priority",
    "road_available",
    "rail_available",
    "air_available",
    "water_available",
    "recommended_mode",
    "created_at",
];

/// Write records as CSV (header row first) to any writer
pub fn write_records_csv<W: Write>(
    records: &[ShipmentRecord],
    output: W,
) -> Result<(), CommandError> {
    let mut writer = Writer::from_writer(output);

    // Serialized rows bring their own header; an empty export still gets one
    if records.is_empty() {
        writer
            .write_record(CSV_HEADERS)
            .map_err(|e| CommandError::Internal(format!("Failed to write CSV header: {}", e)))?;
    }

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| CommandError::Internal(format!("Failed to write CSV record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| CommandError::Internal(format!("Failed to flush CSV: {}", e)))?;

    Ok(())
}

/// Render records as a CSV document
pub fn records_to_csv(records: &[ShipmentRecord]) -> Result<String, CommandError> {
    let mut buffer = Vec::new();
    write_records_csv(records, &mut buffer)?;

    String::from_utf8(buffer)
        .map_err(|e| CommandError::Internal(format!("CSV output is not UTF-8: {}", e)))
}
