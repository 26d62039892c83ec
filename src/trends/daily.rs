//! Daily trend calculations
//!
//! Buckets shipment records by the day they were logged.

use std::collections::HashMap;
use chrono::NaiveDate;

use super::DailyRecordTrend;
use crate::models::shipment::ShipmentRecord;
use crate::recommendations::engine::round2;

/// Parse a date string in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// Extract date from a stored timestamp
///
/// Handles formats like:
/// - "2026-02-05 10:30:00" (SQLite CURRENT_TIMESTAMP)
/// - "2026-02-05T10:30:00Z"
/// - "2026-02-05"
pub fn extract_date_from_timestamp(timestamp: &str) -> Option<String> {
    let date_part = timestamp.get(0..10)?;
    parse_date(date_part).map(|_| date_part.to_string())
}

/// Aggregate records by day, sorted by date ascending
///
/// Records whose timestamp has no parseable date are skipped.
pub fn aggregate_by_day(records: &[ShipmentRecord]) -> Vec<DailyRecordTrend> {
    let mut daily_map: HashMap<String, DailyRecordTrend> = HashMap::new();

    for record in records {
        if let Some(date) = extract_date_from_timestamp(&record.created_at) {
            let trend = daily_map.entry(date.clone())
                .or_insert_with(|| DailyRecordTrend::new(date));
            trend.add_record(record.weight, record.distance);
        }
    }

    let mut trends: Vec<DailyRecordTrend> = daily_map
        .into_values()
        .map(|mut trend| {
            trend.avg_weight = round2(trend.avg_weight);
            trend.avg_distance = round2(trend.avg_distance);
            trend
        })
        .collect();
    trends.sort_by(|a, b| a.date.cmp(&b.date));
    trends
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(weight: i64, distance: i64, created_at: &str) -> ShipmentRecord {
        ShipmentRecord {
            id: 0,
            weight,
            volume: 1,
            distance,
            priority: 1,
            road_available: true,
            rail_available: false,
            air_available: false,
            water_available: false,
            recommended_mode: Some("Road".to_string()),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_extract_date_from_timestamp() {
        assert_eq!(
            extract_date_from_timestamp("2026-02-05 10:30:00"),
            Some("2026-02-05".to_string())
        );
        assert_eq!(
            extract_date_from_timestamp("2026-02-05T10:30:00Z"),
            Some("2026-02-05".to_string())
        );
        assert_eq!(extract_date_from_timestamp("2026-02-05"), Some("2026-02-05".to_string()));
        assert_eq!(extract_date_from_timestamp("unknown"), None);
        assert_eq!(extract_date_from_timestamp(""), None);
    }

    #[test]
    fn test_aggregate_by_day() {
        let records = vec![
            record(100, 10, "2026-02-06 09:00:00"),
            record(200, 20, "2026-02-05 09:00:00"),
            record(400, 40, "2026-02-05 17:00:00"),
            record(999, 99, "not-a-date"),
        ];

        let trends = aggregate_by_day(&records);

        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].date, "2026-02-05");
        assert_eq!(trends[0].records, 2);
        assert_eq!(trends[0].avg_weight, 300.0);
        assert_eq!(trends[0].avg_distance, 30.0);
        assert_eq!(trends[1].date, "2026-02-06");
        assert_eq!(trends[1].records, 1);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_by_day(&[]).is_empty());
    }
}
