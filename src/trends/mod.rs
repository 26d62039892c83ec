//! Trend analysis module
//!
//! Per-day aggregation of logged shipment records for time-series views.

pub mod daily;

use serde::{Deserialize, Serialize};

pub use daily::aggregate_by_day;

/// Represents a single day's aggregated records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecordTrend {
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Number of records logged on this day
    pub records: u32,
    /// Average shipment weight (kg)
    pub avg_weight: f64,
    /// Average shipment distance (km)
    pub avg_distance: f64,
}

impl DailyRecordTrend {
    /// Create a new empty DailyRecordTrend for a given date
    pub fn new(date: String) -> Self {
        Self {
            date,
            records: 0,
            avg_weight: 0.0,
            avg_distance: 0.0,
        }
    }

    /// Add one record to this day's trend
    pub fn add_record(&mut self, weight: i64, distance: i64) {
        let prev_weight = self.avg_weight * self.records as f64;
        let prev_distance = self.avg_distance * self.records as f64;
        self.records += 1;
        // Running averages
        self.avg_weight = (prev_weight + weight as f64) / self.records as f64;
        self.avg_distance = (prev_distance + distance as f64) / self.records as f64;
    }
}
