//! Record summary calculations
//!
//! Aggregates logged shipment records into headline statistics and a
//! mode distribution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::shipment::ShipmentRecord;
use crate::recommendations::engine::round2;

/// Distribution label for records without a recommended mode
pub const UNASSIGNED_MODE: &str = "Unassigned";

/// Share of records recommended a given mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeShare {
    pub mode: String,
    pub count: u32,
    /// Percentage of all records (0 - 100, 2 dp)
    pub share_pct: f64,
}

/// Headline statistics over a set of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub total_records: u32,
    /// Distinct recommended modes, excluding unassigned records
    pub unique_modes: u32,
    pub avg_weight: Option<f64>,
    pub avg_distance: Option<f64>,
    /// Sorted by count (highest first), then mode name
    pub mode_distribution: Vec<ModeShare>,
}

/// Summarize a set of records
pub fn summarize(records: &[ShipmentRecord]) -> RecordSummary {
    let distribution = mode_distribution(records);
    let unique_modes = distribution
        .iter()
        .filter(|share| share.mode != UNASSIGNED_MODE)
        .count() as u32;

    RecordSummary {
        total_records: records.len() as u32,
        unique_modes,
        avg_weight: average(records.iter().map(|r| r.weight)),
        avg_distance: average(records.iter().map(|r| r.distance)),
        mode_distribution: distribution,
    }
}

/// Count records per recommended mode
pub fn mode_distribution(records: &[ShipmentRecord]) -> Vec<ModeShare> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for record in records {
        let mode = record
            .recommended_mode
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(UNASSIGNED_MODE);
        *counts.entry(mode).or_insert(0) += 1;
    }

    let total = records.len() as f64;
    let mut shares: Vec<ModeShare> = counts
        .into_iter()
        .map(|(mode, count)| ModeShare {
            mode: mode.to_string(),
            count,
            share_pct: round2(count as f64 / total * 100.0),
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.mode.cmp(&b.mode)));
    shares
}

/// Mean of the values rounded to 2 dp, `None` when empty
pub fn average(values: impl Iterator<Item = i64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v as f64, count + 1));
    if count == 0 {
        None
    } else {
        Some(round2(sum / count as f64))
    }
}
