//! Recommendation types
//!
//! Data structures for shipment inputs, per-mode estimates and the final
//! mode recommendation.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Transport mode
///
/// Declaration order is the fixed evaluation order: it drives the order of
/// the comparison table, the justification lines and score tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    Road,
    Rail,
    Air,
    Water,
}

impl TransportMode {
    /// All modes in evaluation order
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Road,
        TransportMode::Rail,
        TransportMode::Air,
        TransportMode::Water,
    ];

    /// Get display label for the mode
    pub fn label(&self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Rail => "Rail",
            Self::Air => "Air",
            Self::Water => "Water",
        }
    }

    /// Get the fixed cost/speed/emission characteristics of this mode
    pub fn profile(&self) -> &'static ModeProfile {
        &MODE_PROFILES[*self as usize]
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed characteristics of a transport mode
#[derive(Debug, Clone, PartialEq)]
pub struct ModeProfile {
    pub mode: TransportMode,
    /// Cost units per kilometre (scaled by load)
    pub cost_per_km: f64,
    /// Average speed in km/h
    pub avg_speed_kmph: f64,
    /// Emissions in kg CO₂ per km per ton
    pub co2_per_km_per_ton: f64,
}

/// Mode characteristics, indexed by `TransportMode as usize`
static MODE_PROFILES: [ModeProfile; 4] = [
    ModeProfile {
        mode: TransportMode::Road,
        cost_per_km: 5.0,
        avg_speed_kmph: 60.0,
        co2_per_km_per_ton: 0.2,
    },
    ModeProfile {
        mode: TransportMode::Rail,
        cost_per_km: 3.0,
        avg_speed_kmph: 80.0,
        co2_per_km_per_ton: 0.05,
    },
    ModeProfile {
        mode: TransportMode::Air,
        cost_per_km: 10.0,
        avg_speed_kmph: 600.0,
        co2_per_km_per_ton: 0.5,
    },
    ModeProfile {
        mode: TransportMode::Water,
        cost_per_km: 2.0,
        avg_speed_kmph: 30.0,
        co2_per_km_per_ton: 0.02,
    },
];

/// Shipment attributes the engine decides on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Weight in kilograms
    pub weight: i64,
    /// Volume in cubic metres
    pub volume: i64,
    /// Distance in kilometres
    pub distance: i64,
    /// Priority, nominally 1 (low) to 5 (high)
    pub priority: i64,
    pub road_available: bool,
    pub rail_available: bool,
    pub air_available: bool,
    pub water_available: bool,
}

impl ShipmentRequest {
    /// Whether the given mode is physically available for this shipment
    pub fn is_available(&self, mode: TransportMode) -> bool {
        match mode {
            TransportMode::Road => self.road_available,
            TransportMode::Rail => self.rail_available,
            TransportMode::Air => self.air_available,
            TransportMode::Water => self.water_available,
        }
    }

    /// Available modes in evaluation order
    pub fn available_modes(&self) -> Vec<TransportMode> {
        TransportMode::ALL
            .into_iter()
            .filter(|m| self.is_available(*m))
            .collect()
    }
}

/// Cost, time and emission estimate for one mode (each rounded to 2 dp)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeMetrics {
    pub estimated_cost: f64,
    pub time_hours: f64,
    pub co2_kg: f64,
}

/// Per-mode estimates kept in evaluation order
///
/// Serializes as a JSON object keyed by mode label, preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeComparison {
    entries: Vec<(TransportMode, ModeMetrics)>,
}

impl ModeComparison {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. A mode already present is replaced in place.
    pub fn insert(&mut self, mode: TransportMode, metrics: ModeMetrics) {
        match self.entries.iter_mut().find(|(m, _)| *m == mode) {
            Some(entry) => entry.1 = metrics,
            None => self.entries.push((mode, metrics)),
        }
    }

    pub fn get(&self, mode: TransportMode) -> Option<&ModeMetrics> {
        self.entries
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, metrics)| metrics)
    }

    pub fn contains(&self, mode: TransportMode) -> bool {
        self.get(mode).is_some()
    }

    pub fn modes(&self) -> impl Iterator<Item = TransportMode> + '_ {
        self.entries.iter().map(|(m, _)| *m)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TransportMode, ModeMetrics)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ModeComparison {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (mode, metrics) in &self.entries {
            map.serialize_entry(mode.label(), metrics)?;
        }
        map.end()
    }
}

/// The mode chosen by the engine, or none when nothing is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendedMode {
    Mode(TransportMode),
    None,
}

impl RecommendedMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mode(mode) => mode.label(),
            Self::None => "None",
        }
    }

    pub fn mode(&self) -> Option<TransportMode> {
        match self {
            Self::Mode(mode) => Some(*mode),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for RecommendedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RecommendedMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Engine output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Chosen mode
    pub recommended_mode: RecommendedMode,
    /// One line per compared mode, then a closing summary line
    pub justification: Vec<String>,
    /// Per-mode estimates for every available mode
    pub comparison: ModeComparison,
}
