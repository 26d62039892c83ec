//! Shipment record types
//!
//! Types for logged shipment records, independent of the recommendation engine.

use serde::{Deserialize, Serialize};

/// Stored shipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: i64,
    pub weight: i64,
    pub volume: i64,
    pub distance: i64,
    pub priority: i64,
    #[serde(with = "flag")]
    pub road_available: bool,
    #[serde(with = "flag")]
    pub rail_available: bool,
    #[serde(with = "flag")]
    pub air_available: bool,
    #[serde(with = "flag")]
    pub water_available: bool,
    pub recommended_mode: Option<String>,
    pub created_at: String,
}

/// Payload for logging a new shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShipment {
    pub weight: i64,
    pub volume: i64,
    pub distance: i64,
    pub priority: i64,
    #[serde(with = "flag")]
    pub road_available: bool,
    #[serde(with = "flag")]
    pub rail_available: bool,
    #[serde(with = "flag")]
    pub air_available: bool,
    #[serde(with = "flag")]
    pub water_available: bool,
    #[serde(default)]
    pub recommended_mode: Option<String>,
}

/// Filter options for record queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Comma-separated recommended modes to keep (exact match)
    pub modes: Option<String>,
    pub min_weight: Option<i64>,
    pub max_weight: Option<i64>,
    pub min_distance: Option<i64>,
    pub max_distance: Option<i64>,
    /// Inclusive start date (YYYY-MM-DD) on `created_at`
    pub start_date: Option<String>,
    /// Inclusive end date (YYYY-MM-DD) on `created_at`
    pub end_date: Option<String>,
    /// Case-insensitive text search over textual fields
    pub search: Option<String>,
}

impl RecordFilter {
    /// Parsed list of requested modes, `None` when no mode filter applies
    pub fn mode_list(&self) -> Option<Vec<String>> {
        let modes: Vec<String> = self
            .modes
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();

        if modes.is_empty() {
            None
        } else {
            Some(modes)
        }
    }

    /// Search text, ignoring blank input
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Search text with ASCII letters folded to lowercase
    ///
    /// Non-ASCII characters are matched as typed, the same way SQLite's
    /// `lower()` treats them.
    pub fn search_needle(&self) -> Option<String> {
        self.search_text().map(str::to_ascii_lowercase)
    }

    /// Check a record against every filter that is set
    pub fn matches(&self, record: &ShipmentRecord) -> bool {
        if let Some(modes) = self.mode_list() {
            match &record.recommended_mode {
                Some(mode) if modes.iter().any(|m| m == mode) => {}
                _ => return false,
            }
        }

        if self.min_weight.is_some_and(|min| record.weight < min)
            || self.max_weight.is_some_and(|max| record.weight > max)
            || self.min_distance.is_some_and(|min| record.distance < min)
            || self.max_distance.is_some_and(|max| record.distance > max)
        {
            return false;
        }

        let date = record.created_at.get(..10).unwrap_or(record.created_at.as_str());
        if let Some(start) = &self.start_date {
            if date < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end_date {
            if date > end.as_str() {
                return false;
            }
        }

        if let Some(needle) = self.search_needle() {
            let found = record
                .recommended_mode
                .as_deref()
                .is_some_and(|m| m.to_ascii_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        true
    }
}

/// Availability flags travel as integers (0/1); any non-zero integer or a
/// JSON boolean is accepted on input.
pub mod flag {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlagVisitor)
    }

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer-like availability flag")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            if v.is_finite() && v.fract() == 0.0 {
                Ok(v != 0.0)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            v.trim()
                .parse::<i64>()
                .map(|n| n != 0)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> ShipmentRecord {
        ShipmentRecord {
            id: 1,
            weight: 250,
            volume: 40,
            distance: 800,
            priority: 3,
            road_available: true,
            rail_available: false,
            air_available: true,
            water_available: false,
            recommended_mode: Some("Rail".to_string()),
            created_at: "2026-03-14 09:30:00".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_flags_as_integers() {
        let json = serde_json::to_value(create_test_record()).unwrap();

        assert_eq!(json["road_available"], 1);
        assert_eq!(json["rail_available"], 0);
        assert_eq!(json["recommended_mode"], "Rail");
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn test_new_shipment_accepts_integer_like_flags() {
        let shipment: NewShipment = serde_json::from_str(
            r#"{"weight": 10, "volume": 2, "distance": 30, "priority": 1,
                "road_available": 1, "rail_available": 0,
                "air_available": true, "water_available": 7}"#,
        )
        .unwrap();

        assert!(shipment.road_available);
        assert!(!shipment.rail_available);
        assert!(shipment.air_available);
        assert!(shipment.water_available);
        assert_eq!(shipment.recommended_mode, None);
    }

    #[test]
    fn test_new_shipment_rejects_non_numeric_flag() {
        let result: Result<NewShipment, _> = serde_json::from_str(
            r#"{"weight": 10, "volume": 2, "distance": 30, "priority": 1,
                "road_available": "yes", "rail_available": 0,
                "air_available": 0, "water_available": 0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_shipment_accepts_integral_float_flags() {
        let shipment: NewShipment = serde_json::from_str(
            r#"{"weight": 10, "volume": 2, "distance": 30, "priority": 1,
                "road_available": 1.0, "rail_available": 0.0,
                "air_available": -2.0, "water_available": 0}"#,
        )
        .unwrap();

        assert!(shipment.road_available);
        assert!(!shipment.rail_available);
        assert!(shipment.air_available);
        assert!(!shipment.water_available);
    }

    #[test]
    fn test_new_shipment_rejects_fractional_flag() {
        let result: Result<NewShipment, _> = serde_json::from_str(
            r#"{"weight": 10, "volume": 2, "distance": 30, "priority": 1,
                "road_available": 0.5, "rail_available": 0,
                "air_available": 0, "water_available": 0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_search_folds_ascii_only() {
        let record = ShipmentRecord {
            recommended_mode: Some("Überland".to_string()),
            ..create_test_record()
        };
        let exact = RecordFilter {
            search: Some("ÜBERLAND".to_string()),
            ..Default::default()
        };
        let folded = RecordFilter {
            search: Some("überland".to_string()),
            ..Default::default()
        };

        assert_eq!(exact.search_needle().as_deref(), Some("Überland"));
        assert!(exact.matches(&record));
        assert!(!folded.matches(&record));
    }

    #[test]
    fn test_mode_list_parsing() {
        let filter = RecordFilter {
            modes: Some(" Road, Air ,,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter.mode_list(),
            Some(vec!["Road".to_string(), "Air".to_string()])
        );

        let blank = RecordFilter {
            modes: Some(" , ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.mode_list(), None);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(RecordFilter::default().matches(&create_test_record()));
    }

    #[test]
    fn test_filter_by_mode() {
        let record = create_test_record();
        let rail = RecordFilter {
            modes: Some("Rail,Water".to_string()),
            ..Default::default()
        };
        let road = RecordFilter {
            modes: Some("Road".to_string()),
            ..Default::default()
        };

        assert!(rail.matches(&record));
        assert!(!road.matches(&record));

        let unassigned = ShipmentRecord {
            recommended_mode: None,
            ..record
        };
        assert!(!rail.matches(&unassigned));
    }

    #[test]
    fn test_filter_by_ranges_is_inclusive() {
        let record = create_test_record();
        let filter = RecordFilter {
            min_weight: Some(250),
            max_weight: Some(250),
            min_distance: Some(100),
            max_distance: Some(800),
            ..Default::default()
        };
        assert!(filter.matches(&record));

        let too_far = RecordFilter {
            max_distance: Some(799),
            ..Default::default()
        };
        assert!(!too_far.matches(&record));
    }

    #[test]
    fn test_filter_by_date_range() {
        let record = create_test_record();
        let inside = RecordFilter {
            start_date: Some("2026-03-14".to_string()),
            end_date: Some("2026-03-14".to_string()),
            ..Default::default()
        };
        let after = RecordFilter {
            start_date: Some("2026-03-15".to_string()),
            ..Default::default()
        };

        assert!(inside.matches(&record));
        assert!(!after.matches(&record));
    }

    #[test]
    fn test_filter_by_search_text() {
        let record = create_test_record();
        let hit = RecordFilter {
            search: Some("rai".to_string()),
            ..Default::default()
        };
        let miss = RecordFilter {
            search: Some("water".to_string()),
            ..Default::default()
        };
        let blank = RecordFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };

        assert!(hit.matches(&record));
        assert!(!miss.matches(&record));
        assert!(blank.matches(&record));
    }
}
