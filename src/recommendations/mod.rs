//! Recommendations module
//!
//! Deterministic transport mode recommendation: per-mode cost, time and
//! emission estimates scored under a priority-weighted policy.

pub mod engine;
pub mod types;

// Re-export commonly used types
pub use engine::recommend;
pub use types::{
    ModeComparison, ModeMetrics, RecommendationResult, RecommendedMode, ShipmentRequest,
    TransportMode,
};
