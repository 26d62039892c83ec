//! Record metrics module
//!
//! Summary statistics over logged shipment records.

pub mod summary;

pub use summary::{mode_distribution, summarize, ModeShare, RecordSummary};
