//! Data models module
//!
//! Contains the data structures shared by the store, analytics and export:
//! - Shipment record types
//! - Record filter options

pub mod shipment;

pub use shipment::{NewShipment, RecordFilter, ShipmentRecord};
