//! HTTP command handlers
//!
//! All API endpoints exposed to clients. Handlers coerce raw request
//! parameters into the typed engine and store contracts and shape the
//! JSON responses.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::queries;
use crate::export::{csv_export, generate_export_filename, json_export, ExportFormat};
use crate::metrics::summary::{summarize, RecordSummary};
use crate::models::shipment::{NewShipment, RecordFilter, ShipmentRecord};
use crate::recommendations::{recommend, RecommendationResult, ShipmentRequest};
use crate::trends::daily::parse_date;
use crate::trends::{aggregate_by_day, DailyRecordTrend};
use crate::AppState;
use crate::CommandError;

// ============================================================================
// Request DTOs
// ============================================================================

/// Query parameters of `/predict`; flags are integer-like (non-zero = available)
#[derive(Debug, Clone, Deserialize)]
pub struct PredictParams {
    pub weight: i64,
    pub volume: i64,
    pub distance: i64,
    pub priority: i64,
    pub road_available: i64,
    pub rail_available: i64,
    pub air_available: i64,
    pub water_available: i64,
}

impl PredictParams {
    /// Validate and coerce into the engine's input
    pub fn into_request(self) -> Result<ShipmentRequest, CommandError> {
        validate_quantities(self.weight, self.volume, self.distance)?;

        Ok(ShipmentRequest {
            weight: self.weight,
            volume: self.volume,
            distance: self.distance,
            priority: self.priority,
            road_available: self.road_available != 0,
            rail_available: self.rail_available != 0,
            air_available: self.air_available != 0,
            water_available: self.water_available != 0,
        })
    }
}

/// Pagination for record listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Export format selection (filters come from the same query string)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

/// Reject negative quantities; zero is allowed
fn validate_quantities(weight: i64, volume: i64, distance: i64) -> Result<(), CommandError> {
    for (name, value) in [("weight", weight), ("volume", volume), ("distance", distance)] {
        if value < 0 {
            return Err(CommandError::Validation(format!(
                "{} must not be negative (got {})",
                name, value
            )));
        }
    }
    Ok(())
}

/// Date bounds must be real calendar days written as YYYY-MM-DD
fn validate_filter(filter: &RecordFilter) -> Result<(), CommandError> {
    for (name, value) in [("start_date", &filter.start_date), ("end_date", &filter.end_date)] {
        let Some(value) = value else { continue };
        let canonical = parse_date(value).map(|date| date.format("%Y-%m-%d").to_string());
        if canonical.as_deref() != Some(value.as_str()) {
            return Err(CommandError::InvalidInput(format!(
                "{} must be a date in YYYY-MM-DD format (got {})",
                name, value
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Transport API is up" }))
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Recommend a transport mode with justification and per-mode comparison
pub async fn predict(
    Query(params): Query<PredictParams>,
) -> Result<Json<RecommendationResult>, CommandError> {
    let request = params.into_request()?;
    let result = recommend(&request);

    tracing::info!(
        recommended = %result.recommended_mode,
        distance = request.distance,
        priority = request.priority,
        "Prediction served"
    );

    Ok(Json(result))
}

/// Log a shipment record
pub async fn add_transport(
    State(state): State<Arc<AppState>>,
    Json(shipment): Json<NewShipment>,
) -> Result<Json<ShipmentRecord>, CommandError> {
    validate_quantities(shipment.weight, shipment.volume, shipment.distance)?;

    let record = state
        .db
        .with_connection(|conn| queries::insert_shipment(conn, &shipment))?;

    tracing::info!(id = record.id, mode = ?record.recommended_mode, "Shipment record added");
    Ok(Json(record))
}

/// List shipment records in insertion order
pub async fn get_transports(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ShipmentRecord>>, CommandError> {
    let limit = params.limit.unwrap_or(state.config.list_limit);

    let records = state
        .db
        .with_connection(|conn| queries::get_shipments(conn, params.skip, Some(limit)))?;

    Ok(Json(records))
}

/// Get one shipment record
pub async fn get_transport(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ShipmentRecord>, CommandError> {
    let record = state
        .db
        .with_connection(|conn| queries::get_shipment(conn, id))?
        .ok_or_else(|| CommandError::NotFound(format!("transport {}", id)))?;

    Ok(Json(record))
}

/// Summary statistics over the (filtered) records
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RecordFilter>,
) -> Result<Json<RecordSummary>, CommandError> {
    let records = load_filtered(&state, &filter)?;
    Ok(Json(summarize(&records)))
}

/// Per-day record counts over the (filtered) records
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RecordFilter>,
) -> Result<Json<Vec<DailyRecordTrend>>, CommandError> {
    let records = load_filtered(&state, &filter)?;
    Ok(Json(aggregate_by_day(&records)))
}

/// Download the (filtered) records as CSV (default) or JSON
pub async fn export_transports(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
    Query(filter): Query<RecordFilter>,
) -> Result<Response, CommandError> {
    let format = match params.format.as_deref() {
        Some(format) => format.parse::<ExportFormat>()?,
        None => ExportFormat::Csv,
    };

    let records = load_filtered(&state, &filter)?;
    let count = records.len();

    let body = match format {
        ExportFormat::Csv => csv_export::records_to_csv(&records)?,
        ExportFormat::Json => json_export::records_to_json(records)?,
    };

    let filename = generate_export_filename("transport_data", format);
    tracing::info!("Exported {} records as {}", count, filename);

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

fn load_filtered(state: &AppState, filter: &RecordFilter) -> Result<Vec<ShipmentRecord>, CommandError> {
    validate_filter(filter)?;

    let records = state
        .db
        .with_connection(|conn| queries::get_filtered_shipments(conn, filter))?;
    Ok(records)
}
