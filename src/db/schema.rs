//! Database schema definitions
//!
//! Contains SQL for creating all tables and indexes

use rusqlite::Connection;
use super::DbError;

/// SQL schema for all tables
const SCHEMA: &str = r#"
-- Logged shipments
CREATE TABLE IF NOT EXISTS transports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    weight INTEGER NOT NULL,
    volume INTEGER NOT NULL,
    distance INTEGER NOT NULL,
    priority INTEGER NOT NULL,
    road_available INTEGER NOT NULL DEFAULT 0,
    rail_available INTEGER NOT NULL DEFAULT 0,
    air_available INTEGER NOT NULL DEFAULT 0,
    water_available INTEGER NOT NULL DEFAULT 0,
    recommended_mode TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_transports_mode ON transports(recommended_mode);
CREATE INDEX IF NOT EXISTS idx_transports_created ON transports(created_at);
"#;

/// Create all database tables
pub fn create_tables(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
