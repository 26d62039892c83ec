//! Database query implementations
//!
//! Contains functions for storing and querying shipment records

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use super::DbError;
use crate::models::shipment::{NewShipment, RecordFilter, ShipmentRecord};

/// Default page size for record listings
pub const DEFAULT_LIST_LIMIT: u32 = 1000;

const RECORD_COLUMNS: &str = r#"
    id,
    weight,
    volume,
    distance,
    priority,
    road_available,
    rail_available,
    air_available,
    water_available,
    recommended_mode,
    COALESCE(created_at, '') as created_at
"#;

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ShipmentRecord> {
    Ok(ShipmentRecord {
        id: row.get(0)?,
        weight: row.get(1)?,
        volume: row.get(2)?,
        distance: row.get(3)?,
        priority: row.get(4)?,
        road_available: row.get::<_, i64>(5)? != 0,
        rail_available: row.get::<_, i64>(6)? != 0,
        air_available: row.get::<_, i64>(7)? != 0,
        water_available: row.get::<_, i64>(8)? != 0,
        recommended_mode: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Insert a shipment and return the stored record
pub fn insert_shipment(conn: &Connection, shipment: &NewShipment) -> Result<ShipmentRecord, DbError> {
    conn.execute(
        r#"
        INSERT INTO transports (
            weight, volume, distance, priority,
            road_available, rail_available, air_available, water_available,
            recommended_mode
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            shipment.weight,
            shipment.volume,
            shipment.distance,
            shipment.priority,
            shipment.road_available,
            shipment.rail_available,
            shipment.air_available,
            shipment.water_available,
            shipment.recommended_mode,
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_shipment(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
}

/// Get shipments in insertion order with pagination
pub fn get_shipments(
    conn: &Connection,
    skip: Option<u32>,
    limit: Option<u32>,
) -> Result<Vec<ShipmentRecord>, DbError> {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let skip = skip.unwrap_or(0);

    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM transports ORDER BY id ASC LIMIT ?1 OFFSET ?2"
    );
    let mut stmt = conn.prepare(&sql)?;

    let records = stmt
        .query_map(params![limit, skip], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Get a single shipment by ID
pub fn get_shipment(conn: &Connection, id: i64) -> Result<Option<ShipmentRecord>, DbError> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM transports WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;

    let record = stmt.query_row(params![id], record_from_row).optional()?;

    Ok(record)
}

/// Get all shipments matching the filter, in insertion order
pub fn get_filtered_shipments(
    conn: &Connection,
    filter: &RecordFilter,
) -> Result<Vec<ShipmentRecord>, DbError> {
    // Build query dynamically based on which filters are provided
    let mut sql = format!("SELECT {RECORD_COLUMNS} FROM transports WHERE 1 = 1");
    let mut values: Vec<Value> = Vec::new();

    if let Some(modes) = filter.mode_list() {
        let placeholders = vec!["?"; modes.len()].join(", ");
        sql.push_str(&format!(" AND recommended_mode IN ({placeholders})"));
        values.extend(modes.into_iter().map(Value::Text));
    }

    let ranges = [
        ("weight >= ?", filter.min_weight),
        ("weight <= ?", filter.max_weight),
        ("distance >= ?", filter.min_distance),
        ("distance <= ?", filter.max_distance),
    ];
    for (clause, bound) in ranges {
        if let Some(bound) = bound {
            sql.push_str(" AND ");
            sql.push_str(clause);
            values.push(Value::Integer(bound));
        }
    }

    if let Some(start) = &filter.start_date {
        sql.push_str(" AND substr(COALESCE(created_at, ''), 1, 10) >= ?");
        values.push(Value::Text(start.clone()));
    }
    if let Some(end) = &filter.end_date {
        sql.push_str(" AND substr(COALESCE(created_at, ''), 1, 10) <= ?");
        values.push(Value::Text(end.clone()));
    }

    // lower() folds ASCII only, like RecordFilter::search_needle
    if let Some(needle) = filter.search_needle() {
        sql.push_str(" AND instr(lower(COALESCE(recommended_mode, '')), ?) > 0");
        values.push(Value::Text(needle));
    }

    sql.push_str(" ORDER BY id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let records = stmt
        .query_map(params_from_iter(values.iter()), record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Count stored shipments
pub fn count_shipments(conn: &Connection) -> Result<u64, DbError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM transports", [], |row| row.get(0))?;
    Ok(count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn shipment(weight: i64, distance: i64, mode: Option<&str>) -> NewShipment {
        NewShipment {
            weight,
            volume: 20,
            distance,
            priority: 2,
            road_available: true,
            rail_available: true,
            air_available: false,
            water_available: false,
            recommended_mode: mode.map(str::to_string),
        }
    }

    fn set_created_at(conn: &Connection, id: i64, created_at: &str) {
        conn.execute(
            "UPDATE transports SET created_at = ?1 WHERE id = ?2",
            params![created_at, id],
        )
        .unwrap();
    }

    #[test]
    fn test_insert_and_get_shipment() {
        let conn = setup();
        let stored = insert_shipment(&conn, &shipment(120, 300, Some("Rail"))).unwrap();

        assert_eq!(stored.id, 1);
        assert_eq!(stored.weight, 120);
        assert!(stored.road_available);
        assert!(!stored.water_available);
        assert_eq!(stored.recommended_mode.as_deref(), Some("Rail"));
        assert!(!stored.created_at.is_empty());

        let fetched = get_shipment(&conn, stored.id).unwrap();
        assert_eq!(fetched, Some(stored));
    }

    #[test]
    fn test_get_missing_shipment() {
        let conn = setup();
        assert_eq!(get_shipment(&conn, 42).unwrap(), None);
    }

    #[test]
    fn test_insert_without_mode() {
        let conn = setup();
        let stored = insert_shipment(&conn, &shipment(10, 10, None)).unwrap();
        assert_eq!(stored.recommended_mode, None);
    }

    #[test]
    fn test_list_pagination_keeps_insertion_order() {
        let conn = setup();
        for i in 1..=5 {
            insert_shipment(&conn, &shipment(i * 10, 100, Some("Road"))).unwrap();
        }

        let all = get_shipments(&conn, None, None).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(
            all.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        let page = get_shipments(&conn, Some(1), Some(2)).unwrap();
        assert_eq!(page.iter().map(|r| r.weight).collect::<Vec<_>>(), vec![20, 30]);

        assert_eq!(count_shipments(&conn).unwrap(), 5);
    }

    #[test]
    fn test_filtered_query_matches_in_memory_filter() {
        let conn = setup();
        insert_shipment(&conn, &shipment(100, 200, Some("Road"))).unwrap();
        insert_shipment(&conn, &shipment(300, 900, Some("Rail"))).unwrap();
        insert_shipment(&conn, &shipment(500, 1500, Some("Air"))).unwrap();
        insert_shipment(&conn, &shipment(700, 50, None)).unwrap();
        set_created_at(&conn, 1, "2026-01-10 08:00:00");
        set_created_at(&conn, 2, "2026-01-11 12:00:00");
        set_created_at(&conn, 3, "2026-01-12 16:00:00");
        set_created_at(&conn, 4, "2026-01-12 18:00:00");

        let all = get_shipments(&conn, None, None).unwrap();

        let filters = vec![
            RecordFilter::default(),
            RecordFilter {
                modes: Some("Road,Air".to_string()),
                ..Default::default()
            },
            RecordFilter {
                min_weight: Some(300),
                max_distance: Some(1000),
                ..Default::default()
            },
            RecordFilter {
                start_date: Some("2026-01-11".to_string()),
                end_date: Some("2026-01-12".to_string()),
                ..Default::default()
            },
            RecordFilter {
                search: Some("AI".to_string()),
                ..Default::default()
            },
        ];

        for filter in filters {
            let from_sql = get_filtered_shipments(&conn, &filter).unwrap();
            let in_memory: Vec<ShipmentRecord> =
                all.iter().filter(|r| filter.matches(r)).cloned().collect();
            assert_eq!(from_sql, in_memory, "filter {:?}", filter);
        }
    }

    #[test]
    fn test_non_ascii_search_agrees_with_in_memory_filter() {
        let conn = setup();
        insert_shipment(&conn, &shipment(100, 200, Some("Überland"))).unwrap();
        insert_shipment(&conn, &shipment(200, 300, Some("ROAD"))).unwrap();
        let all = get_shipments(&conn, None, None).unwrap();

        for (search, expected_ids) in [
            ("ÜBER", vec![1]),
            ("über", vec![]),
            ("Überland", vec![1]),
            ("road", vec![2]),
        ] {
            let filter = RecordFilter {
                search: Some(search.to_string()),
                ..Default::default()
            };
            let from_sql = get_filtered_shipments(&conn, &filter).unwrap();
            let in_memory: Vec<ShipmentRecord> =
                all.iter().filter(|r| filter.matches(r)).cloned().collect();

            assert_eq!(from_sql, in_memory, "search {:?}", search);
            assert_eq!(
                from_sql.iter().map(|r| r.id).collect::<Vec<_>>(),
                expected_ids,
                "search {:?}",
                search
            );
        }
    }

    #[test]
    fn test_filter_by_mode_and_date() {
        let conn = setup();
        insert_shipment(&conn, &shipment(100, 200, Some("Road"))).unwrap();
        insert_shipment(&conn, &shipment(300, 900, Some("Road"))).unwrap();
        set_created_at(&conn, 1, "2026-02-01 10:00:00");
        set_created_at(&conn, 2, "2026-02-03 10:00:00");

        let filter = RecordFilter {
            modes: Some("Road".to_string()),
            end_date: Some("2026-02-02".to_string()),
            ..Default::default()
        };

        let records = get_filtered_shipments(&conn, &filter).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }
}
