//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as `YYYY-MM-DDTHH:MM:SS` text so that `date()` and
//! `time()` can split them and plain string ordering is chronological.

use blotter_core::{
  code::Code,
  incident::{CaseNumber, Incident},
  neighborhood::Neighborhood,
};
use chrono::NaiveDateTime;
use rusqlite::Row;

// ─── NaiveDateTime ───────────────────────────────────────────────────────────

pub fn encode_date_time(dt: NaiveDateTime) -> String { dt.format("%Y-%m-%dT%H:%M:%S").to_string() }

// ─── Row mappers ─────────────────────────────────────────────────────────────

/// Maps `SELECT code, incident_type`.
pub fn code_row(row: &Row<'_>) -> rusqlite::Result<Code> {
  Ok(Code { code: row.get(0)?, incident_type: row.get(1)? })
}

/// Maps `SELECT neighborhood_number, neighborhood_name`.
pub fn neighborhood_row(row: &Row<'_>) -> rusqlite::Result<Neighborhood> {
  Ok(Neighborhood { neighborhood_number: row.get(0)?, neighborhood_name: row.get(1)? })
}

/// Maps the incident select in [`crate::query`]. Nullable text columns
/// decode as empty strings; nullable numbers stay `None`.
pub fn incident_row(row: &Row<'_>) -> rusqlite::Result<Incident> {
  Ok(Incident {
    case_number:         CaseNumber::new(row.get::<_, String>(0)?),
    date:                row.get::<_, Option<String>>(1)?.unwrap_or_default(),
    time:                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    code:                row.get::<_, Option<i64>>(3)?,
    incident:            row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    police_grid:         row.get::<_, Option<i64>>(5)?,
    neighborhood_number: row.get::<_, Option<i64>>(6)?,
    block:               row.get::<_, Option<String>>(7)?.unwrap_or_default(),
  })
}
