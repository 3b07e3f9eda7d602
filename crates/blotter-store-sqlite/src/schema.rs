//! SQL schema for the Blotter SQLite store.
//!
//! Only applied to freshly created databases (`SqliteStore::create` and
//! in-memory stores). Existing databases are opened as-is.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS Codes (
    code          INTEGER PRIMARY KEY,
    incident_type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Neighborhoods (
    neighborhood_number INTEGER PRIMARY KEY,
    neighborhood_name   TEXT NOT NULL
);

-- code and neighborhood_number reference the lookup tables by value only;
-- no foreign key is enforced.
CREATE TABLE IF NOT EXISTS Incidents (
    case_number         TEXT PRIMARY KEY,
    date_time           TEXT NOT NULL,   -- YYYY-MM-DDTHH:MM:SS
    code                INTEGER,
    incident            TEXT,
    police_grid         INTEGER,
    neighborhood_number INTEGER,
    block               TEXT
);

CREATE INDEX IF NOT EXISTS incidents_date_time_idx ON Incidents(date_time);
";
