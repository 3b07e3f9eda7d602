//! [`SqliteStore`], the SQLite implementation of [`IncidentStore`].

use std::{path::Path, sync::Arc};

use blotter_core::{
  code::Code,
  incident::{CaseNumber, Incident, NewIncident},
  neighborhood::Neighborhood,
  store::{CodeQuery, IncidentQuery, IncidentStore, NeighborhoodQuery},
};
use rusqlite::OpenFlags;

use crate::{
  Error, Result,
  encode::{code_row, incident_row, neighborhood_row},
  query::{self, Statement},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
enum Handle {
  Open(tokio_rusqlite::Connection),
  /// Opening failed at startup; holds the reason.
  Unavailable(Arc<str>),
}

/// A Blotter store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted. All
/// statements are serialised on the connection's background thread.
#[derive(Clone)]
pub struct SqliteStore {
  handle: Handle,
}

impl SqliteStore {
  /// Open an existing database at `path` in read-write mode.
  ///
  /// Fails if the file does not exist; the schema is not touched.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = tokio_rusqlite::Connection::open_with_flags(path, flags).await?;
    Ok(Self { handle: Handle::Open(conn) })
  }

  /// Open (or create) a database at `path` and apply the schema.
  pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { handle: Handle::Open(conn) };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { handle: Handle::Open(conn) };
    store.init_schema().await?;
    Ok(store)
  }

  /// A store whose every operation fails with [`Error::Unavailable`].
  ///
  /// Used when the database cannot be opened at startup so the server can
  /// still answer requests with a failure outcome.
  pub fn unavailable(reason: impl Into<String>) -> Self {
    Self { handle: Handle::Unavailable(Arc::from(reason.into())) }
  }

  pub fn is_available(&self) -> bool { matches!(self.handle, Handle::Open(_)) }

  fn conn(&self) -> Result<&tokio_rusqlite::Connection> {
    match &self.handle {
      Handle::Open(conn) => Ok(conn),
      Handle::Unavailable(reason) => Err(Error::Unavailable(reason.to_string())),
    }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn()?
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Data access primitives ────────────────────────────────────────────────

  /// Run a parameterised read and map every row with `map`.
  pub async fn read<T, F>(&self, statement: Statement, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let Statement { sql, params } = statement;

    let rows = self
      .conn()?
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  /// Run a parameterised write and return the number of affected rows.
  pub async fn write(&self, statement: Statement) -> Result<usize> {
    let Statement { sql, params } = statement;

    let changed = self
      .conn()?
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?))
      .await?;

    Ok(changed)
  }
}

// ─── IncidentStore impl ──────────────────────────────────────────────────────

impl IncidentStore for SqliteStore {
  type Error = Error;

  // ── Lookup tables ─────────────────────────────────────────────────────────

  async fn list_codes(&self, query: &CodeQuery) -> Result<Vec<Code>> {
    self.read(query::codes(query), code_row).await
  }

  async fn list_neighborhoods(&self, query: &NeighborhoodQuery) -> Result<Vec<Neighborhood>> {
    self.read(query::neighborhoods(query), neighborhood_row).await
  }

  // ── Incidents ─────────────────────────────────────────────────────────────

  async fn list_incidents(&self, query: &IncidentQuery) -> Result<Vec<Incident>> {
    self.read(query::incidents(query), incident_row).await
  }

  async fn incident_exists(&self, case_number: &CaseNumber) -> Result<bool> {
    let rows = self
      .read(query::incident_exists(case_number), |_| Ok(()))
      .await?;
    Ok(!rows.is_empty())
  }

  async fn insert_incident(&self, incident: NewIncident) -> Result<bool> {
    match self.write(query::insert_incident(&incident)).await {
      Ok(_) => Ok(true),
      Err(e) if e.is_constraint_violation() => Ok(false),
      Err(e) => Err(e),
    }
  }

  async fn delete_incident(&self, case_number: &CaseNumber) -> Result<bool> {
    let removed = self.write(query::delete_incident(case_number)).await?;
    Ok(removed > 0)
  }
}
