//! The `IncidentStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `blotter-store-sqlite`).
//! The HTTP layer (`blotter-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  code::Code,
  filter::{DEFAULT_LIMIT, IdList},
  incident::{CaseNumber, Incident, NewIncident},
  neighborhood::Neighborhood,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Filters for [`IncidentStore::list_codes`].
#[derive(Debug, Clone, Default)]
pub struct CodeQuery {
  pub codes: IdList,
}

/// Filters for [`IncidentStore::list_neighborhoods`].
#[derive(Debug, Clone, Default)]
pub struct NeighborhoodQuery {
  pub ids: IdList,
}

/// Filters for [`IncidentStore::list_incidents`].
#[derive(Debug, Clone)]
pub struct IncidentQuery {
  /// Inclusive lower bound on the incident's calendar date.
  pub start_date:    Option<String>,
  /// Inclusive upper bound on the incident's calendar date.
  pub end_date:      Option<String>,
  pub codes:         IdList,
  pub grids:         IdList,
  pub neighborhoods: IdList,
  pub case_numbers:  IdList,
  /// Maximum number of rows, applied after newest-first ordering.
  pub limit:         usize,
}

impl Default for IncidentQuery {
  fn default() -> Self {
    Self {
      start_date:    None,
      end_date:      None,
      codes:         IdList::default(),
      grids:         IdList::default(),
      neighborhoods: IdList::default(),
      case_numbers:  IdList::default(),
      limit:         DEFAULT_LIMIT,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Blotter store backend.
///
/// Codes and neighborhoods are read-only. Incidents are insert-or-delete
/// only; there is no update.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait IncidentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lookup tables ─────────────────────────────────────────────────────

  /// List codes matching `query`, ordered by code ascending.
  fn list_codes<'a>(
    &'a self,
    query: &'a CodeQuery,
  ) -> impl Future<Output = Result<Vec<Code>, Self::Error>> + Send + 'a;

  /// List neighborhoods matching `query`, ordered by number ascending.
  fn list_neighborhoods<'a>(
    &'a self,
    query: &'a NeighborhoodQuery,
  ) -> impl Future<Output = Result<Vec<Neighborhood>, Self::Error>> + Send + 'a;

  // ── Incidents ─────────────────────────────────────────────────────────

  /// List incidents matching `query`, newest first, capped at `query.limit`.
  fn list_incidents<'a>(
    &'a self,
    query: &'a IncidentQuery,
  ) -> impl Future<Output = Result<Vec<Incident>, Self::Error>> + Send + 'a;

  /// Whether an incident with this case number is currently stored.
  fn incident_exists<'a>(
    &'a self,
    case_number: &'a CaseNumber,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Insert a new incident.
  ///
  /// Returns `false` without writing if the store's own uniqueness
  /// constraint rejects the case number.
  fn insert_incident(
    &self,
    incident: NewIncident,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete the incident with this case number.
  ///
  /// Returns `false` if no row was removed.
  fn delete_incident<'a>(
    &'a self,
    case_number: &'a CaseNumber,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
