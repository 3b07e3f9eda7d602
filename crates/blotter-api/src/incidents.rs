//! Handlers for the incident endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/incidents` | Optional `start_date`, `end_date`, `code`, `grid`, `neighborhood`, `case_number`, `limit` |
//! | `PUT`    | `/new-incident` | Body: [`NewIncidentBody`]; `200 OK` or `"Case number already exists"` |
//! | `DELETE` | `/remove-incident` | Body: `{"case_number": ...}`; `200 OK` or `"Case number does not exist"` |
//!
//! Both mutations check for the case number first and only then write. The
//! two steps are not atomic: two concurrent creates of the same case number
//! can both pass the check, in which case the table's primary key rejects the
//! second insert and it reports the same "already exists" outcome.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use blotter_core::{
  filter::{IdList, date_bound, parse_limit},
  incident::{CaseNumber, Incident, NewIncident, combine_date_time},
  store::{IncidentQuery, IncidentStore},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct IncidentParams {
  /// Inclusive lower bound, `YYYY-MM-DD`.
  pub start_date:   Option<String>,
  /// Inclusive upper bound, `YYYY-MM-DD`.
  pub end_date:     Option<String>,
  /// Comma-separated codes.
  pub code:         Option<String>,
  /// Comma-separated police grids.
  pub grid:         Option<String>,
  /// Comma-separated neighborhood numbers.
  pub neighborhood: Option<String>,
  /// Comma-separated case numbers.
  pub case_number:  Option<String>,
  /// Row cap; anything that is not a non-negative integer means the default.
  pub limit:        Option<String>,
}

impl From<IncidentParams> for IncidentQuery {
  fn from(p: IncidentParams) -> Self {
    IncidentQuery {
      start_date:    date_bound(p.start_date.as_deref()),
      end_date:      date_bound(p.end_date.as_deref()),
      codes:         IdList::from_param(p.code.as_deref()),
      grids:         IdList::from_param(p.grid.as_deref()),
      neighborhoods: IdList::from_param(p.neighborhood.as_deref()),
      case_numbers:  IdList::from_param(p.case_number.as_deref()),
      limit:         parse_limit(p.limit.as_deref()),
    }
  }
}

/// `GET /incidents[?start_date=...][&end_date=...][&code=...][&grid=...][&neighborhood=...][&case_number=...][&limit=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<IncidentParams>,
) -> Result<Json<Vec<Incident>>, ApiError>
where
  S: IncidentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let incidents = store
    .list_incidents(&IncidentQuery::from(params))
    .await
    .map_err(|e| ApiError::Retrieve { resource: "incidents", source: Box::new(e) })?;
  Ok(Json(incidents))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /new-incident`.
#[derive(Debug, Deserialize)]
pub struct NewIncidentBody {
  pub case_number:         CaseNumber,
  pub date:                String,
  pub time:                String,
  pub code:                i64,
  pub incident:            String,
  pub police_grid:         i64,
  pub neighborhood_number: i64,
  pub block:               String,
}

impl TryFrom<NewIncidentBody> for NewIncident {
  type Error = blotter_core::Error;

  fn try_from(b: NewIncidentBody) -> Result<Self, Self::Error> {
    Ok(NewIncident {
      date_time:           combine_date_time(&b.date, &b.time)?,
      case_number:         b.case_number,
      code:                b.code,
      incident:            b.incident,
      police_grid:         b.police_grid,
      neighborhood_number: b.neighborhood_number,
      block:               b.block,
    })
  }
}

/// `PUT /new-incident`, answering `200` with body `OK`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewIncidentBody>,
) -> Result<&'static str, ApiError>
where
  S: IncidentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let incident = NewIncident::try_from(body)?;
  let case_number = incident.case_number.clone();

  let exists = store
    .incident_exists(&case_number)
    .await
    .map_err(|e| ApiError::Insert(Box::new(e)))?;
  if exists {
    return Err(ApiError::CaseNumberExists(case_number));
  }

  let inserted = store
    .insert_incident(incident)
    .await
    .map_err(|e| ApiError::Insert(Box::new(e)))?;
  if !inserted {
    return Err(ApiError::CaseNumberExists(case_number));
  }

  tracing::info!(%case_number, "incident created");
  Ok("OK")
}

// ─── Remove ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RemoveBody {
  pub case_number: CaseNumber,
}

/// `DELETE /remove-incident`, body: `{"case_number":"..."}`.
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<RemoveBody>,
) -> Result<&'static str, ApiError>
where
  S: IncidentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let case_number = body.case_number;

  let exists = store
    .incident_exists(&case_number)
    .await
    .map_err(|e| ApiError::Delete(Box::new(e)))?;
  if !exists {
    return Err(ApiError::CaseNumberMissing(case_number));
  }

  let removed = store
    .delete_incident(&case_number)
    .await
    .map_err(|e| ApiError::Delete(Box::new(e)))?;
  if !removed {
    return Err(ApiError::CaseNumberMissing(case_number));
  }

  tracing::info!(%case_number, "incident removed");
  Ok("OK")
}
