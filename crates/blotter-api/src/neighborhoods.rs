//! Handler for `GET /neighborhoods`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use blotter_core::{
  filter::IdList,
  neighborhood::Neighborhood,
  store::{IncidentStore, NeighborhoodQuery},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct NeighborhoodParams {
  /// Comma-separated neighborhood numbers.
  pub id: Option<String>,
}

impl From<NeighborhoodParams> for NeighborhoodQuery {
  fn from(p: NeighborhoodParams) -> Self {
    NeighborhoodQuery { ids: IdList::from_param(p.id.as_deref()) }
  }
}

/// `GET /neighborhoods[?id=1,2]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<NeighborhoodParams>,
) -> Result<Json<Vec<Neighborhood>>, ApiError>
where
  S: IncidentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let neighborhoods = store
    .list_neighborhoods(&NeighborhoodQuery::from(params))
    .await
    .map_err(|e| ApiError::Retrieve { resource: "neighborhoods", source: Box::new(e) })?;
  Ok(Json(neighborhoods))
}
