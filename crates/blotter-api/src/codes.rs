//! Handler for `GET /codes`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use blotter_core::{
  code::Code,
  filter::IdList,
  store::{CodeQuery, IncidentStore},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct CodeParams {
  /// Comma-separated codes, e.g. `100,110`.
  pub code: Option<String>,
}

impl From<CodeParams> for CodeQuery {
  fn from(p: CodeParams) -> Self {
    CodeQuery { codes: IdList::from_param(p.code.as_deref()) }
  }
}

/// `GET /codes[?code=100,110]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<CodeParams>,
) -> Result<Json<Vec<Code>>, ApiError>
where
  S: IncidentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let codes = store
    .list_codes(&CodeQuery::from(params))
    .await
    .map_err(|e| ApiError::Retrieve { resource: "codes", source: Box::new(e) })?;
  Ok(Json(codes))
}
