//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is answered with a plain-text body. Store errors are logged
//! but never echoed to the client.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use blotter_core::incident::CaseNumber;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A read endpoint could not query the store.
  #[error("Error retrieving {resource}")]
  Retrieve {
    resource: &'static str,
    #[source]
    source:   BoxError,
  },

  #[error("Error inserting incident")]
  Insert(#[source] BoxError),

  #[error("Error deleting incident")]
  Delete(#[source] BoxError),

  #[error("Case number already exists")]
  CaseNumberExists(CaseNumber),

  #[error("Case number does not exist")]
  CaseNumberMissing(CaseNumber),

  /// The new incident's date or time could not be parsed. Reported with the
  /// same outcome as any other failed insert; nothing reaches the store.
  #[error("Error inserting incident")]
  InvalidIncident(#[from] blotter_core::Error),
}

impl ApiError {
  pub fn status(&self) -> StatusCode { StatusCode::INTERNAL_SERVER_ERROR }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Retrieve { source, .. } | ApiError::Insert(source) | ApiError::Delete(source) => {
        tracing::error!(error = %source, "{self}");
      }
      ApiError::CaseNumberExists(case) | ApiError::CaseNumberMissing(case) => {
        tracing::info!(case_number = %case, "{self}");
      }
      ApiError::InvalidIncident(e) => tracing::info!(error = %e, "rejected new incident"),
    }
    (self.status(), self.to_string()).into_response()
  }
}
