//! Error type for `blotter-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The database could not be opened at startup; every operation fails.
  #[error("store unavailable: {0}")]
  Unavailable(String),
}

impl Error {
  /// Whether the statement was rejected by a `UNIQUE` / `PRIMARY KEY`
  /// constraint.
  pub fn is_constraint_violation(&self) -> bool {
    matches!(
      self,
      Error::Database(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)))
        if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
