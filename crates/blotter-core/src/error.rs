//! Error types for `blotter-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("invalid time {0:?}: expected HH:MM[:SS]")]
  InvalidTime(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
