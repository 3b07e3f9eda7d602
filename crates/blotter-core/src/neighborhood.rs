//! Neighborhoods, the read-only lookup table of district councils.

use serde::{Deserialize, Serialize};

/// One row of the `Neighborhoods` table.
///
/// Storage columns are `neighborhood_number` / `neighborhood_name`; the public
/// JSON shape is `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
  #[serde(rename = "id")]
  pub neighborhood_number: i64,
  #[serde(rename = "name")]
  pub neighborhood_name:   String,
}
