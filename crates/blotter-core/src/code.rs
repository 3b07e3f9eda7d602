//! Incident codes, the read-only lookup table of offense types.

use serde::{Deserialize, Serialize};

/// One row of the `Codes` table.
///
/// Serialises to the public `{code, type}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
  pub code:          i64,
  #[serde(rename = "type")]
  pub incident_type: String,
}
