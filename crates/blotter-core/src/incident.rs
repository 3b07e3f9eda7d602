//! Incidents: individual crime reports, the only mutable table.
//!
//! An incident is stored with a single combined `date_time` column but is
//! exposed with separate `date` and `time` fields. Incidents are never
//! updated: they are inserted by `PUT /new-incident` and removed by
//! `DELETE /remove-incident`.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

// ─── CaseNumber ──────────────────────────────────────────────────────────────

/// The unique identifier of an incident.
///
/// Accepted from JSON as either a string or an integer, always emitted as a
/// string. Surrounding whitespace is trimmed on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CaseNumber(String);

impl CaseNumber {
  pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_inner(self) -> String { self.0 }
}

impl fmt::Display for CaseNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for CaseNumber {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for CaseNumber {
  fn from(s: String) -> Self { Self(s) }
}

impl<'de> Deserialize<'de> for CaseNumber {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Text(String),
      Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
      Raw::Text(s) => Self(s.trim().to_owned()),
      Raw::Number(n) => Self(n.to_string()),
    })
  }
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// An incident as returned by `GET /incidents`.
///
/// `date` and `time` are split out of the stored timestamp by the store, so
/// they are carried here as the text the store produced. Numeric columns may
/// be NULL in older data and serialise as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
  pub case_number:         CaseNumber,
  pub date:                String,
  pub time:                String,
  pub code:                Option<i64>,
  pub incident:            String,
  pub police_grid:         Option<i64>,
  pub neighborhood_number: Option<i64>,
  pub block:               String,
}

// ─── Write model ─────────────────────────────────────────────────────────────

/// Input to [`IncidentStore::insert_incident`](crate::store::IncidentStore::insert_incident).
///
/// Holds the seven stored columns, with the date and time already combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
  pub case_number:         CaseNumber,
  pub date_time:           NaiveDateTime,
  pub code:                i64,
  pub incident:            String,
  pub police_grid:         i64,
  pub neighborhood_number: i64,
  pub block:               String,
}

/// Time formats accepted for the `time` half of a new incident.
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Combine a `YYYY-MM-DD` date and an `HH:MM[:SS[.fff]]` time into the
/// single timestamp the store keeps.
pub fn combine_date_time(date: &str, time: &str) -> Result<NaiveDateTime> {
  let date = date.trim();
  let time = time.trim();

  let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate(date.to_owned()))?;

  let clock = TIME_FORMATS
    .iter()
    .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())
    .ok_or_else(|| Error::InvalidTime(time.to_owned()))?;

  Ok(day.and_time(clock))
}
