//! SQL construction for every statement the store runs.
//!
//! Filter values only ever reach the database as bound parameters. Column
//! names and ordering come from the `&'static str` constants in this module,
//! never from request data.

use blotter_core::{
  filter::IdList,
  incident::{CaseNumber, NewIncident},
  store::{CodeQuery, IncidentQuery, NeighborhoodQuery},
};
use rusqlite::types::Value;

use crate::encode::encode_date_time;

// ─── Statement ───────────────────────────────────────────────────────────────

/// SQL text plus its positional parameters, ready for
/// [`SqliteStore::read`](crate::SqliteStore::read) or
/// [`SqliteStore::write`](crate::SqliteStore::write).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl Statement {
  pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
    Self { sql: sql.into(), params }
  }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Direction of a single-bound comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
  /// `expr >= ?`
  AtLeast,
  /// `expr <= ?`
  AtMost,
}

impl Bound {
  fn operator(self) -> &'static str {
    match self {
      Bound::AtLeast => ">=",
      Bound::AtMost => "<=",
    }
  }
}

/// Builds a `SELECT` from a fixed base statement plus optional filters.
///
/// Filters that carry no value add nothing; the remaining clauses are joined
/// with `AND`. Ordering and the row cap are appended after the `WHERE`.
#[derive(Debug)]
pub struct SelectBuilder {
  base:     &'static str,
  clauses:  Vec<String>,
  params:   Vec<Value>,
  order_by: Option<&'static str>,
  limit:    Option<usize>,
}

impl SelectBuilder {
  pub fn new(base: &'static str) -> Self {
    Self { base, clauses: Vec::new(), params: Vec::new(), order_by: None, limit: None }
  }

  /// `column IN (?, ?, …)` with one placeholder per element of `values`.
  pub fn any_of(mut self, column: &'static str, values: &IdList) -> Self {
    if values.is_empty() {
      return self;
    }
    let placeholders = vec!["?"; values.len()].join(", ");
    self.clauses.push(format!("{column} IN ({placeholders})"));
    self.params.extend(values.iter().map(|v| Value::Text(v.to_owned())));
    self
  }

  /// `expr >= ?` or `expr <= ?` when `value` is present.
  pub fn bounded(mut self, expr: &'static str, bound: Bound, value: Option<&str>) -> Self {
    if let Some(v) = value {
      self.clauses.push(format!("{expr} {} ?", bound.operator()));
      self.params.push(Value::Text(v.to_owned()));
    }
    self
  }

  pub fn order_by(mut self, order: &'static str) -> Self {
    self.order_by = Some(order);
    self
  }

  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }

  pub fn build(self) -> Statement {
    let mut sql = self.base.to_owned();
    let mut params = self.params;

    if !self.clauses.is_empty() {
      sql.push_str(" WHERE ");
      sql.push_str(&self.clauses.join(" AND "));
    }
    if let Some(order) = self.order_by {
      sql.push_str(" ORDER BY ");
      sql.push_str(order);
    }
    if let Some(limit) = self.limit {
      sql.push_str(" LIMIT ?");
      params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    }

    Statement { sql, params }
  }
}

// ─── Reads ───────────────────────────────────────────────────────────────────

const CODES_SELECT: &str = "SELECT code, incident_type FROM Codes";

const NEIGHBORHOODS_SELECT: &str =
  "SELECT neighborhood_number, neighborhood_name FROM Neighborhoods";

// The combined timestamp is split here so rows arrive already in the public
// date/time shape.
const INCIDENTS_SELECT: &str = "SELECT CAST(case_number AS TEXT), date(date_time), \
   time(date_time), code, incident, police_grid, neighborhood_number, block \
   FROM Incidents";

pub fn codes(query: &CodeQuery) -> Statement {
  SelectBuilder::new(CODES_SELECT)
    .any_of("code", &query.codes)
    .order_by("code ASC")
    .build()
}

pub fn neighborhoods(query: &NeighborhoodQuery) -> Statement {
  SelectBuilder::new(NEIGHBORHOODS_SELECT)
    .any_of("neighborhood_number", &query.ids)
    .order_by("neighborhood_number ASC")
    .build()
}

pub fn incidents(query: &IncidentQuery) -> Statement {
  SelectBuilder::new(INCIDENTS_SELECT)
    .bounded("date(date_time)", Bound::AtLeast, query.start_date.as_deref())
    .bounded("date(date_time)", Bound::AtMost, query.end_date.as_deref())
    .any_of("code", &query.codes)
    .any_of("police_grid", &query.grids)
    .any_of("neighborhood_number", &query.neighborhoods)
    .any_of("case_number", &query.case_numbers)
    .order_by("date_time DESC")
    .limit(query.limit)
    .build()
}

pub fn incident_exists(case_number: &CaseNumber) -> Statement {
  Statement::new(
    "SELECT 1 FROM Incidents WHERE case_number = ?1",
    vec![Value::Text(case_number.as_str().to_owned())],
  )
}

// ─── Writes ──────────────────────────────────────────────────────────────────

pub fn insert_incident(incident: &NewIncident) -> Statement {
  Statement::new(
    "INSERT INTO Incidents (
       case_number, date_time, code, incident,
       police_grid, neighborhood_number, block
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    vec![
      Value::Text(incident.case_number.as_str().to_owned()),
      Value::Text(encode_date_time(incident.date_time)),
      Value::Integer(incident.code),
      Value::Text(incident.incident.clone()),
      Value::Integer(incident.police_grid),
      Value::Integer(incident.neighborhood_number),
      Value::Text(incident.block.clone()),
    ],
  )
}

pub fn delete_incident(case_number: &CaseNumber) -> Statement {
  Statement::new(
    "DELETE FROM Incidents WHERE case_number = ?1",
    vec![Value::Text(case_number.as_str().to_owned())],
  )
}
