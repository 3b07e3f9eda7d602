//! JSON REST API for Blotter.
//!
//! Exposes an axum [`Router`] backed by any
//! [`blotter_core::store::IncidentStore`]. Successful reads answer with JSON
//! arrays; every failure answers with a plain-text message.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = blotter_api::api_router(Arc::new(store));
//! ```

pub mod codes;
pub mod error;
pub mod incidents;
pub mod neighborhoods;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, put},
};
use blotter_core::store::IncidentStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: IncidentStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Lookup tables
    .route("/codes", get(codes::list::<S>))
    .route("/neighborhoods", get(neighborhoods::list::<S>))
    // Incidents
    .route("/incidents", get(incidents::list::<S>))
    .route("/new-incident", put(incidents::create::<S>))
    .route("/remove-incident", delete(incidents::remove::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use std::convert::Infallible;

  use blotter_core::{
    code::Code,
    incident::{CaseNumber, Incident, NewIncident},
    neighborhood::Neighborhood,
    store::{CodeQuery, IncidentQuery, NeighborhoodQuery},
  };
  use blotter_store_sqlite::{SqliteStore, Statement};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  const FIXTURES: &str = "
    INSERT INTO Codes (code, incident_type) VALUES
      (600, 'Theft'), (110, 'Murder, Non Negligent Manslaughter'), (100, 'Murder');
    INSERT INTO Neighborhoods (neighborhood_number, neighborhood_name) VALUES
      (2, 'Greater East Side'), (1, 'Conway/Battlecreek/Highwood'), (17, 'Capitol River');
    INSERT INTO Incidents VALUES
      ('19245001', '2019-10-01T08:00:00', 600, 'Theft', 87, 7, '98X UNIVERSITY AV W'),
      ('19245002', '2019-10-02T09:15:00', 100, 'Murder', 88, 8, '5X SNELLING AV'),
      ('19245003', '2019-10-03T10:30:00', 600, 'Theft', 87, 7, '65X DALE ST N'),
      ('19245004', '2019-10-04T11:45:00', 110, 'Murder', 90, 1, '17X MARYLAND AV E'),
      ('19245005', '2019-10-05T23:59:59', 600, 'Theft', 87, 17, '2X 7 ST W');
  ";

  async fn seeded_store() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    for sql in FIXTURES.split(';').map(str::trim).filter(|s| !s.is_empty()) {
      store.write(Statement::new(sql, Vec::new())).await.unwrap();
    }
    Arc::new(store)
  }

  async fn send<S: IncidentStore + 'static>(
    store:  Arc<S>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = api_router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  async fn get_json(store: Arc<SqliteStore>, uri: &str) -> Vec<Value> {
    let (status, body) = send(store, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    serde_json::from_str(&body).unwrap()
  }

  fn new_incident_body(case_number: Value) -> Value {
    json!({
      "case_number": case_number,
      "date": "2019-10-30",
      "time": "23:57:08",
      "code": 600,
      "incident": "Theft",
      "police_grid": 87,
      "neighborhood_number": 7,
      "block": "THOMAS AV & VICTORIA"
    })
  }

  fn case_numbers(rows: &[Value]) -> Vec<&str> {
    rows.iter().map(|r| r["case_number"].as_str().unwrap()).collect()
  }

  // ── GET /codes ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn codes_filtered_and_ordered() {
    let store = seeded_store().await;
    let rows = get_json(store, "/codes?code=110,100").await;
    assert_eq!(
      rows,
      vec![
        json!({ "code": 100, "type": "Murder" }),
        json!({ "code": 110, "type": "Murder, Non Negligent Manslaughter" }),
      ]
    );
  }

  #[tokio::test]
  async fn codes_unfiltered_ignores_unknown_params() {
    let store = seeded_store().await;
    let rows = get_json(store, "/codes?colour=blue").await;
    let codes: Vec<i64> = rows.iter().map(|r| r["code"].as_i64().unwrap()).collect();
    assert_eq!(codes, [100, 110, 600]);
  }

  // ── GET /neighborhoods ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn neighborhoods_use_public_shape() {
    let store = seeded_store().await;
    let rows = get_json(store.clone(), "/neighborhoods").await;
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 17]);

    let rows = get_json(store, "/neighborhoods?id=%2017%20,2").await;
    assert_eq!(
      rows,
      vec![
        json!({ "id": 2, "name": "Greater East Side" }),
        json!({ "id": 17, "name": "Capitol River" }),
      ]
    );
  }

  // ── GET /incidents ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn incidents_newest_first_in_public_shape() {
    let store = seeded_store().await;
    let rows = get_json(store, "/incidents").await;
    assert_eq!(rows.len(), 5);
    assert_eq!(
      rows[0],
      json!({
        "case_number": "19245005",
        "date": "2019-10-05",
        "time": "23:59:59",
        "code": 600,
        "incident": "Theft",
        "police_grid": 87,
        "neighborhood_number": 17,
        "block": "2X 7 ST W"
      })
    );
    assert_eq!(
      case_numbers(&rows),
      ["19245005", "19245004", "19245003", "19245002", "19245001"]
    );
  }

  #[tokio::test]
  async fn incidents_limit_returns_most_recent() {
    let store = seeded_store().await;
    let rows = get_json(store, "/incidents?limit=2").await;
    assert_eq!(case_numbers(&rows), ["19245005", "19245004"]);
  }

  #[tokio::test]
  async fn incidents_bad_limit_falls_back_to_default() {
    let store = seeded_store().await;
    let rows = get_json(store.clone(), "/incidents?limit=lots").await;
    assert_eq!(rows.len(), 5);
    let rows = get_json(store, "/incidents?limit=-1").await;
    assert_eq!(rows.len(), 5);
  }

  #[tokio::test]
  async fn incidents_default_cap_is_one_thousand() {
    let store = seeded_store().await;
    store
      .write(Statement::new(
        "WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 1005)
         INSERT INTO Incidents
           (case_number, date_time, code, incident, police_grid, neighborhood_number, block)
         SELECT 'bulk-' || i,
                strftime('%Y-%m-%dT%H:%M:%S', '2020-01-01', '+' || i || ' minutes'),
                600, 'Theft', 87, 7, 'X'
         FROM n",
        Vec::new(),
      ))
      .await
      .unwrap();

    let rows = get_json(store, "/incidents").await;
    assert_eq!(rows.len(), 1000);
    assert_eq!(rows[0]["case_number"], "bulk-1005");
    assert_eq!(rows[999]["case_number"], "bulk-6");
  }

  #[tokio::test]
  async fn incidents_combined_filters() {
    let store = seeded_store().await;
    let rows = get_json(
      store.clone(),
      "/incidents?start_date=2019-10-02&end_date=2019-10-05&code=600,100&grid=87",
    )
    .await;
    assert_eq!(case_numbers(&rows), ["19245005", "19245003"]);

    let rows = get_json(store, "/incidents?neighborhood=7,8&code=").await;
    assert_eq!(case_numbers(&rows), ["19245003", "19245002", "19245001"]);
  }

  // ── PUT /new-incident ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_novel_incident_then_read_it_back() {
    let store = seeded_store().await;
    let (status, body) =
      send(store.clone(), "PUT", "/new-incident", Some(new_incident_body(json!("19245100")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let rows = get_json(store, "/incidents?case_number=19245100").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2019-10-30");
    assert_eq!(rows[0]["time"], "23:57:08");
    assert_eq!(rows[0]["block"], "THOMAS AV & VICTORIA");
  }

  #[tokio::test]
  async fn create_accepts_integer_case_number() {
    let store = seeded_store().await;
    let (status, _) =
      send(store.clone(), "PUT", "/new-incident", Some(new_incident_body(json!(19245101)))).await;
    assert_eq!(status, StatusCode::OK);

    let rows = get_json(store, "/incidents?case_number=19245101").await;
    assert_eq!(rows[0]["case_number"], "19245101");
  }

  #[tokio::test]
  async fn create_duplicate_is_rejected_without_writing() {
    let store = seeded_store().await;
    let (status, body) =
      send(store.clone(), "PUT", "/new-incident", Some(new_incident_body(json!("19245003")))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Case number already exists");

    let rows = get_json(store, "/incidents").await;
    assert_eq!(rows.len(), 5);
    let original = rows.iter().find(|r| r["case_number"] == "19245003").unwrap();
    assert_eq!(original["date"], "2019-10-03");
  }

  #[tokio::test]
  async fn create_with_malformed_date_fails_without_writing() {
    let store = seeded_store().await;
    let mut body = new_incident_body(json!("19245102"));
    body["date"] = json!("30/10/2019");
    let (status, text) = send(store.clone(), "PUT", "/new-incident", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "Error inserting incident");

    let rows = get_json(store, "/incidents?case_number=19245102").await;
    assert!(rows.is_empty());
  }

  // ── DELETE /remove-incident ─────────────────────────────────────────────────

  #[tokio::test]
  async fn remove_nonexistent_reports_missing() {
    let store = seeded_store().await;
    let (status, body) = send(
      store.clone(),
      "DELETE",
      "/remove-incident",
      Some(json!({ "case_number": "00000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Case number does not exist");
    assert_eq!(get_json(store, "/incidents").await.len(), 5);
  }

  #[tokio::test]
  async fn remove_existing_then_repeat() {
    let store = seeded_store().await;
    let remove = || json!({ "case_number": "19245002" });

    let (status, body) = send(store.clone(), "DELETE", "/remove-incident", Some(remove())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let rows = get_json(store.clone(), "/incidents").await;
    assert_eq!(case_numbers(&rows), ["19245005", "19245004", "19245003", "19245001"]);

    let (status, body) = send(store, "DELETE", "/remove-incident", Some(remove())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Case number does not exist");
  }

  // ── Lost races ──────────────────────────────────────────────────────────────

  /// A store whose existence check always answers `present`, while every
  /// write reports that nothing changed, as if another request got there
  /// between the check and the write.
  struct RacingStore {
    present: bool,
  }

  impl IncidentStore for RacingStore {
    type Error = Infallible;

    async fn list_codes(&self, _: &CodeQuery) -> Result<Vec<Code>, Infallible> { Ok(Vec::new()) }

    async fn list_neighborhoods(
      &self,
      _: &NeighborhoodQuery,
    ) -> Result<Vec<Neighborhood>, Infallible> {
      Ok(Vec::new())
    }

    async fn list_incidents(&self, _: &IncidentQuery) -> Result<Vec<Incident>, Infallible> {
      Ok(Vec::new())
    }

    async fn incident_exists(&self, _: &CaseNumber) -> Result<bool, Infallible> { Ok(self.present) }

    async fn insert_incident(&self, _: NewIncident) -> Result<bool, Infallible> { Ok(false) }

    async fn delete_incident(&self, _: &CaseNumber) -> Result<bool, Infallible> { Ok(false) }
  }

  #[tokio::test]
  async fn create_rejected_by_uniqueness_reports_exists() {
    let store = Arc::new(RacingStore { present: false });
    let (status, body) =
      send(store, "PUT", "/new-incident", Some(new_incident_body(json!("19245200")))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Case number already exists");
  }

  #[tokio::test]
  async fn remove_of_vanished_row_reports_missing() {
    let store = Arc::new(RacingStore { present: true });
    let (status, body) =
      send(store, "DELETE", "/remove-incident", Some(json!({ "case_number": "19245200" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Case number does not exist");
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unavailable_store_maps_to_resource_messages() {
    let store = Arc::new(SqliteStore::unavailable("unable to open database file"));

    for (uri, message) in [
      ("/codes", "Error retrieving codes"),
      ("/neighborhoods", "Error retrieving neighborhoods"),
      ("/incidents?limit=5", "Error retrieving incidents"),
    ] {
      let (status, body) = send(store.clone(), "GET", uri, None).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(body, message);
    }

    let (status, body) =
      send(store.clone(), "PUT", "/new-incident", Some(new_incident_body(json!("1")))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error inserting incident");

    let (status, body) =
      send(store, "DELETE", "/remove-incident", Some(json!({ "case_number": "1" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error deleting incident");
  }

  #[tokio::test]
  async fn store_error_text_is_not_leaked() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    store
      .write(Statement::new("DROP TABLE Codes", Vec::new()))
      .await
      .unwrap();

    let (status, body) = send(store, "GET", "/codes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error retrieving codes");
  }
}
