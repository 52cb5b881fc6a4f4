// SPDX-License-Identifier: MIT

//! Personal records load and save.
//!
//! Records are keyed by distance on the wire, so a save payload can
//! never carry two entries for the same distance (later JSON keys
//! overwrite earlier ones). The store enforces the same invariant with
//! an upsert on `(user_id, distance)`.

use crate::error::Result;
use crate::middleware::auth::Session;
use crate::models::{Distance, PersonalRecord};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/records", get(get_records).put(save_records))
}

/// One record as the frontend sees it.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordEntry {
    pub time: String,
    pub race_location: String,
    pub date_achieved: String,
    pub updated_at: Option<String>,
}

/// Records keyed by distance. Distances without a row are simply absent,
/// which the frontend renders as blank inputs.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordsResponse {
    pub records: BTreeMap<Distance, RecordEntry>,
}

fn to_response(records: Vec<PersonalRecord>) -> RecordsResponse {
    RecordsResponse {
        records: records
            .into_iter()
            .map(|r| {
                (
                    r.distance,
                    RecordEntry {
                        time: r.time,
                        race_location: r.race_location,
                        date_achieved: r.date_achieved,
                        updated_at: r.updated_at,
                    },
                )
            })
            .collect(),
    }
}

/// Load the current user's personal records.
async fn get_records(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<RecordsResponse>> {
    let records = state
        .db
        .get_records(&session.token, &session.user_id)
        .await?;

    Ok(Json(to_response(records)))
}

/// Buffered per-distance edits submitted on save.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordInput {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub race_location: String,
    #[serde(default)]
    pub date_achieved: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveRecordsRequest {
    pub records: BTreeMap<Distance, RecordInput>,
}

/// Save the current user's personal records.
///
/// Entries without a time are skipped (a blank row is "nothing to save",
/// not an error). Surviving entries go to the store as one batch upsert,
/// so a failure applies none of them. On success the full set is
/// reloaded so the response reflects authoritative store state.
async fn save_records(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(request): Json<SaveRecordsRequest>,
) -> Result<Json<RecordsResponse>> {
    let rows = rows_for_save(
        &session.user_id,
        request.records,
        chrono::Utc::now().to_rfc3339(),
    );

    state.db.upsert_records(&session.token, &rows).await?;

    tracing::info!(
        user_id = %session.user_id,
        count = rows.len(),
        "Personal records saved"
    );

    let records = state
        .db
        .get_records(&session.token, &session.user_id)
        .await?;

    Ok(Json(to_response(records)))
}

/// Build the upsert rows for a save request.
///
/// Drops entries with an empty (or whitespace-only) time even when the
/// other fields are filled in, and stamps every surviving row with the
/// same `updated_at`.
fn rows_for_save(
    user_id: &str,
    records: BTreeMap<Distance, RecordInput>,
    updated_at: String,
) -> Vec<PersonalRecord> {
    records
        .into_iter()
        .filter(|(_, input)| !input.time.trim().is_empty())
        .map(|(distance, input)| PersonalRecord {
            user_id: user_id.to_string(),
            distance,
            time: input.time.trim().to_string(),
            race_location: input.race_location,
            date_achieved: input.date_achieved,
            updated_at: Some(updated_at.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(time: &str, location: &str) -> RecordInput {
        RecordInput {
            time: time.to_string(),
            race_location: location.to_string(),
            date_achieved: "2026-04-20".to_string(),
        }
    }

    #[test]
    fn test_rows_for_save_single_entry() {
        let mut records = BTreeMap::new();
        records.insert(Distance::FiveK, input("19:45", ""));

        let rows = rows_for_save("u1", records, "now".to_string());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, "u1");
        assert_eq!(rows[0].distance, Distance::FiveK);
        assert_eq!(rows[0].time, "19:45");
        assert_eq!(rows[0].updated_at.as_deref(), Some("now"));
    }

    #[test]
    fn test_rows_for_save_skips_empty_time() {
        let mut records = BTreeMap::new();
        // Location and date filled in, but no time: must not be saved
        records.insert(Distance::TenK, input("", "Boston"));
        records.insert(Distance::OneMile, input("   ", "Berlin"));
        records.insert(Distance::HalfMarathon, input("1:29:59", "Chicago"));

        let rows = rows_for_save("u1", records, "now".to_string());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].distance, Distance::HalfMarathon);
    }

    #[test]
    fn test_rows_for_save_trims_time() {
        let mut records = BTreeMap::new();
        records.insert(Distance::FullMarathon, input(" 3:05:00 ", ""));

        let rows = rows_for_save("u1", records, "now".to_string());
        assert_eq!(rows[0].time, "3:05:00");
    }

    #[test]
    fn test_duplicate_distance_keys_last_wins() {
        // JSON object keys dedupe before rows_for_save ever runs; the
        // later entry replaces the earlier one, matching map semantics.
        let json = r#"{
            "records": {
                "5K": {"time": "20:10"},
                "5K": {"time": "19:45"}
            }
        }"#;

        let request: SaveRecordsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.records.len(), 1);

        let rows = rows_for_save("u1", request.records, "now".to_string());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, "19:45");
    }

    #[test]
    fn test_unknown_distance_rejected() {
        let json = r#"{"records": {"50K": {"time": "4:00:00"}}}"#;
        let request: std::result::Result<SaveRecordsRequest, _> = serde_json::from_str(json);
        assert!(request.is_err());
    }

    #[test]
    fn test_to_response_keys_by_distance() {
        let records = vec![PersonalRecord {
            user_id: "u1".to_string(),
            distance: Distance::FiveK,
            time: "19:45".to_string(),
            race_location: String::new(),
            date_achieved: String::new(),
            updated_at: None,
        }];

        let response = to_response(records);
        assert!(response.records.contains_key(&Distance::FiveK));
        assert!(!response.records.contains_key(&Distance::TenK));
    }
}
