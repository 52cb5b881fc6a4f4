//! Personal record model and the closed set of race distances.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Race distance a personal record can be held for.
///
/// Serialized using the display labels the frontend renders, which are
/// also the values stored in the `distance` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Distance {
    #[serde(rename = "1 Mile")]
    OneMile,
    #[serde(rename = "5K")]
    FiveK,
    #[serde(rename = "10K")]
    TenK,
    #[serde(rename = "Half Marathon")]
    HalfMarathon,
    #[serde(rename = "Full Marathon")]
    FullMarathon,
}

impl Distance {
    /// All distances, shortest to longest.
    pub const ALL: [Distance; 5] = [
        Distance::OneMile,
        Distance::FiveK,
        Distance::TenK,
        Distance::HalfMarathon,
        Distance::FullMarathon,
    ];

    /// Column value / display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Distance::OneMile => "1 Mile",
            Distance::FiveK => "5K",
            Distance::TenK => "10K",
            Distance::HalfMarathon => "Half Marathon",
            Distance::FullMarathon => "Full Marathon",
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personal record row in the `personal_records` table.
///
/// At most one row exists per `(user_id, distance)` pair; writes go
/// through an upsert keyed on those columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Provider user id (conflict key, with `distance`)
    pub user_id: String,
    pub distance: Distance,
    /// Best time, free text (MM:SS for the mile, HH:MM:SS otherwise)
    pub time: String,
    /// Where the record was set
    #[serde(default)]
    pub race_location: String,
    /// Date the record was achieved (YYYY-MM-DD)
    #[serde(default)]
    pub date_achieved: String,
    /// Last modification timestamp (RFC 3339)
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_serializes_to_display_labels() {
        let json = serde_json::to_string(&Distance::HalfMarathon).unwrap();
        assert_eq!(json, "\"Half Marathon\"");

        let parsed: Distance = serde_json::from_str("\"5K\"").unwrap();
        assert_eq!(parsed, Distance::FiveK);
    }

    #[test]
    fn test_distance_rejects_unknown_label() {
        let parsed: Result<Distance, _> = serde_json::from_str("\"50K\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_distance_ordering_shortest_first() {
        let mut shuffled = [Distance::FullMarathon, Distance::OneMile, Distance::TenK];
        shuffled.sort();
        assert_eq!(
            shuffled,
            [Distance::OneMile, Distance::TenK, Distance::FullMarathon]
        );
    }

    #[test]
    fn test_record_round_trips_column_names() {
        let record = PersonalRecord {
            user_id: "u1".to_string(),
            distance: Distance::FiveK,
            time: "19:45".to_string(),
            race_location: "Boston".to_string(),
            date_achieved: "2026-04-20".to_string(),
            updated_at: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["distance"], "5K");
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["time"], "19:45");
    }
}
