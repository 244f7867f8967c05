//! Save/load of run state
//!
//! One JSON envelope per player under a fixed key, written on every mutating
//! tracker operation. Loading is lenient: a missing or malformed field is
//! repaired with its default instead of rejecting the whole save, so a
//! partially corrupted envelope still restores everything it can.

use serde_json::Value;

use crate::stats::CompletionRecord;

/// Fixed storage key for the per-player save envelope.
pub const SAVE_KEY: &str = "jumping-up-game-save";

/// Serialized form of the tracker's run state plus a save timestamp.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SaveData {
    pub current_level: u32,
    pub deaths: u32,
    pub jumps: u32,
    pub total_deaths: u32,
    pub total_jumps: u32,
    pub level_times: Vec<f64>,
    pub completed_levels: Vec<CompletionRecord>,
    pub elapsed_ms: f64,
    /// Epoch milliseconds at save time
    pub saved_at: f64,
}

impl SaveData {
    /// Encode to the JSON envelope.
    pub fn encode(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    /// Decode leniently. Returns `None` only when the text is not a JSON
    /// object at all; otherwise every field is extracted independently and
    /// falls back to its default. Malformed completion records are dropped,
    /// the rest keep their order.
    pub fn decode(json: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(json).ok()?;
        let obj = value.as_object()?;

        let completed_levels = obj
            .get("completed_levels")
            .and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .filter_map(|r| serde_json::from_value(r.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        let level_times = obj
            .get("level_times")
            .and_then(Value::as_array)
            .map(|times| times.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default();

        Some(Self {
            current_level: u32_field(obj, "current_level"),
            deaths: u32_field(obj, "deaths"),
            jumps: u32_field(obj, "jumps"),
            total_deaths: u32_field(obj, "total_deaths"),
            total_jumps: u32_field(obj, "total_jumps"),
            level_times,
            completed_levels,
            elapsed_ms: f64_field(obj, "elapsed_ms"),
            saved_at: f64_field(obj, "saved_at"),
        })
    }
}

fn u32_field(obj: &serde_json::Map<String, Value>, key: &str) -> u32 {
    obj.get(key)
        .and_then(Value::as_u64)
        .map(|v| v.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

fn f64_field(obj: &serde_json::Map<String, Value>, key: &str) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let data = SaveData {
            current_level: 3,
            deaths: 2,
            jumps: 14,
            total_deaths: 9,
            total_jumps: 40,
            level_times: vec![12_000.0, 8_500.0],
            completed_levels: vec![CompletionRecord {
                level_id: 1,
                name: "First Steps".to_string(),
                deaths: 4,
                jumps: 11,
                time: 12_000.0,
                completed_at: 1_700_000_000_000.0,
                collected_bonus: true,
            }],
            elapsed_ms: 4_321.0,
            saved_at: 1_700_000_100_000.0,
        };

        let decoded = SaveData::decode(&data.encode().unwrap()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn missing_fields_default() {
        let decoded = SaveData::decode(r#"{"current_level": 5}"#).unwrap();
        assert_eq!(decoded.current_level, 5);
        assert_eq!(decoded.deaths, 0);
        assert_eq!(decoded.total_jumps, 0);
        assert!(decoded.completed_levels.is_empty());
        assert_eq!(decoded.elapsed_ms, 0.0);
    }

    #[test]
    fn malformed_fields_are_repaired_per_field() {
        let decoded = SaveData::decode(
            r#"{"current_level": "three", "total_deaths": 7, "level_times": "soon"}"#,
        )
        .unwrap();
        assert_eq!(decoded.current_level, 0);
        assert_eq!(decoded.total_deaths, 7);
        assert!(decoded.level_times.is_empty());
    }

    #[test]
    fn malformed_records_are_dropped_order_preserved() {
        let json = r#"{"completed_levels": [
            {"level_id": 1, "name": "a", "deaths": 1, "jumps": 2, "time": 3.0,
             "completed_at": 4.0, "collected_bonus": false},
            "not a record",
            {"level_id": 2, "name": "b", "deaths": 1, "jumps": 2, "time": 3.0,
             "completed_at": 4.0, "collected_bonus": true}
        ]}"#;
        let decoded = SaveData::decode(json).unwrap();
        assert_eq!(decoded.completed_levels.len(), 2);
        assert_eq!(decoded.completed_levels[0].level_id, 1);
        assert_eq!(decoded.completed_levels[1].level_id, 2);
    }

    #[test]
    fn corrupt_json_is_rejected_whole() {
        assert!(SaveData::decode("{ not json").is_none());
        assert!(SaveData::decode("42").is_none());
    }
}
