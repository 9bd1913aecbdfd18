//! Lenient decoding of the `players` and `game_stats` payloads

use super::{DecodeError, GameStats};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalize a players payload into a list of names.
///
/// A string is decoded as JSON first. Anything that does not end up as an
/// array yields an empty list; non-string array elements are dropped.
pub fn normalize_players(raw: &Value) -> Vec<String> {
    let decoded;
    let value = match raw {
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(value) => {
                decoded = value;
                &decoded
            }
            Err(e) => {
                tracing::debug!("Ignoring undecodable players payload: {}", e);
                return Vec::new();
            }
        },
        other => other,
    };

    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode a game stats payload, reporting why it could not be used
pub fn decode_game_stats(raw: &Value) -> Result<GameStats, DecodeError> {
    match raw {
        Value::Null => Err(DecodeError::Empty),
        Value::String(encoded) if encoded.trim().is_empty() => Err(DecodeError::Empty),
        Value::String(encoded) => {
            let value: Value = serde_json::from_str(encoded)?;
            decode_game_stats_object(&value)
        }
        other => decode_game_stats_object(other),
    }
}

fn decode_game_stats_object(value: &Value) -> Result<GameStats, DecodeError> {
    if !value.is_object() {
        return Err(DecodeError::UnexpectedShape {
            expected: "object",
            found: kind_of(value),
        });
    }
    Ok(GameStats::deserialize(value)?)
}

/// Decode a game stats payload, falling back to empty maps on any failure
pub fn parse_game_stats(raw: Option<&Value>) -> GameStats {
    let Some(raw) = raw else {
        return GameStats::default();
    };

    match decode_game_stats(raw) {
        Ok(stats) => stats,
        Err(DecodeError::Empty) => GameStats::default(),
        Err(e) => {
            tracing::debug!("Ignoring malformed game stats: {}", e);
            GameStats::default()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(super) fn players_field<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(normalize_players(&raw))
}

pub(super) fn game_stats_field<'de, D>(deserializer: D) -> Result<GameStats, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(parse_game_stats(Some(&raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_players_from_encoded_string() {
        assert_eq!(normalize_players(&json!("[\"A\",\"B\"]")), vec!["A", "B"]);
    }

    #[test]
    fn test_players_from_array() {
        assert_eq!(normalize_players(&json!(["A"])), vec!["A"]);
    }

    #[test]
    fn test_players_invalid_payloads() {
        assert!(normalize_players(&json!("not json")).is_empty());
        assert!(normalize_players(&json!("{\"A\": 1}")).is_empty());
        assert!(normalize_players(&json!(null)).is_empty());
        assert!(normalize_players(&json!(7)).is_empty());
    }

    #[test]
    fn test_players_drop_non_string_entries() {
        assert_eq!(normalize_players(&json!(["A", 3, null, "B"])), vec!["A", "B"]);
    }

    #[test]
    fn test_game_stats_defaults() {
        assert_eq!(parse_game_stats(None), GameStats::default());
        assert_eq!(parse_game_stats(Some(&json!(""))), GameStats::default());
        assert_eq!(parse_game_stats(Some(&json!("not json"))), GameStats::default());
        assert_eq!(parse_game_stats(Some(&json!([1, 2]))), GameStats::default());
        assert_eq!(parse_game_stats(Some(&json!(null))), GameStats::default());
    }

    #[test]
    fn test_game_stats_from_object_and_string() {
        let object = json!({
            "game_types": {"PLO": {"percentage": 40.0}},
            "table_sizes": {"9": {"percentage": 60.0}}
        });
        let encoded = Value::String(object.to_string());

        let from_object = parse_game_stats(Some(&object));
        let from_string = parse_game_stats(Some(&encoded));

        assert_eq!(from_object, from_string);
        assert_eq!(from_object.game_types["PLO"].percentage, 40.0);
        assert_eq!(from_object.table_sizes["9"].percentage, 60.0);
    }

    #[test]
    fn test_game_stats_partial_object() {
        let stats = parse_game_stats(Some(&json!({"game_types": {"NLHE": {"percentage": 1}}})));
        assert!(stats.table_sizes.is_empty());
        assert_eq!(stats.game_types.len(), 1);
    }

    #[test]
    fn test_decode_game_stats_reports_errors() {
        assert!(matches!(decode_game_stats(&json!("")), Err(DecodeError::Empty)));
        assert!(matches!(
            decode_game_stats(&json!("{oops")),
            Err(DecodeError::InvalidJson(_))
        ));
        assert!(matches!(
            decode_game_stats(&json!(3)),
            Err(DecodeError::UnexpectedShape { found: "number", .. })
        ));
    }
}
