//! Session summaries as delivered by the session service
//!
//! The service hands back loosely shaped records: `players` may be a JSON
//! string or an array, `game_stats` may be a JSON string, an object, or
//! missing. Everything is normalized here, once, while deserializing, so the
//! rest of the crate only ever sees the typed forms below.

mod decode;
mod time;

pub use decode::{decode_game_stats, normalize_players, parse_game_stats};
pub use time::parse_timestamp;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while decoding semi-structured session payloads
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Payload is empty")]
    Empty,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected payload shape: expected {expected}, got {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

/// Session identifier. The service uses integer keys, but string ids are
/// accepted and carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionId {
    Int(i64),
    Text(String),
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionId::Int(id) => write!(f, "{}", id),
            SessionId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        SessionId::Int(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::Text(id.to_string())
    }
}

impl std::str::FromStr for SessionId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes an integer id, anything else a string id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(id) => SessionId::Int(id),
            Err(_) => SessionId::Text(s.to_string()),
        })
    }
}

/// Share of a session's hands that fell into one game type or table size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Share {
    #[serde(default)]
    pub percentage: f64,
}

/// Per-session breakdown of game types and table sizes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    pub game_types: BTreeMap<String, Share>,

    #[serde(default)]
    pub table_sizes: BTreeMap<String, Share>,
}

impl GameStats {
    pub fn is_empty(&self) -> bool {
        self.game_types.is_empty() && self.table_sizes.is_empty()
    }

    /// Game type labels present in this session
    pub fn game_type_labels(&self) -> impl Iterator<Item = &str> {
        self.game_types.keys().map(String::as_str)
    }

    /// Table size labels present in this session
    pub fn table_size_labels(&self) -> impl Iterator<Item = &str> {
        self.table_sizes.keys().map(String::as_str)
    }
}

fn default_active() -> bool {
    true
}

/// One uploaded session, summarized by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    /// Uploaded file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,

    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default)]
    pub upload_date: Option<String>,

    #[serde(default = "default_active", deserialize_with = "null_as_active")]
    pub is_active: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "decode::players_field")]
    pub players: Vec<String>,

    #[serde(default, deserialize_with = "decode::game_stats_field")]
    pub game_stats: GameStats,

    /// Server-computed metrics and any other fields, kept opaque
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionSummary {
    pub fn new(id: impl Into<SessionId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            file_id: None,
            start_time: None,
            end_time: None,
            upload_date: None,
            is_active: true,
            tags: Vec::new(),
            players: Vec::new(),
            game_stats: GameStats::default(),
            extra: Map::new(),
        }
    }

    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn with_upload_date(mut self, upload_date: impl Into<String>) -> Self {
        self.upload_date = Some(upload_date.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players = players.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_game_stats(mut self, game_stats: GameStats) -> Self {
        self.game_stats = game_stats;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_service_record() {
        let session: SessionSummary = serde_json::from_value(json!({
            "id": 42,
            "display_name": "January 5, 2024 3:04PM",
            "file_id": "poker_now_log.csv",
            "upload_date": "January 6, 2024 9:00AM",
            "start_time": "2024-01-05T23:04:00+00:00",
            "end_time": "2024-01-06T02:10:00+00:00",
            "is_active": false,
            "tags": ["home game"],
            "players": "[\"alice\", \"bob\"]",
            "game_stats": "{\"game_types\": {\"NLHE\": {\"percentage\": 75.0}}, \"table_sizes\": {\"6\": {\"percentage\": 100}}}",
            "vpip": 24.5
        }))
        .unwrap();

        assert_eq!(session.id, SessionId::Int(42));
        assert!(!session.is_active);
        assert_eq!(session.players, vec!["alice", "bob"]);
        assert_eq!(session.game_stats.game_types["NLHE"].percentage, 75.0);
        assert!(session.game_stats.table_sizes.contains_key("6"));
        assert_eq!(session.extra.get("vpip"), Some(&json!(24.5)));
    }

    #[test]
    fn test_decode_sparse_record() {
        let session: SessionSummary = serde_json::from_value(json!({
            "id": "abc",
            "tags": null,
            "players": "not json",
            "game_stats": null
        }))
        .unwrap();

        assert_eq!(session.id, SessionId::Text("abc".into()));
        assert!(session.is_active);
        assert!(session.tags.is_empty());
        assert!(session.players.is_empty());
        assert!(session.game_stats.is_empty());
    }

    #[test]
    fn test_session_id_from_str() {
        assert_eq!("17".parse::<SessionId>().unwrap(), SessionId::Int(17));
        assert_eq!(
            "s-17".parse::<SessionId>().unwrap(),
            SessionId::Text("s-17".into())
        );
        assert_eq!(SessionId::Int(17).to_string(), "17");
    }
}
