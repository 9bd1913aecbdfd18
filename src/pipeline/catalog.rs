//! Filter options offered for a set of sessions

use crate::session::SessionSummary;
use std::collections::{BTreeSet, HashSet};

/// Game types always offered by the game type filter
pub const KNOWN_GAME_TYPES: &[&str] = &["NLHE", "PLO"];

/// Table sizes always offered by the table size filter
pub const KNOWN_TABLE_SIZES: &[&str] = &["2", "3", "4", "5", "6", "7", "8", "9", "10"];

/// Everything the filter menus can offer for the current snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionCatalog {
    /// Tags in first-seen order
    pub tags: Vec<String>,

    /// Player names, de-duplicated and sorted
    pub players: Vec<String>,

    pub game_types: Vec<String>,

    /// Table sizes, numerically ordered where possible
    pub table_sizes: Vec<String>,
}

impl SessionCatalog {
    pub fn from_sessions(sessions: &[SessionSummary]) -> Self {
        let mut seen_tags = HashSet::new();
        let mut tags = Vec::new();
        let mut players = BTreeSet::new();
        let mut game_types: BTreeSet<String> =
            KNOWN_GAME_TYPES.iter().map(|t| t.to_string()).collect();
        let mut table_sizes: BTreeSet<String> =
            KNOWN_TABLE_SIZES.iter().map(|s| s.to_string()).collect();

        for session in sessions {
            for tag in &session.tags {
                if seen_tags.insert(tag.as_str()) {
                    tags.push(tag.clone());
                }
            }
            players.extend(session.players.iter().cloned());
            game_types.extend(session.game_stats.game_types.keys().cloned());
            table_sizes.extend(session.game_stats.table_sizes.keys().cloned());
        }

        let mut table_sizes: Vec<String> = table_sizes.into_iter().collect();
        table_sizes.sort_by(|a, b| match (a.parse::<u32>(), b.parse::<u32>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });

        Self {
            tags,
            players: players.into_iter().collect(),
            game_types: game_types.into_iter().collect(),
            table_sizes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameStats, Share};

    #[test]
    fn test_tags_first_seen_order() {
        let sessions = vec![
            SessionSummary::new(1, "a").with_tags(["online", "deep"]),
            SessionSummary::new(2, "b").with_tags(["live", "online"]),
        ];
        let catalog = SessionCatalog::from_sessions(&sessions);
        assert_eq!(catalog.tags, vec!["online", "deep", "live"]);
    }

    #[test]
    fn test_players_sorted_unique() {
        let sessions = vec![
            SessionSummary::new(1, "a").with_players(["zed", "amy"]),
            SessionSummary::new(2, "b").with_players(["amy", "kim"]),
        ];
        let catalog = SessionCatalog::from_sessions(&sessions);
        assert_eq!(catalog.players, vec!["amy", "kim", "zed"]);
    }

    #[test]
    fn test_stat_options_merge_known_values() {
        let mut stats = GameStats::default();
        stats
            .game_types
            .insert("Omaha Hi-Lo".into(), Share { percentage: 10.0 });
        stats
            .table_sizes
            .insert("11".into(), Share { percentage: 10.0 });
        let sessions = vec![SessionSummary::new(1, "a").with_game_stats(stats)];

        let catalog = SessionCatalog::from_sessions(&sessions);
        assert_eq!(catalog.game_types, vec!["NLHE", "Omaha Hi-Lo", "PLO"]);
        assert_eq!(catalog.table_sizes.first().map(String::as_str), Some("2"));
        assert_eq!(catalog.table_sizes.last().map(String::as_str), Some("11"));
    }

    #[test]
    fn test_empty_snapshot() {
        let catalog = SessionCatalog::from_sessions(&[]);
        assert!(catalog.tags.is_empty());
        assert!(catalog.players.is_empty());
        assert_eq!(catalog.table_sizes.len(), KNOWN_TABLE_SIZES.len());
    }
}
