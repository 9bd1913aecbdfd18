//! Session filter/sort pipeline
//!
//! Filter categories combine with AND; values inside one category combine
//! with OR. An empty category never excludes anything. Sorting is stable, so
//! sessions with equal timestamps keep their relative input order.

mod catalog;
mod selection;

pub use catalog::{SessionCatalog, KNOWN_GAME_TYPES, KNOWN_TABLE_SIZES};
pub use selection::{Selection, SelectionState};

use crate::session::{parse_timestamp, SessionSummary};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Which timestamp feeds the sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Session start time
    #[default]
    SessionDate,
    UploadDate,
}

impl SortBy {
    fn key<'a>(&self, session: &'a SessionSummary) -> Option<&'a str> {
        match self {
            SortBy::SessionDate => session.start_time.as_deref(),
            SortBy::UploadDate => session.upload_date.as_deref(),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortBy::SessionDate => "session_date",
            SortBy::UploadDate => "upload_date",
        })
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session_date" => Ok(SortBy::SessionDate),
            "upload_date" => Ok(SortBy::UploadDate),
            other => Err(format!(
                "Unknown sort key '{}' (expected session_date or upload_date)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

/// Client-side filter and sort settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub selected_tags: BTreeSet<String>,
    pub selected_players: BTreeSet<String>,
    pub game_types: BTreeSet<String>,
    pub table_sizes: BTreeSet<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_players
            .extend(players.into_iter().map(Into::into));
        self
    }

    pub fn with_game_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.game_types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn with_table_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_sizes.extend(sizes.into_iter().map(Into::into));
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.selected_tags, tag);
    }

    pub fn toggle_player(&mut self, player: &str) {
        toggle(&mut self.selected_players, player);
    }

    pub fn toggle_game_type(&mut self, game_type: &str) {
        toggle(&mut self.game_types, game_type);
    }

    pub fn toggle_table_size(&mut self, size: &str) {
        toggle(&mut self.table_sizes, size);
    }

    /// Drop every filter selection, keeping the sort settings
    pub fn clear_filters(&mut self) {
        self.selected_tags.clear();
        self.selected_players.clear();
        self.game_types.clear();
        self.table_sizes.clear();
    }

    /// Whether any filter category has a selection
    pub fn is_filtering(&self) -> bool {
        !(self.selected_tags.is_empty()
            && self.selected_players.is_empty()
            && self.game_types.is_empty()
            && self.table_sizes.is_empty())
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// True when `selected` is empty or shares at least one value with `values`
fn matches_any<'a>(selected: &BTreeSet<String>, mut values: impl Iterator<Item = &'a str>) -> bool {
    selected.is_empty() || values.any(|value| selected.contains(value))
}

/// Check a session against every active filter category
pub fn passes_filters(session: &SessionSummary, filters: &FilterConfig) -> bool {
    let stats = &session.game_stats;

    matches_any(&filters.selected_tags, session.tags.iter().map(String::as_str))
        && matches_any(
            &filters.selected_players,
            session.players.iter().map(String::as_str),
        )
        && matches_any(&filters.table_sizes, stats.table_size_labels())
        && matches_any(&filters.game_types, stats.game_type_labels())
}

/// Order two sessions by the selected timestamp.
///
/// Missing or unparseable timestamps count as the earliest possible value.
pub fn compare_sessions(
    a: &SessionSummary,
    b: &SessionSummary,
    sort_by: SortBy,
    sort_order: SortOrder,
) -> Ordering {
    let a_ts = sort_by.key(a).and_then(parse_timestamp);
    let b_ts = sort_by.key(b).and_then(parse_timestamp);

    match sort_order {
        SortOrder::Asc => a_ts.cmp(&b_ts),
        SortOrder::Desc => b_ts.cmp(&a_ts),
    }
}

/// Produce the filtered, sorted view of `sessions`. The input is untouched.
pub fn filter_and_sort(sessions: &[SessionSummary], filters: &FilterConfig) -> Vec<SessionSummary> {
    let mut visible: Vec<SessionSummary> = sessions
        .iter()
        .filter(|session| passes_filters(session, filters))
        .cloned()
        .collect();

    visible.sort_by(|a, b| compare_sessions(a, b, filters.sort_by, filters.sort_order));
    visible
}
