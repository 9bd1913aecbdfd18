//! pokerdeck - Review and manage uploaded poker sessions
//!
//! This crate provides the client side of the session-management view:
//! - Decoding of session summaries delivered by the session service
//! - The filter/sort pipeline over those summaries
//! - Bulk selection scoped to the filtered view
//! - An HTTP client for the session service and the view state built on it
//!
//! # Architecture
//!
//! The session service owns storage, log parsing and stat computation. This
//! crate keeps no cache: it fetches the session list, filters and sorts it
//! locally, and refetches after every mutation.

pub mod config;
pub mod dashboard;
pub mod pipeline;
pub mod service;
pub mod session;
pub mod view;

pub use dashboard::{Dashboard, StatusMessage};
pub use pipeline::{
    compare_sessions, filter_and_sort, passes_filters, FilterConfig, SortBy, SortOrder,
};
pub use session::{normalize_players, parse_game_stats, GameStats, SessionId, SessionSummary};
