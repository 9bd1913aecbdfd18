//! Session-management view state
//!
//! Holds the latest snapshot fetched from the service together with the
//! filter settings and the bulk selection. There is no local cache: every
//! mutation is followed by a fresh fetch, and the selection is always scoped
//! to the filtered view.

use crate::pipeline::{filter_and_sort, FilterConfig, SessionCatalog, Selection, SelectionState};
use crate::service::{BulkOutcome, FetchSequencer, FetchTicket, ServiceError, SessionClient};
use crate::session::{SessionId, SessionSummary};

/// Message shown to the user after the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }
}

pub struct Dashboard {
    client: SessionClient,
    sequencer: FetchSequencer,
    sessions: Vec<SessionSummary>,
    catalog: SessionCatalog,
    filters: FilterConfig,
    selection: Selection,
    status: Option<StatusMessage>,
}

impl Dashboard {
    pub fn new(client: SessionClient, filters: FilterConfig) -> Self {
        Self {
            client,
            sequencer: FetchSequencer::new(),
            sessions: Vec::new(),
            catalog: SessionCatalog::default(),
            filters,
            selection: Selection::new(),
            status: None,
        }
    }

    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    /// Latest unfiltered snapshot
    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn catalog(&self) -> &SessionCatalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Replace the filters and drop selected ids that are no longer visible
    pub fn set_filters(&mut self, filters: FilterConfig) {
        self.filters = filters;
        let visible = self.visible();
        self.selection.retain_visible(&visible);
    }

    /// Filtered, sorted view of the snapshot
    pub fn visible(&self) -> Vec<SessionSummary> {
        filter_and_sort(&self.sessions, &self.filters)
    }

    /// Start a fetch; pass the ticket to [`Dashboard::apply_snapshot`]
    pub fn begin_refresh(&self) -> FetchTicket {
        self.sequencer.begin()
    }

    /// Install a fetched snapshot unless a newer fetch has been started since
    pub fn apply_snapshot(&mut self, ticket: FetchTicket, sessions: Vec<SessionSummary>) -> bool {
        if !self.sequencer.accept(ticket) {
            tracing::warn!(
                "Discarding stale session snapshot (ticket {})",
                ticket.value()
            );
            return false;
        }

        self.catalog = SessionCatalog::from_sessions(&sessions);
        self.sessions = sessions;
        let visible = self.visible();
        self.selection.retain_visible(&visible);
        true
    }

    /// Fetch the session list and install it
    pub async fn refresh(&mut self) -> Result<(), ServiceError> {
        let ticket = self.begin_refresh();
        match self.client.fetch_sessions().await {
            Ok(sessions) => {
                self.apply_snapshot(ticket, sessions);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching sessions: {}", e);
                self.status = Some(StatusMessage::Error(format!(
                    "Error fetching sessions: {}",
                    e
                )));
                Err(e)
            }
        }
    }

    pub fn toggle_selected(&mut self, id: SessionId) {
        self.selection.toggle(id);
    }

    /// Select every session in the filtered view, and nothing else
    pub fn select_all(&mut self) {
        let visible = self.visible();
        self.selection.select_all(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state(&self.visible())
    }

    pub fn selection_summary(&self) -> String {
        self.selection.summary(&self.visible())
    }

    pub async fn add_tag(&mut self, id: &SessionId, tag: &str) -> Result<(), ServiceError> {
        let result = self.client.add_tag(id, tag).await;
        self.finish(result, format!("Tagged session {} with '{}'", id, tag.trim()))
            .await
    }

    pub async fn remove_tag(&mut self, id: &SessionId, tag: &str) -> Result<(), ServiceError> {
        let result = self.client.remove_tag(id, tag).await;
        self.finish(result, format!("Removed tag '{}' from session {}", tag, id))
            .await
    }

    /// Flip a session's visibility based on the current snapshot
    pub async fn toggle_active(&mut self, id: &SessionId) -> Result<bool, ServiceError> {
        let current = self
            .sessions
            .iter()
            .find(|session| session.id == *id)
            .map(|session| session.is_active)
            .ok_or_else(|| ServiceError::InvalidRequest(format!("unknown session {}", id)))?;

        let active = !current;
        let result = self.client.set_active(id, active).await;
        let verb = if active { "Showing" } else { "Hiding" };
        self.finish(result, format!("{} session {}", verb, id)).await?;
        Ok(active)
    }

    pub async fn delete_session(&mut self, id: &SessionId) -> Result<(), ServiceError> {
        let result = self.client.delete_session(id).await;
        if result.is_ok() && self.selection.contains(id) {
            self.selection.toggle(id.clone());
        }
        self.finish(result, format!("Deleted session {}", id)).await
    }

    /// Tag every selected session, then clear the selection
    pub async fn bulk_add_tag(&mut self, tag: &str) -> Result<(), ServiceError> {
        let ids = self.selection.ids().to_vec();
        let result = self.client.bulk_add_tag(&ids, tag).await;
        self.selection.clear();
        self.finish(
            result,
            format!("Tagged {} session(s) with '{}'", ids.len(), tag.trim()),
        )
        .await
    }

    /// Show or hide every selected session, then clear the selection
    pub async fn bulk_set_visibility(&mut self, active: bool) -> Result<BulkOutcome, ServiceError> {
        let ids = self.selected_ids()?;
        let outcome = self.client.bulk_set_active(&ids, active).await;
        let verb = if active { "Showed" } else { "Hid" };
        self.finish_bulk(outcome, verb).await
    }

    /// Delete every selected session, then clear the selection
    pub async fn bulk_delete(&mut self) -> Result<BulkOutcome, ServiceError> {
        let ids = self.selected_ids()?;
        let outcome = self.client.bulk_delete(&ids).await;
        self.finish_bulk(outcome, "Deleted").await
    }

    fn selected_ids(&self) -> Result<Vec<SessionId>, ServiceError> {
        if self.selection.is_empty() {
            return Err(ServiceError::InvalidRequest("no sessions selected".to_string()));
        }
        Ok(self.selection.ids().to_vec())
    }

    async fn finish(&mut self, result: Result<(), ServiceError>, done: String) -> Result<(), ServiceError> {
        match result {
            Ok(()) => {
                self.status = Some(StatusMessage::Info(done));
                self.refresh_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                self.status = Some(StatusMessage::Error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn finish_bulk(&mut self, outcome: BulkOutcome, verb: &str) -> Result<BulkOutcome, ServiceError> {
        self.selection.clear();
        let message = outcome.describe(verb);
        self.status = Some(if outcome.is_complete() {
            StatusMessage::Info(message)
        } else {
            StatusMessage::Error(message)
        });

        if !outcome.succeeded.is_empty() {
            self.refresh_after_mutation().await;
        }
        Ok(outcome)
    }

    /// Refetch after a mutation that already went through. A failed refetch
    /// is appended to the mutation's status instead of replacing it.
    async fn refresh_after_mutation(&mut self) {
        let done = self
            .status
            .as_ref()
            .map(|status| status.text().to_string())
            .unwrap_or_default();
        if let Err(e) = self.refresh().await {
            self.status = Some(StatusMessage::Error(format!(
                "{}; refresh failed: {}",
                done, e
            )));
        }
    }
}
