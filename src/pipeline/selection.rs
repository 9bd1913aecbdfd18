//! Bulk-action selection, always scoped to the filtered view

use crate::session::{SessionId, SessionSummary};

/// Checkbox state of the "select all" control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Partial,
    All,
}

/// Selected session ids, in selection order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<SessionId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[SessionId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.ids.contains(id)
    }

    /// Add the id if absent, remove it otherwise
    pub fn toggle(&mut self, id: SessionId) {
        if let Some(pos) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection with every session in `visible`
    pub fn select_all(&mut self, visible: &[SessionSummary]) {
        self.ids = visible.iter().map(|s| s.id.clone()).collect();
    }

    /// Forget ids that are no longer part of `visible`
    pub fn retain_visible(&mut self, visible: &[SessionSummary]) {
        self.ids
            .retain(|id| visible.iter().any(|session| session.id == *id));
    }

    pub fn state(&self, visible: &[SessionSummary]) -> SelectionState {
        if self.ids.is_empty() || visible.is_empty() {
            SelectionState::None
        } else if self.ids.len() >= visible.len()
            && visible.iter().all(|session| self.contains(&session.id))
        {
            SelectionState::All
        } else {
            SelectionState::Partial
        }
    }

    /// Label for the select-all control
    pub fn summary(&self, visible: &[SessionSummary]) -> String {
        if self.ids.is_empty() {
            format!("Select all ({})", visible.len())
        } else {
            format!("Selected {} of {}", self.ids.len(), visible.len())
        }
    }
}
