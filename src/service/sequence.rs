//! Ordering of session fetches
//!
//! Every fetch takes a ticket before the request goes out. A response is only
//! applied if its ticket is still the latest one issued, so a slow response to
//! an older fetch can never overwrite a newer snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FetchSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the ticket for a new fetch
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued.load(Ordering::SeqCst)
    }

    /// Claim the right to apply the response for `ticket`.
    ///
    /// Returns false for stale tickets and for tickets already applied.
    pub fn accept(&self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.applied.fetch_max(ticket.0, Ordering::SeqCst) < ticket.0
    }
}
