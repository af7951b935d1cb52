//! Ordering guard for list renders.
//!
//! Every list request takes a ticket when it is issued. A response may only
//! render if its ticket is newer than the last one rendered, so a slow
//! response to an older search can never replace a newer result.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct ListSequencer {
    issued: Cell<u64>,
    rendered: Cell<u64>,
}

impl ListSequencer {
    pub fn issue(&self) -> u64 {
        let ticket = self.issued.get() + 1;
        self.issued.set(ticket);
        ticket
    }

    /// Claim the list for `ticket`. Returns false for stale tickets.
    pub fn accept(&self, ticket: u64) -> bool {
        if ticket <= self.rendered.get() {
            return false;
        }
        self.rendered.set(ticket);
        true
    }
}
