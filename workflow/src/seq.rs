//! Request tickets for last-writer-wins response handling.
//!
//! DESIGN
//! ======
//! Every logical stream (analysis submissions, interpretations, chat turns)
//! owns a `RequestStream`. Issuing a request hands out a monotonically
//! increasing `Ticket`; only the most recently issued ticket may be applied,
//! and only once. A response for an older ticket is stale regardless of when
//! it arrives, so ordering follows request issue order, not network timing.

#[cfg(test)]
#[path = "seq_test.rs"]
mod seq_test;

/// Sequence number attached to one outstanding request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Outcome of offering a response to its stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The response was current and has been applied.
    Applied,
    /// A newer request (or an invalidation) superseded this one.
    Stale,
}

impl Resolution {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Ticket dispenser and acceptance gate for one logical stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestStream {
    issued: u64,
    applied: u64,
}

impl RequestStream {
    /// Issue the next ticket, superseding every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Make every outstanding ticket stale without issuing a new request.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }

    /// Whether a response for `ticket` would still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued && ticket.0 > self.applied
    }

    /// Accept the response for `ticket` if it is current.
    pub fn accept(&mut self, ticket: Ticket) -> Resolution {
        if self.is_current(ticket) {
            self.applied = ticket.0;
            Resolution::Applied
        } else {
            Resolution::Stale
        }
    }

    /// Sequence of the last applied response (0 when none).
    #[must_use]
    pub fn last_applied(&self) -> u64 {
        self.applied
    }
}
