//! A single in-flight delay before showing a result.
//!
//! A host asks the gate for a ticket, waits until the ticket is due, then
//! completes it. While a ticket is pending every new request is refused;
//! nothing is queued. The gate never sleeps and never reads the clock
//! itself, so callers pass `now` in.

use std::time::{Duration, Instant};

use crate::error::{OracleError, OracleResult};

/// Delay before a dice roll is shown.
pub const DICE_ROLL_DELAY: Duration = Duration::from_millis(1000);

/// Delay before a prophecy is revealed.
pub const PROPHECY_REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Proof of a pending reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTicket {
    id: u64,
    ready_at: Instant,
}

impl RevealTicket {
    /// When the reveal becomes due.
    pub fn ready_at(&self) -> Instant {
        self.ready_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Idle,
    Pending(RevealTicket),
}

/// Two-phase gate: request, then complete once the delay has passed.
#[derive(Debug, Clone)]
pub struct RevealGate {
    state: GateState,
    issued: u64,
}

impl Default for RevealGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealGate {
    /// An idle gate.
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
            issued: 0,
        }
    }

    /// Start a reveal due `delay` after `now`.
    pub fn request(&mut self, now: Instant, delay: Duration) -> OracleResult<RevealTicket> {
        if self.is_pending() {
            return Err(OracleError::Busy);
        }
        self.issued += 1;
        let ticket = RevealTicket {
            id: self.issued,
            ready_at: now + delay,
        };
        self.state = GateState::Pending(ticket);
        Ok(ticket)
    }

    /// Whether a reveal is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, GateState::Pending(_))
    }

    /// Whether the pending reveal may complete at `now`.
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.state {
            GateState::Pending(ticket) => now >= ticket.ready_at,
            GateState::Idle => false,
        }
    }

    /// Time left on the pending reveal; zero when idle or due.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.state {
            GateState::Pending(ticket) => ticket.ready_at.saturating_duration_since(now),
            GateState::Idle => Duration::ZERO,
        }
    }

    /// Finish the reveal for `ticket` and return to idle.
    pub fn complete(&mut self, ticket: RevealTicket, now: Instant) -> OracleResult<()> {
        match self.state {
            GateState::Pending(pending) if pending == ticket => {
                if now < pending.ready_at {
                    return Err(OracleError::NotReady {
                        remaining: pending.ready_at - now,
                    });
                }
                self.state = GateState::Idle;
                Ok(())
            }
            _ => Err(OracleError::StaleTicket),
        }
    }

    /// Drop the pending reveal. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = GateState::Idle;
        was_pending
    }
}
