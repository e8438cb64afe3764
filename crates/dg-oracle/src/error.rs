//! Oracle error types.

use std::time::Duration;

/// Errors raised by the oracle.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// A prophecy catalog was built with no templates.
    #[error("prophecy catalog has no templates")]
    EmptyCatalog,

    /// A word list in a prophecy catalog has no entries.
    #[error("word list \"{0}\" is empty")]
    EmptyWordList(String),

    /// A reveal was requested while another is still pending.
    #[error("the oracle is already revealing")]
    Busy,

    /// A reveal was completed before its delay elapsed.
    #[error("reveal not ready for another {}ms", .remaining.as_millis())]
    NotReady {
        /// Time left before the reveal may complete.
        remaining: Duration,
    },

    /// A reveal ticket was cancelled or already completed.
    #[error("reveal ticket is no longer pending")]
    StaleTicket,
}

/// Convenience result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;
