//! The Delphi oracle for Demigod.
//!
//! Generates prophecies from a demigod's sheet, draws Greek hero and god
//! names, and provides the reveal gate hosts use to pace dramatic results.

/// Oracle error types.
pub mod error;
/// Greek hero and god names.
pub mod names;
/// Template-based prophecies with a caller-owned history.
pub mod prophecy;
/// Delay gate for revealing results.
pub mod reveal;

pub use error::{OracleError, OracleResult};
pub use names::{GeneratedNames, generate_names};
pub use prophecy::{
    Prophecy, ProphecyCatalog, ProphecyHistory, ProphecySubject, generate_prophecy,
};
pub use reveal::{DICE_ROLL_DELAY, PROPHECY_REVEAL_DELAY, RevealGate, RevealTicket};
