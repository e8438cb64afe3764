//! Error types for dice and combat resolution.

/// Errors that can occur while rolling or resolving combat.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A roll was requested with zero dice or zero-sided dice.
    #[error("invalid roll: {0}")]
    InvalidRoll(String),

    /// Typed dice notation did not match `[count]d<sides>[+/-modifier]`.
    #[error("invalid dice expression \"{input}\": {reason}")]
    InvalidExpression {
        /// The text as typed.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// No preset roll has this name.
    #[error("unknown quick roll: {0}")]
    UnknownQuickRoll(String),

    /// The weapon name is not one of melee, ranged, unarmed, magic.
    #[error("unknown weapon: {0} (expected melee, ranged, unarmed, or magic)")]
    UnknownWeapon(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
