//! Dice and combat resolution for Demigod.
//!
//! Provides an injectable random source, a dice resolver with critical and
//! fumble detection, a parser for typed dice expressions, the preset rolls
//! offered next to a character sheet, and the attack/defense calculator.
//! Every resolver is a plain function of its inputs and the random source.

pub mod combat;
pub mod dice;
pub mod error;
pub mod random;

pub use combat::{
    CombatOutcome, DamageRoll, DefenseRoll, WeaponKind, attack_with, resolve_attack,
    resolve_defense,
};
pub use dice::{DiceExpr, DiceRollResult, QuickRoll, RollLog, quick_rolls, roll_dice};
pub use error::{MechError, MechResult};
pub use random::{RandomSource, ScriptedSource};
