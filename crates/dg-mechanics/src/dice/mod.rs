//! Dice rolling and roll results.
//!
//! [`roll_dice`] is the single entry point: it rolls `count` dice of `sides`
//! faces, sums them, applies a modifier, and flags criticals and fumbles on
//! d20 rolls. Typed notation is parsed by [`DiceExpr`] before anything is
//! rolled, so malformed input never reaches the resolver.

pub mod expr;
pub mod log;
pub mod quick;

pub use expr::{DiceExpr, MAX_COUNT, MAX_SIDES};
pub use log::RollLog;
pub use quick::{QuickRoll, quick_rolls};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::random::RandomSource;

/// The only die type on which criticals and fumbles exist.
pub const D20: u32 = 20;

/// The result of one roll of a group of dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResult {
    /// Face shown by each die, in roll order.
    pub dice: Vec<u32>,
    /// Number of faces on the dice rolled.
    pub sides: u32,
    /// Sum of the faces.
    pub sum: u32,
    /// Flat modifier added to the sum.
    pub modifier: i32,
    /// `sum + modifier`.
    pub total: i32,
    /// What the roll was for.
    pub label: String,
    /// A d20 roll with at least one natural 20.
    pub critical: bool,
    /// A d20 roll with at least one natural 1.
    pub fumble: bool,
}

impl DiceRollResult {
    /// Build a result from faces already rolled.
    pub fn from_faces(sides: u32, dice: Vec<u32>, modifier: i32, label: impl Into<String>) -> Self {
        let sum = dice.iter().fold(0u32, |acc, &d| acc.saturating_add(d));
        let is_d20 = sides == D20;
        let critical = is_d20 && dice.contains(&D20);
        let fumble = is_d20 && dice.contains(&1);
        Self {
            total: i32::try_from(sum)
                .unwrap_or(i32::MAX)
                .saturating_add(modifier),
            dice,
            sides,
            sum,
            modifier,
            label: label.into(),
            critical,
            fumble,
        }
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// The notation this roll was made with, e.g. `2d6+3`.
    pub fn expr(&self) -> DiceExpr {
        DiceExpr {
            count: self.dice.len() as u32,
            sides: self.sides,
            modifier: self.modifier,
        }
    }
}

impl std::fmt::Display for DiceRollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", values.join(", "))?;
        match self.modifier {
            0 => {}
            m if m > 0 => write!(f, " + {m}")?,
            m => write!(f, " - {}", m.unsigned_abs())?,
        }
        write!(f, " = {}", self.total)
    }
}

/// Roll `count` dice with `sides` faces and add `modifier`.
///
/// `sides` must be in `1..=MAX_SIDES` and `count` in `1..=MAX_COUNT`.
pub fn roll_dice(
    rng: &mut impl RandomSource,
    sides: u32,
    count: u32,
    modifier: i32,
    label: impl Into<String>,
) -> MechResult<DiceRollResult> {
    if sides == 0 {
        return Err(MechError::InvalidRoll("dice need at least one side".to_string()));
    }
    if count == 0 {
        return Err(MechError::InvalidRoll("roll at least one die".to_string()));
    }
    if sides > MAX_SIDES {
        return Err(MechError::InvalidRoll(format!(
            "dice have at most {MAX_SIDES} sides, got {sides}"
        )));
    }
    if count > MAX_COUNT {
        return Err(MechError::InvalidRoll(format!(
            "roll at most {MAX_COUNT} dice, got {count}"
        )));
    }

    let dice = (0..count).map(|_| rng.roll(sides)).collect();
    Ok(DiceRollResult::from_faces(sides, dice, modifier, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sums_and_applies_modifier() {
        let mut rng = ScriptedSource::new(&[4, 2]);
        let r = roll_dice(&mut rng, 6, 2, 3, "2d6+3").unwrap();
        assert_eq!(r.dice, vec![4, 2]);
        assert_eq!(r.sum, 6);
        assert_eq!(r.modifier, 3);
        assert_eq!(r.total, 9);
        assert_eq!(r.label, "2d6+3");
        assert!(!r.critical);
        assert!(!r.fumble);
    }

    #[test]
    fn negative_modifier_can_go_below_zero() {
        let mut rng = ScriptedSource::new(&[1]);
        let r = roll_dice(&mut rng, 4, 1, -3, "").unwrap();
        assert_eq!(r.total, -2);
    }

    #[test]
    fn natural_twenty_is_critical() {
        let mut rng = ScriptedSource::new(&[20]);
        let r = roll_dice(&mut rng, 20, 1, 0, "d20").unwrap();
        assert!(r.critical);
        assert!(!r.fumble);
    }

    #[test]
    fn natural_one_is_fumble() {
        let mut rng = ScriptedSource::new(&[1]);
        let r = roll_dice(&mut rng, 20, 1, 5, "d20").unwrap();
        assert!(r.fumble);
        assert!(!r.critical);
    }

    #[test]
    fn critical_and_fumble_together_need_two_dice() {
        let mut rng = ScriptedSource::new(&[20, 1]);
        let r = roll_dice(&mut rng, 20, 2, 0, "2d20").unwrap();
        assert!(r.critical);
        assert!(r.fumble);
    }

    #[test]
    fn only_d20_gets_flags() {
        // a 1 and a max face on a d6 mean nothing
        let mut rng = ScriptedSource::new(&[1, 6]);
        let r = roll_dice(&mut rng, 6, 2, 0, "2d6").unwrap();
        assert!(!r.critical);
        assert!(!r.fumble);
        // a 20 on a d100 is just a 20
        let mut rng = ScriptedSource::new(&[20]);
        let r = roll_dice(&mut rng, 100, 1, 0, "d100").unwrap();
        assert!(!r.critical);
    }

    #[test]
    fn zero_inputs_are_rejected() {
        let mut rng = ScriptedSource::default();
        assert!(matches!(
            roll_dice(&mut rng, 0, 1, 0, ""),
            Err(MechError::InvalidRoll(_))
        ));
        assert!(matches!(
            roll_dice(&mut rng, 6, 0, 0, ""),
            Err(MechError::InvalidRoll(_))
        ));
    }

    #[test]
    fn oversized_rolls_are_rejected() {
        let mut rng = ScriptedSource::new(&[u32::MAX - 1]);
        assert!(matches!(
            roll_dice(&mut rng, u32::MAX, 2, 0, "big"),
            Err(MechError::InvalidRoll(_))
        ));
        assert!(matches!(
            roll_dice(&mut rng, 6, MAX_COUNT + 1, 0, ""),
            Err(MechError::InvalidRoll(_))
        ));
        assert_eq!(rng.consumed(), 0);

        // the limits themselves are fine
        let mut rng = ScriptedSource::new(&[MAX_SIDES]);
        let r = roll_dice(&mut rng, MAX_SIDES, MAX_COUNT, 0, "").unwrap();
        assert_eq!(r.sum, MAX_SIDES * MAX_COUNT);
        assert_eq!(r.total, 100_000);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let r = DiceRollResult::from_faces(u32::MAX, vec![u32::MAX, u32::MAX], i32::MAX, "");
        assert_eq!(r.sum, u32::MAX);
        assert_eq!(r.total, i32::MAX);
        let r = DiceRollResult::from_faces(20, vec![1], i32::MIN, "");
        assert_eq!(r.total, i32::MIN + 1);
    }

    #[test]
    fn display() {
        let r = DiceRollResult::from_faces(6, vec![3, 5], 2, "");
        assert_eq!(r.to_string(), "[3, 5] + 2 = 10");
        let r = DiceRollResult::from_faces(6, vec![3], -1, "");
        assert_eq!(r.to_string(), "[3] - 1 = 2");
        let r = DiceRollResult::from_faces(20, vec![11], 0, "");
        assert_eq!(r.to_string(), "[11] = 11");
    }

    #[test]
    fn expr_reflects_roll() {
        let r = DiceRollResult::from_faces(8, vec![3, 5], -2, "");
        assert_eq!(r.expr().to_string(), "2d8-2");
    }

    proptest! {
        #[test]
        fn sum_within_bounds(sides in 1u32..=100, count in 1u32..=20, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let r = roll_dice(&mut rng, sides, count, 0, "").unwrap();
            prop_assert_eq!(r.dice.len(), count as usize);
            prop_assert!(r.sum >= count);
            prop_assert!(r.sum <= sides * count);
            prop_assert!(r.dice.iter().all(|d| (1..=sides).contains(d)));
        }

        #[test]
        fn total_is_sum_plus_modifier(count in 1u32..=10, modifier in -50i32..=50, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let r = roll_dice(&mut rng, 20, count, modifier, "").unwrap();
            prop_assert_eq!(r.total, r.sum as i32 + modifier);
        }

        #[test]
        fn flags_match_faces(sides in 1u32..=30, count in 1u32..=6, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let r = roll_dice(&mut rng, sides, count, 0, "").unwrap();
            prop_assert_eq!(r.critical, sides == 20 && r.dice.contains(&20));
            prop_assert_eq!(r.fumble, sides == 20 && r.dice.contains(&1));
            if count == 1 {
                prop_assert!(!(r.critical && r.fumble));
            }
        }
    }
}
