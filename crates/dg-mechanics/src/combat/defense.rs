//! Defense rolls.

use std::fmt;

use dg_core::{Attribute, CharacterSheet};
use serde::Serialize;

use crate::dice::{D20, DiceRollResult, roll_dice};
use crate::error::MechResult;
use crate::random::RandomSource;

/// A d20 defense roll with dodge and agility modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefenseRoll {
    /// The raw roll, with both modifiers folded into its total.
    pub roll: DiceRollResult,
    /// `floor(dodge / 5)`.
    pub dodge_modifier: i32,
    /// `floor(agility / 10)`.
    pub agility_modifier: i32,
    /// Final defense value.
    pub total: i32,
    /// One-line summary.
    pub description: String,
}

impl DefenseRoll {
    /// Roll defense for `sheet`.
    pub fn for_sheet(rng: &mut impl RandomSource, sheet: &CharacterSheet) -> MechResult<Self> {
        resolve_defense(
            rng,
            sheet.get(Attribute::Dodge),
            sheet.get(Attribute::Agility),
        )
    }
}

impl fmt::Display for DefenseRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Roll 1d20 + `floor(dodge / 5)` + `floor(agility / 10)`.
pub fn resolve_defense(
    rng: &mut impl RandomSource,
    dodge: u32,
    agility: u32,
) -> MechResult<DefenseRoll> {
    let dodge_modifier = dg_core::attribute_bonus(dodge);
    let agility_modifier = (agility / 10) as i32;
    let roll = roll_dice(rng, D20, 1, dodge_modifier + agility_modifier, "Defense")?;
    let total = roll.total;
    let description = format!(
        "Defense {total} (d20 {} + dodge {dodge_modifier} + agility {agility_modifier})",
        roll.sum
    );
    Ok(DefenseRoll {
        roll,
        dodge_modifier,
        agility_modifier,
        total,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn combines_both_modifiers() {
        let mut rng = ScriptedSource::new(&[12]);
        let defense = resolve_defense(&mut rng, 37, 58).unwrap();
        assert_eq!(defense.dodge_modifier, 7);
        assert_eq!(defense.agility_modifier, 5);
        assert_eq!(defense.total, 24);
        assert_eq!(
            defense.description,
            "Defense 24 (d20 12 + dodge 7 + agility 5)"
        );
    }

    #[test]
    fn zero_attributes_is_bare_d20() {
        let mut rng = ScriptedSource::new(&[20]);
        let defense = resolve_defense(&mut rng, 0, 0).unwrap();
        assert_eq!(defense.total, 20);
        assert!(defense.roll.critical);
    }

    #[test]
    fn reads_sheet() {
        let mut sheet = CharacterSheet::new();
        sheet.set(Attribute::Dodge, 100);
        sheet.set(Attribute::Agility, 100);
        let mut rng = ScriptedSource::new(&[1]);
        let defense = DefenseRoll::for_sheet(&mut rng, &sheet).unwrap();
        assert_eq!(defense.total, 1 + 20 + 10);
    }
}
