//! Preset rolls offered next to a character sheet.
//!
//! Attribute tests roll 1d20 plus the attribute bonus; melee attack uses the
//! melee weapons skill and magic power rolls 2d8 plus the magic bonus. The
//! stock dice (d20, 2d6, d10) carry no modifier.

use dg_core::{Attribute, CharacterSheet};
use serde::Serialize;

use super::{DiceExpr, DiceRollResult};
use crate::error::{MechError, MechResult};
use crate::random::RandomSource;

/// A named roll with its modifier already resolved against a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickRoll {
    /// Short handle used on the command line, e.g. `strength`, `2d6`.
    pub id: &'static str,
    /// Label shown with the result.
    pub label: &'static str,
    /// Attribute supplying the modifier, if any.
    pub attribute: Option<Attribute>,
    /// What to roll.
    pub expr: DiceExpr,
}

impl QuickRoll {
    /// Roll it.
    pub fn roll(&self, rng: &mut impl RandomSource) -> MechResult<DiceRollResult> {
        let mut result = self.expr.roll(rng)?;
        result.label = self.label.to_string();
        Ok(result)
    }

    /// Find a preset by id or label, ignoring case and surrounding space.
    pub fn find(sheet: &CharacterSheet, name: &str) -> MechResult<QuickRoll> {
        let wanted = name.trim().to_lowercase();
        quick_rolls(sheet)
            .into_iter()
            .find(|q| q.id == wanted || q.label.to_lowercase() == wanted)
            .ok_or_else(|| MechError::UnknownQuickRoll(name.trim().to_string()))
    }
}

struct Preset {
    id: &'static str,
    label: &'static str,
    attribute: Option<Attribute>,
    count: u32,
    sides: u32,
}

const PRESETS: &[Preset] = &[
    Preset {
        id: "strength",
        label: "Strength test",
        attribute: Some(Attribute::Strength),
        count: 1,
        sides: 20,
    },
    Preset {
        id: "dexterity",
        label: "Dexterity test",
        attribute: Some(Attribute::Dexterity),
        count: 1,
        sides: 20,
    },
    Preset {
        id: "intelligence",
        label: "Intelligence test",
        attribute: Some(Attribute::Intelligence),
        count: 1,
        sides: 20,
    },
    Preset {
        id: "charisma",
        label: "Charisma test",
        attribute: Some(Attribute::Charisma),
        count: 1,
        sides: 20,
    },
    Preset {
        id: "melee",
        label: "Melee attack",
        attribute: Some(Attribute::MeleeWeapons),
        count: 1,
        sides: 20,
    },
    Preset {
        id: "magic",
        label: "Magic power",
        attribute: Some(Attribute::Magic),
        count: 2,
        sides: 8,
    },
    Preset {
        id: "d20",
        label: "D20",
        attribute: None,
        count: 1,
        sides: 20,
    },
    Preset {
        id: "2d6",
        label: "2D6",
        attribute: None,
        count: 2,
        sides: 6,
    },
    Preset {
        id: "d10",
        label: "D10",
        attribute: None,
        count: 1,
        sides: 10,
    },
];

/// Every preset roll, with modifiers taken from `sheet`.
pub fn quick_rolls(sheet: &CharacterSheet) -> Vec<QuickRoll> {
    PRESETS
        .iter()
        .map(|p| QuickRoll {
            id: p.id,
            label: p.label,
            attribute: p.attribute,
            expr: DiceExpr::new(
                p.count,
                p.sides,
                p.attribute.map_or(0, |a| sheet.bonus(a)),
            ),
        })
        .collect()
}
