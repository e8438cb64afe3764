//! Attack and defense resolution.
//!
//! An attack rolls 1d20 plus `floor(skill / 5)` against a target
//! difficulty. A natural 20 always hits and doubles damage. Damage is the raw
//! sum of the weapon's dice plus `floor(attribute / 10)`, never less than 1 on
//! a hit. Defense is a plain roll with no hit or miss.

pub mod defense;

pub use defense::{DefenseRoll, resolve_defense};

use std::fmt;
use std::str::FromStr;

use dg_core::{Attribute, CharacterSheet};
use serde::{Deserialize, Serialize};

use crate::dice::{D20, DiceRollResult, roll_dice};
use crate::error::{MechError, MechResult};
use crate::random::RandomSource;

/// Lowest target difficulty a host should offer.
pub const MIN_DIFFICULTY: i32 = 1;

/// Highest target difficulty a host should offer.
pub const MAX_DIFFICULTY: i32 = 30;

/// Divisor turning an attribute into a damage bonus.
const DAMAGE_BONUS_DIVISOR: u32 = 10;

/// The four ways a demigod can attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    /// Blades and hafted weapons.
    Melee,
    /// Firearms and bows.
    Ranged,
    /// Bare hands.
    Unarmed,
    /// Divine energy.
    Magic,
}

impl WeaponKind {
    /// Every weapon kind.
    pub const ALL: [WeaponKind; 4] = [Self::Melee, Self::Ranged, Self::Unarmed, Self::Magic];

    /// The skill added to the attack roll.
    pub fn skill(self) -> Attribute {
        match self {
            Self::Melee => Attribute::MeleeWeapons,
            Self::Ranged => Attribute::Firearms,
            Self::Unarmed => Attribute::UnarmedCombat,
            Self::Magic => Attribute::Magic,
        }
    }

    /// The attribute added to damage.
    pub fn damage_attribute(self) -> Attribute {
        match self {
            Self::Melee | Self::Unarmed => Attribute::Strength,
            Self::Ranged => Attribute::Dexterity,
            Self::Magic => Attribute::Magic,
        }
    }

    /// Damage dice as `(count, sides)`.
    pub fn damage_dice(self) -> (u32, u32) {
        match self {
            Self::Melee => (1, 8),
            Self::Ranged => (2, 6),
            Self::Unarmed => (1, 4),
            Self::Magic => (2, 8),
        }
    }

    /// The damage roll this weapon makes for `sheet`.
    pub fn damage_roll(self, sheet: &CharacterSheet) -> DamageRoll {
        let (count, sides) = self.damage_dice();
        DamageRoll {
            count,
            sides,
            attribute_value: sheet.get(self.damage_attribute()),
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Unarmed => "unarmed",
            Self::Magic => "magic",
        }
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeaponKind {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|w| w.name() == wanted)
            .ok_or_else(|| MechError::UnknownWeapon(s.trim().to_string()))
    }
}

/// Dice and attribute used for damage on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    /// Number of damage dice.
    pub count: u32,
    /// Faces per damage die.
    pub sides: u32,
    /// Value of the attribute that adds to damage.
    pub attribute_value: u32,
}

impl DamageRoll {
    /// `floor(attribute_value / 10)`.
    pub fn bonus(&self) -> i32 {
        (self.attribute_value / DAMAGE_BONUS_DIVISOR) as i32
    }
}

/// Everything that happened in one attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatOutcome {
    /// The 1d20 attack roll.
    pub attack: DiceRollResult,
    /// Attack roll total including the skill modifier.
    pub attack_total: i32,
    /// Difficulty the attack was made against.
    pub target_difficulty: i32,
    /// The attack die showed a natural 20.
    pub critical: bool,
    /// `attack_total >= target_difficulty`.
    pub meets_difficulty: bool,
    /// The attack landed.
    pub hit: bool,
    /// The damage dice, rolled only on a hit.
    pub damage_roll: Option<DiceRollResult>,
    /// Final damage dealt, 0 on a miss.
    pub damage: u32,
    /// One-line summary.
    pub description: String,
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Resolve one attack.
pub fn resolve_attack(
    rng: &mut impl RandomSource,
    skill_value: u32,
    target_difficulty: i32,
    damage: &DamageRoll,
) -> MechResult<CombatOutcome> {
    let skill_modifier = dg_core::attribute_bonus(skill_value);
    let attack = roll_dice(&mut *rng, D20, 1, skill_modifier, "Attack")?;
    let critical = attack.critical;
    let meets_difficulty = attack.total >= target_difficulty;
    let hit = meets_difficulty || critical;

    let (damage_roll, dealt) = if hit {
        let roll = roll_dice(&mut *rng, damage.sides, damage.count, damage.bonus(), "Damage")?;
        let base = roll.sum as i64 + i64::from(damage.bonus());
        let scaled = if critical { base * 2 } else { base };
        (Some(roll), scaled.max(1) as u32)
    } else {
        (None, 0)
    };

    let description = if critical {
        format!("Critical hit! {dealt} damage.")
    } else if hit {
        format!(
            "Hit! Rolled {} against difficulty {target_difficulty} for {dealt} damage.",
            attack.total
        )
    } else if attack.fumble {
        format!(
            "Fumble! Rolled {} against difficulty {target_difficulty}.",
            attack.total
        )
    } else {
        format!(
            "Miss. Rolled {} against difficulty {target_difficulty}.",
            attack.total
        )
    };

    Ok(CombatOutcome {
        attack_total: attack.total,
        attack,
        target_difficulty,
        critical,
        meets_difficulty,
        hit,
        damage_roll,
        damage: dealt,
        description,
    })
}

/// Attack with `weapon`, taking skill and damage attribute from `sheet`.
pub fn attack_with(
    rng: &mut impl RandomSource,
    sheet: &CharacterSheet,
    weapon: WeaponKind,
    target_difficulty: i32,
) -> MechResult<CombatOutcome> {
    resolve_attack(
        rng,
        sheet.get(weapon.skill()),
        target_difficulty,
        &weapon.damage_roll(sheet),
    )
}
