//! The numeric attributes on a character sheet.
//!
//! Every attribute lives in `0..=100`. The enumeration order below is fixed:
//! it is the order attributes are listed, exported, and tie-broken in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::CoreError;

/// Lowest value any attribute can hold.
pub const ATTRIBUTE_MIN: u32 = 0;

/// Highest value any attribute can hold.
pub const ATTRIBUTE_MAX: u32 = 100;

/// Minimum similarity for an attribute to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Clamp an arbitrary integer into the attribute range.
pub fn clamp_attribute(value: i64) -> u32 {
    value.clamp(i64::from(ATTRIBUTE_MIN), i64::from(ATTRIBUTE_MAX)) as u32
}

/// The bonus shown next to an attribute: `floor(value / 5)`.
pub fn attribute_bonus(value: u32) -> i32 {
    (value / 5) as i32
}

/// Which block of the sheet an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeGroup {
    /// Health and sanity.
    Vital,
    /// Physical and mental aptitudes.
    Primary,
    /// Trained special skills.
    Skill,
}

impl std::fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vital => write!(f, "Health & Sanity"),
            Self::Primary => write!(f, "Primary Attributes"),
            Self::Skill => write!(f, "Special Skills"),
        }
    }
}

/// A named numeric trait on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    /// Physical wellbeing.
    Health,
    /// Mental stability.
    Sanity,
    /// Raw physical power.
    Strength,
    /// Precision and hand-eye coordination.
    Dexterity,
    /// Endurance and toughness.
    Constitution,
    /// Speed and reflexes.
    Agility,
    /// Reasoning and memory.
    Intelligence,
    /// Presence and persuasion.
    Charisma,
    /// Resolve under pressure.
    Willpower,
    /// Formal learning.
    Education,
    /// Moving unseen.
    Stealth,
    /// Command of divine energy.
    Magic,
    /// Fists, kicks, and grappling.
    UnarmedCombat,
    /// Swords, axes, and spears.
    MeleeWeapons,
    /// Pistols, rifles, and bows.
    Firearms,
    /// Finding clues.
    Investigation,
    /// Knowledge of the past.
    History,
    /// Languages, living and dead.
    Linguistics,
    /// Getting out of the way.
    Dodge,
    /// Noticing things.
    Perception,
}

impl Attribute {
    /// Every attribute in enumeration order.
    pub const ALL: [Attribute; 20] = [
        Self::Health,
        Self::Sanity,
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Agility,
        Self::Intelligence,
        Self::Charisma,
        Self::Willpower,
        Self::Education,
        Self::Stealth,
        Self::Magic,
        Self::UnarmedCombat,
        Self::MeleeWeapons,
        Self::Firearms,
        Self::Investigation,
        Self::History,
        Self::Linguistics,
        Self::Dodge,
        Self::Perception,
    ];

    /// The JSON key for this attribute.
    pub fn key(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Sanity => "sanity",
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Agility => "agility",
            Self::Intelligence => "intelligence",
            Self::Charisma => "charisma",
            Self::Willpower => "willpower",
            Self::Education => "education",
            Self::Stealth => "stealth",
            Self::Magic => "magic",
            Self::UnarmedCombat => "unarmedCombat",
            Self::MeleeWeapons => "meleeWeapons",
            Self::Firearms => "firearms",
            Self::Investigation => "investigation",
            Self::History => "history",
            Self::Linguistics => "linguistics",
            Self::Dodge => "dodge",
            Self::Perception => "perception",
        }
    }

    /// The display label for this attribute.
    pub fn label(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Sanity => "Sanity",
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Agility => "Agility",
            Self::Intelligence => "Intelligence",
            Self::Charisma => "Charisma",
            Self::Willpower => "Willpower",
            Self::Education => "Education",
            Self::Stealth => "Stealth",
            Self::Magic => "Magic",
            Self::UnarmedCombat => "Unarmed Combat",
            Self::MeleeWeapons => "Melee Weapons",
            Self::Firearms => "Firearms",
            Self::Investigation => "Investigation",
            Self::History => "History",
            Self::Linguistics => "Linguistics",
            Self::Dodge => "Dodge",
            Self::Perception => "Perception",
        }
    }

    /// The sheet block this attribute is shown in.
    pub fn group(self) -> AttributeGroup {
        match self {
            Self::Health | Self::Sanity => AttributeGroup::Vital,
            Self::Strength
            | Self::Dexterity
            | Self::Constitution
            | Self::Agility
            | Self::Intelligence
            | Self::Charisma
            | Self::Willpower
            | Self::Education
            | Self::Stealth => AttributeGroup::Primary,
            _ => AttributeGroup::Skill,
        }
    }

    /// Attributes in a group, in enumeration order.
    pub fn in_group(group: AttributeGroup) -> impl Iterator<Item = Attribute> {
        Self::ALL.into_iter().filter(move |a| a.group() == group)
    }

    /// Attribute keys that resemble `input`, best match first.
    pub fn suggest(input: &str) -> Vec<String> {
        let needle = normalize(input);
        let mut scored: Vec<(&'static str, f64)> = Self::ALL
            .iter()
            .map(|a| {
                let key_score = jaro_winkler(&needle, &normalize(a.key()));
                let label_score = jaro_winkler(&needle, &normalize(a.label()));
                (a.key(), key_score.max(label_score))
            })
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(3).map(|(k, _)| k.to_string()).collect()
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Attribute {
    type Err = CoreError;

    /// Match a key or label, ignoring case, spaces, hyphens, and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = normalize(s);
        Self::ALL
            .into_iter()
            .find(|a| normalize(a.key()) == needle || normalize(a.label()) == needle)
            .ok_or_else(|| CoreError::UnknownAttribute {
                input: s.to_string(),
                suggestions: Self::suggest(s),
            })
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
