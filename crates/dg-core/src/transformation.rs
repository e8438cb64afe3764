//! How far a demigod's divine nature has surfaced.
//!
//! The level combines the divine connection with bonuses for magic and for
//! being in good shape, capped at 100. Effects accumulate as thresholds are
//! crossed.

use crate::sheet::CharacterSheet;

/// Level at which a demigod counts as transformed.
pub const TRANSFORMED_AT: u32 = 80;

/// Named band of transformation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransformationStage {
    /// Below 40.
    Mortal,
    /// 40 to 59.
    Connection,
    /// 60 to 79.
    Awakening,
    /// 80 to 89.
    DivinePower,
    /// 90 and above.
    Ascension,
}

impl TransformationStage {
    /// The stage for a level.
    pub fn from_level(level: u32) -> Self {
        match level {
            90.. => Self::Ascension,
            80..=89 => Self::DivinePower,
            60..=79 => Self::Awakening,
            40..=59 => Self::Connection,
            _ => Self::Mortal,
        }
    }

    /// Level needed to reach the next stage, or `None` at the top.
    pub fn next_threshold(self) -> Option<u32> {
        match self {
            Self::Mortal => Some(40),
            Self::Connection => Some(60),
            Self::Awakening => Some(80),
            Self::DivinePower => Some(90),
            Self::Ascension => None,
        }
    }
}

impl std::fmt::Display for TransformationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mortal => write!(f, "Mortal"),
            Self::Connection => write!(f, "Connection"),
            Self::Awakening => write!(f, "Awakening"),
            Self::DivinePower => write!(f, "Divine Power"),
            Self::Ascension => write!(f, "Divine Ascension"),
        }
    }
}

/// Effects unlocked at each threshold, cumulative.
const EFFECTS: &[(u32, &str)] = &[
    (40, "Slow health regeneration"),
    (60, "Sight beyond the mystic veil"),
    (60, "Resistance to mental effects"),
    (80, "Divine strength (+2 on tests)"),
    (80, "Aura of command"),
    (90, "Semi-divine form"),
    (90, "Communion with the divine parent"),
    (90, "Immunity to mortal diseases"),
];

/// A computed transformation snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    /// Level in `0..=100`.
    pub level: u32,
    /// Band the level falls in.
    pub stage: TransformationStage,
}

impl Transformation {
    /// Compute the transformation for a sheet.
    pub fn of(sheet: &CharacterSheet) -> Self {
        let magic_bonus = sheet.magic / 10;
        let health_bonus = if sheet.health > 80 { 10 } else { 0 };
        let sanity_bonus = if sheet.sanity > 70 { 5 } else { 0 };
        let level = (sheet.connection_level + magic_bonus + health_bonus + sanity_bonus).min(100);
        Self {
            level,
            stage: TransformationStage::from_level(level),
        }
    }

    /// Returns true once the divine form is active.
    pub fn is_transformed(&self) -> bool {
        self.level >= TRANSFORMED_AT
    }

    /// Effects currently active.
    pub fn effects(&self) -> Vec<&'static str> {
        EFFECTS
            .iter()
            .filter(|(threshold, _)| self.level >= *threshold)
            .map(|(_, effect)| *effect)
            .collect()
    }

    /// Points still needed for the next stage, or `None` at the top.
    pub fn points_to_next(&self) -> Option<u32> {
        self.stage
            .next_threshold()
            .map(|t| t.saturating_sub(self.level))
    }
}
