//! Divine powers listed on a sheet.

use serde::{Deserialize, Serialize};

/// A power granted by the hero's divine parent.
///
/// `damage` is free text as the player typed it (usually a dice expression
/// such as `2d6 + 5`); it is only interpreted when the power is rolled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DivinePower {
    /// Stable identifier, `power_<n>`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Activation cost.
    pub cost: i64,
    /// Damage expression.
    pub damage: String,
    /// Category (attack, defense, buff, ...).
    #[serde(rename = "type")]
    pub power_type: String,
    /// What the power does.
    pub description: String,
    /// Optional image reference (data URL or path).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl DivinePower {
    /// Create an empty power with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns true if the power has a damage expression.
    pub fn deals_damage(&self) -> bool {
        !self.damage.trim().is_empty()
    }
}

impl std::fmt::Display for DivinePower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        write!(f, "{name} [{}]", self.id)
    }
}
