//! The character sheet record.
//!
//! A [`CharacterSheet`] is a fixed schema: every field has a default, and a
//! JSON record missing some fields loads as the defaults overlaid with
//! whatever was present. Numeric attributes are clamped to `0..=100` by every
//! mutator and by [`CharacterSheet::normalize`]. Deserialization accepts any
//! JSON number for them, negative or fractional, and clamps it the same way.

pub mod power;

pub use power::DivinePower;

use serde::{Deserialize, Deserializer, Serialize};

use crate::attribute::{
    ATTRIBUTE_MAX, ATTRIBUTE_MIN, Attribute, attribute_bonus, clamp_attribute,
};
use crate::error::{CoreError, CoreResult};
use crate::patron::Patron;

/// Default age of a freshly created demigod.
pub const DEFAULT_AGE: u32 = 20;

/// Which sheet name a generated name is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// The hero's own name.
    Character,
    /// The divine parent's name.
    God,
}

/// How battered a vital track (health or sanity) is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalCondition {
    /// Above 75.
    Stable,
    /// 51 to 75.
    Strained,
    /// 26 to 50.
    Wounded,
    /// 25 or below.
    Critical,
}

impl VitalCondition {
    /// Classify a vital value.
    pub fn from_value(value: u32) -> Self {
        match value {
            0..=25 => Self::Critical,
            26..=50 => Self::Wounded,
            51..=75 => Self::Strained,
            _ => Self::Stable,
        }
    }
}

impl std::fmt::Display for VitalCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stable => write!(f, "stable"),
            Self::Strained => write!(f, "strained"),
            Self::Wounded => write!(f, "wounded"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A demigod's complete character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterSheet {
    /// The hero's name.
    pub character_name: String,
    /// The divine parent's name, free text.
    pub god_name: String,
    /// Id of the selected patron from the roster, or empty.
    pub selected_god: String,
    /// Age in years.
    #[serde(deserialize_with = "non_negative")]
    pub age: u32,
    /// Social circle or camp cabin.
    pub social_group: String,
    /// Country of origin.
    pub nationality: String,
    /// Strength of the divine bond, as a percentage.
    #[serde(deserialize_with = "clamped")]
    pub connection_level: u32,

    /// Physical description.
    pub appearance: String,
    /// Backstory.
    pub personal_history: String,
    /// Allies, friends, and contacts.
    pub allies_and_friends: String,
    /// Divine domains the hero has inherited.
    pub domains: String,

    /// Physical wellbeing.
    #[serde(deserialize_with = "clamped")]
    pub health: u32,
    /// Mental stability.
    #[serde(deserialize_with = "clamped")]
    pub sanity: u32,

    /// Raw physical power.
    #[serde(deserialize_with = "clamped")]
    pub strength: u32,
    /// Precision and coordination.
    #[serde(deserialize_with = "clamped")]
    pub dexterity: u32,
    /// Endurance.
    #[serde(deserialize_with = "clamped")]
    pub constitution: u32,
    /// Speed and reflexes.
    #[serde(deserialize_with = "clamped")]
    pub agility: u32,
    /// Reasoning and memory.
    #[serde(deserialize_with = "clamped")]
    pub intelligence: u32,
    /// Presence and persuasion.
    #[serde(deserialize_with = "clamped")]
    pub charisma: u32,
    /// Resolve.
    #[serde(deserialize_with = "clamped")]
    pub willpower: u32,
    /// Formal learning.
    #[serde(deserialize_with = "clamped")]
    pub education: u32,
    /// Moving unseen.
    #[serde(deserialize_with = "clamped")]
    pub stealth: u32,

    /// Command of divine energy.
    #[serde(deserialize_with = "clamped")]
    pub magic: u32,
    /// Fighting without weapons.
    #[serde(deserialize_with = "clamped")]
    pub unarmed_combat: u32,
    /// Fighting with blades and hafts.
    #[serde(deserialize_with = "clamped")]
    pub melee_weapons: u32,
    /// Fighting at range.
    #[serde(deserialize_with = "clamped")]
    pub firearms: u32,
    /// Finding clues.
    #[serde(deserialize_with = "clamped")]
    pub investigation: u32,
    /// Knowledge of the past.
    #[serde(deserialize_with = "clamped")]
    pub history: u32,
    /// Languages.
    #[serde(deserialize_with = "clamped")]
    pub linguistics: u32,
    /// Evasion.
    #[serde(deserialize_with = "clamped")]
    pub dodge: u32,
    /// Awareness.
    #[serde(deserialize_with = "clamped")]
    pub perception: u32,

    /// Powers granted by the divine parent.
    pub divine_powers: Vec<DivinePower>,

    /// Carried gear.
    pub equipment: String,
    /// Special abilities not covered by attributes.
    pub abilities: String,
    /// Free-form notes.
    pub observations: String,
}

/// Read any JSON number into `min..=max`, dropping the fraction.
fn clamp_number(value: f64, min: u32, max: u32) -> u32 {
    if value.is_nan() {
        return min;
    }
    value.trunc().clamp(f64::from(min), f64::from(max)) as u32
}

/// Accept any number for an attribute and clamp it into range.
fn clamped<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(clamp_number(value, ATTRIBUTE_MIN, ATTRIBUTE_MAX))
}

/// Accept any number for a count that cannot go below zero.
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(clamp_number(value, 0, u32::MAX))
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            character_name: String::new(),
            god_name: String::new(),
            selected_god: String::new(),
            age: DEFAULT_AGE,
            social_group: String::new(),
            nationality: String::new(),
            connection_level: 0,
            appearance: String::new(),
            personal_history: String::new(),
            allies_and_friends: String::new(),
            domains: String::new(),
            health: 100,
            sanity: 100,
            strength: 0,
            dexterity: 0,
            constitution: 0,
            agility: 0,
            intelligence: 0,
            charisma: 0,
            willpower: 0,
            education: 0,
            stealth: 0,
            magic: 0,
            unarmed_combat: 0,
            melee_weapons: 0,
            firearms: 0,
            investigation: 0,
            history: 0,
            linguistics: 0,
            dodge: 0,
            perception: 0,
            divine_powers: Vec::new(),
            equipment: String::new(),
            abilities: String::new(),
            observations: String::new(),
        }
    }
}

impl CharacterSheet {
    /// Create a blank sheet with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an attribute value.
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Health => self.health,
            Attribute::Sanity => self.sanity,
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
            Attribute::Charisma => self.charisma,
            Attribute::Willpower => self.willpower,
            Attribute::Education => self.education,
            Attribute::Stealth => self.stealth,
            Attribute::Magic => self.magic,
            Attribute::UnarmedCombat => self.unarmed_combat,
            Attribute::MeleeWeapons => self.melee_weapons,
            Attribute::Firearms => self.firearms,
            Attribute::Investigation => self.investigation,
            Attribute::History => self.history,
            Attribute::Linguistics => self.linguistics,
            Attribute::Dodge => self.dodge,
            Attribute::Perception => self.perception,
        }
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Health => &mut self.health,
            Attribute::Sanity => &mut self.sanity,
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Charisma => &mut self.charisma,
            Attribute::Willpower => &mut self.willpower,
            Attribute::Education => &mut self.education,
            Attribute::Stealth => &mut self.stealth,
            Attribute::Magic => &mut self.magic,
            Attribute::UnarmedCombat => &mut self.unarmed_combat,
            Attribute::MeleeWeapons => &mut self.melee_weapons,
            Attribute::Firearms => &mut self.firearms,
            Attribute::Investigation => &mut self.investigation,
            Attribute::History => &mut self.history,
            Attribute::Linguistics => &mut self.linguistics,
            Attribute::Dodge => &mut self.dodge,
            Attribute::Perception => &mut self.perception,
        }
    }

    /// Set an attribute, clamping to `0..=100`. Returns the stored value.
    pub fn set(&mut self, attribute: Attribute, value: i64) -> u32 {
        let clamped = clamp_attribute(value);
        *self.slot_mut(attribute) = clamped;
        clamped
    }

    /// Nudge an attribute by `delta`, clamping to `0..=100`. Returns the new value.
    pub fn adjust(&mut self, attribute: Attribute, delta: i64) -> u32 {
        let current = i64::from(self.get(attribute));
        self.set(attribute, current + delta)
    }

    /// The displayed bonus for an attribute, `floor(value / 5)`.
    pub fn bonus(&self, attribute: Attribute) -> i32 {
        attribute_bonus(self.get(attribute))
    }

    /// Set the divine connection percentage, clamping to `0..=100`.
    pub fn set_connection_level(&mut self, value: i64) -> u32 {
        self.connection_level = clamp_attribute(value);
        self.connection_level
    }

    /// Select a patron from the roster by id.
    pub fn select_patron(&mut self, id: &str) -> CoreResult<&'static Patron> {
        let patron = Patron::find(id).ok_or_else(|| CoreError::UnknownPatron(id.to_string()))?;
        self.selected_god = patron.id.to_string();
        Ok(patron)
    }

    /// The selected patron, if the stored id is on the roster.
    pub fn patron(&self) -> Option<&'static Patron> {
        Patron::find(&self.selected_god)
    }

    /// Write a generated name into the character or god field.
    pub fn apply_name(&mut self, kind: NameKind, name: impl Into<String>) {
        match kind {
            NameKind::Character => self.character_name = name.into(),
            NameKind::God => self.god_name = name.into(),
        }
    }

    /// Condition of the health track.
    pub fn health_condition(&self) -> VitalCondition {
        VitalCondition::from_value(self.health)
    }

    /// Condition of the sanity track.
    pub fn sanity_condition(&self) -> VitalCondition {
        VitalCondition::from_value(self.sanity)
    }

    /// Clamp every numeric field back into range.
    ///
    /// Applied to anything that arrives from outside (loaded or imported),
    /// since deserialization bypasses the setters.
    pub fn normalize(&mut self) {
        for attribute in Attribute::ALL {
            let value = i64::from(self.get(attribute));
            self.set(attribute, value);
        }
        self.connection_level = clamp_attribute(i64::from(self.connection_level));
    }

    /// Add an empty divine power and return its id.
    pub fn add_power(&mut self) -> String {
        let next = self
            .divine_powers
            .iter()
            .filter_map(|p| p.id.strip_prefix("power_")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let id = format!("power_{next}");
        self.divine_powers.push(DivinePower::new(id.clone()));
        id
    }

    /// Look up a divine power by id.
    pub fn power(&self, id: &str) -> CoreResult<&DivinePower> {
        self.divine_powers
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::PowerNotFound(id.to_string()))
    }

    /// Get a mutable reference to a divine power by id.
    pub fn power_mut(&mut self, id: &str) -> CoreResult<&mut DivinePower> {
        self.divine_powers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::PowerNotFound(id.to_string()))
    }

    /// Replace the power with the same id.
    pub fn update_power(&mut self, power: DivinePower) -> CoreResult<()> {
        let slot = self.power_mut(&power.id)?;
        *slot = power;
        Ok(())
    }

    /// Remove a power by id.
    pub fn remove_power(&mut self, id: &str) -> CoreResult<DivinePower> {
        let index = self
            .divine_powers
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::PowerNotFound(id.to_string()))?;
        Ok(self.divine_powers.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_new_sheet() {
        let sheet = CharacterSheet::new();
        assert_eq!(sheet.age, 20);
        assert_eq!(sheet.health, 100);
        assert_eq!(sheet.sanity, 100);
        assert_eq!(sheet.strength, 0);
        assert_eq!(sheet.connection_level, 0);
        assert!(sheet.divine_powers.is_empty());
    }

    #[test]
    fn set_clamps_to_range() {
        let mut sheet = CharacterSheet::new();
        assert_eq!(sheet.set(Attribute::Strength, 140), 100);
        assert_eq!(sheet.set(Attribute::Dodge, -3), 0);
        assert_eq!(sheet.set(Attribute::Magic, 55), 55);
        assert_eq!(sheet.magic, 55);
    }

    #[test]
    fn adjust_steps_and_clamps() {
        let mut sheet = CharacterSheet::new();
        assert_eq!(sheet.adjust(Attribute::Health, 1), 100);
        assert_eq!(sheet.adjust(Attribute::Health, -1), 99);
        assert_eq!(sheet.adjust(Attribute::Charisma, -1), 0);
    }

    #[test]
    fn get_and_set_cover_every_attribute() {
        let mut sheet = CharacterSheet::new();
        for (i, attribute) in Attribute::ALL.into_iter().enumerate() {
            sheet.set(attribute, i as i64 + 1);
        }
        for (i, attribute) in Attribute::ALL.into_iter().enumerate() {
            assert_eq!(sheet.get(attribute), i as u32 + 1, "{attribute}");
        }
    }

    #[test]
    fn bonus_uses_fifths() {
        let mut sheet = CharacterSheet::new();
        sheet.set(Attribute::Firearms, 37);
        assert_eq!(sheet.bonus(Attribute::Firearms), 7);
    }

    #[test]
    fn normalize_clamps_out_of_range_values() {
        let mut sheet = CharacterSheet {
            strength: 250,
            connection_level: 180,
            ..CharacterSheet::default()
        };
        sheet.normalize();
        assert_eq!(sheet.strength, 100);
        assert_eq!(sheet.connection_level, 100);
    }

    #[test]
    fn vital_conditions() {
        assert_eq!(VitalCondition::from_value(0), VitalCondition::Critical);
        assert_eq!(VitalCondition::from_value(25), VitalCondition::Critical);
        assert_eq!(VitalCondition::from_value(26), VitalCondition::Wounded);
        assert_eq!(VitalCondition::from_value(50), VitalCondition::Wounded);
        assert_eq!(VitalCondition::from_value(75), VitalCondition::Strained);
        assert_eq!(VitalCondition::from_value(76), VitalCondition::Stable);
        let sheet = CharacterSheet::new();
        assert_eq!(sheet.health_condition(), VitalCondition::Stable);
    }

    #[test]
    fn power_ids_never_collide() {
        let mut sheet = CharacterSheet::new();
        let first = sheet.add_power();
        let second = sheet.add_power();
        assert_eq!(first, "power_1");
        assert_eq!(second, "power_2");
        sheet.remove_power(&first).unwrap();
        assert_eq!(sheet.add_power(), "power_3");
    }

    #[test]
    fn update_and_remove_power() {
        let mut sheet = CharacterSheet::new();
        let id = sheet.add_power();
        let mut power = sheet.power(&id).unwrap().clone();
        power.name = "Bolt of Zeus".to_string();
        power.damage = "2d6 + 5".to_string();
        sheet.update_power(power).unwrap();
        assert_eq!(sheet.power(&id).unwrap().name, "Bolt of Zeus");

        assert!(sheet.remove_power("power_99").is_err());
        let removed = sheet.remove_power(&id).unwrap();
        assert_eq!(removed.damage, "2d6 + 5");
        assert!(sheet.divine_powers.is_empty());
    }

    #[test]
    fn select_patron_validates_roster() {
        let mut sheet = CharacterSheet::new();
        let patron = sheet.select_patron("Hecate").unwrap();
        assert_eq!(patron.id, "hecate");
        assert_eq!(sheet.selected_god, "hecate");
        assert!(sheet.select_patron("cthulhu").is_err());
        assert_eq!(sheet.selected_god, "hecate");
    }

    #[test]
    fn apply_generated_names() {
        let mut sheet = CharacterSheet::new();
        sheet.apply_name(NameKind::Character, "Ariadne");
        sheet.apply_name(NameKind::God, "Hecate");
        assert_eq!(sheet.character_name, "Ariadne");
        assert_eq!(sheet.god_name, "Hecate");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let sheet: CharacterSheet =
            serde_json::from_str(r#"{"characterName":"Nikias","strength":40}"#).unwrap();
        assert_eq!(sheet.character_name, "Nikias");
        assert_eq!(sheet.strength, 40);
        assert_eq!(sheet.health, 100);
        assert_eq!(sheet.age, 20);
    }

    #[test]
    fn json_keys_are_camel_case() {
        let sheet = CharacterSheet::new();
        let value = serde_json::to_value(&sheet).unwrap();
        assert!(value.get("meleeWeapons").is_some());
        assert!(value.get("alliesAndFriends").is_some());
        assert!(value.get("divinePowers").is_some());
    }
}
