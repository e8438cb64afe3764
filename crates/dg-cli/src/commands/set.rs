use colored::Colorize;
use dg_core::{Attribute, CharacterSheet};

use crate::config::CliConfig;

pub fn run(config: &CliConfig, sheet: Option<&str>, field: &str, value: &str) -> Result<(), String> {
    let mut session = super::open_session(config, sheet)?;
    let shown = apply(session.sheet_mut(), field, value)?;
    super::save_session(&mut session)?;
    println!("  {} {}", format!("{field}:").dimmed(), shown.bold());
    Ok(())
}

/// Set a sheet field from text. Attribute values starting with `+` or `-`
/// adjust the current value instead of replacing it.
fn apply(sheet: &mut CharacterSheet, field: &str, value: &str) -> Result<String, String> {
    let key: String = field
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    let text = value.to_string();
    match key.as_str() {
        "name" | "charactername" => sheet.character_name = text,
        "god" | "godname" => sheet.god_name = text,
        "patron" | "selectedgod" => {
            let patron = sheet.select_patron(value).map_err(|e| e.to_string())?;
            return Ok(patron.to_string());
        }
        "age" => {
            sheet.age = value
                .trim()
                .parse()
                .map_err(|_| format!("age must be a whole number, got \"{value}\""))?;
        }
        "connection" | "connectionlevel" => {
            let level = parse_number(value)?;
            return Ok(format!("{}%", sheet.set_connection_level(level)));
        }
        "group" | "socialgroup" => sheet.social_group = text,
        "nationality" => sheet.nationality = text,
        "appearance" => sheet.appearance = text,
        "backstory" | "personalhistory" => sheet.personal_history = text,
        "allies" | "alliesandfriends" => sheet.allies_and_friends = text,
        "domains" => sheet.domains = text,
        "equipment" => sheet.equipment = text,
        "abilities" => sheet.abilities = text,
        "observations" | "notes" => sheet.observations = text,
        _ => {
            let attribute = field
                .parse::<Attribute>()
                .map_err(|e| e.to_string())?;
            let trimmed = value.trim();
            let stored = if trimmed.starts_with(['+', '-']) {
                sheet.adjust(attribute, parse_number(trimmed)?)
            } else {
                sheet.set(attribute, parse_number(trimmed)?)
            };
            return Ok(format!("{stored} ({:+})", sheet.bonus(attribute)));
        }
    }
    Ok(value.to_string())
}

fn parse_number(value: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|_| format!("expected a number, got \"{value}\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_and_clamps_attributes() {
        let mut sheet = CharacterSheet::new();
        assert_eq!(apply(&mut sheet, "strength", "47").unwrap(), "47 (+9)");
        assert_eq!(apply(&mut sheet, "Melee Weapons", "250").unwrap(), "100 (+20)");
        assert_eq!(sheet.get(Attribute::MeleeWeapons), 100);
    }

    #[test]
    fn relative_values_adjust() {
        let mut sheet = CharacterSheet::new();
        apply(&mut sheet, "dodge", "30").unwrap();
        apply(&mut sheet, "dodge", "+5").unwrap();
        assert_eq!(sheet.dodge, 35);
        apply(&mut sheet, "dodge", "-50").unwrap();
        assert_eq!(sheet.dodge, 0);
    }

    #[test]
    fn identity_fields() {
        let mut sheet = CharacterSheet::new();
        apply(&mut sheet, "characterName", "Ariadne").unwrap();
        apply(&mut sheet, "god", "Dionysus").unwrap();
        apply(&mut sheet, "age", "17").unwrap();
        assert_eq!(apply(&mut sheet, "connection", "120").unwrap(), "100%");
        apply(&mut sheet, "patron", "DIONYSUS").unwrap();
        assert_eq!(sheet.character_name, "Ariadne");
        assert_eq!(sheet.god_name, "Dionysus");
        assert_eq!(sheet.age, 17);
        assert_eq!(sheet.selected_god, "dionysus");
    }

    #[test]
    fn unknown_field_suggests() {
        let mut sheet = CharacterSheet::new();
        let err = apply(&mut sheet, "strenght", "10").unwrap_err();
        assert!(err.contains("did you mean"), "{err}");
    }

    #[test]
    fn bad_numbers_rejected() {
        let mut sheet = CharacterSheet::new();
        assert!(apply(&mut sheet, "magic", "lots").is_err());
        assert!(apply(&mut sheet, "age", "-3").is_err());
        assert_eq!(sheet.magic, 0);
    }
}
