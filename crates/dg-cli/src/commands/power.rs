use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dg_core::DivinePower;
use dg_mechanics::DiceExpr;

use crate::config::CliConfig;

/// Optional power fields given on the command line.
#[derive(Debug, Default)]
pub struct PowerFields {
    pub name: Option<String>,
    pub cost: Option<i64>,
    pub damage: Option<String>,
    pub power_type: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl PowerFields {
    fn apply(self, power: &mut DivinePower) -> Result<(), String> {
        if let Some(damage) = &self.damage {
            // empty clears the damage; anything else must be rollable
            if !damage.trim().is_empty() {
                damage
                    .parse::<DiceExpr>()
                    .map_err(|e| e.to_string())?;
            }
        }
        if let Some(name) = self.name {
            power.name = name;
        }
        if let Some(cost) = self.cost {
            power.cost = cost;
        }
        if let Some(damage) = self.damage {
            power.damage = damage;
        }
        if let Some(power_type) = self.power_type {
            power.power_type = power_type;
        }
        if let Some(description) = self.description {
            power.description = description;
        }
        if let Some(image) = self.image {
            power.image = Some(image).filter(|i| !i.trim().is_empty());
        }
        Ok(())
    }
}

pub fn add(config: &CliConfig, sheet: Option<&str>, fields: PowerFields) -> Result<(), String> {
    let mut session = super::open_session(config, sheet)?;
    let mut power = DivinePower::default();
    fields.apply(&mut power)?;

    let id = session.sheet_mut().add_power();
    power.id = id.clone();
    session
        .sheet_mut()
        .update_power(power)
        .map_err(|e| e.to_string())?;
    super::save_session(&mut session)?;
    println!("  {} power {}", "Added".green(), id.bold());
    Ok(())
}

pub fn set(
    config: &CliConfig,
    sheet: Option<&str>,
    id: &str,
    fields: PowerFields,
) -> Result<(), String> {
    let mut session = super::open_session(config, sheet)?;
    let power = session
        .sheet_mut()
        .power_mut(id)
        .map_err(|e| e.to_string())?;
    fields.apply(power)?;
    let shown = power.to_string();
    super::save_session(&mut session)?;
    println!("  {} {shown}", "Updated".green());
    Ok(())
}

pub fn remove(config: &CliConfig, sheet: Option<&str>, id: &str) -> Result<(), String> {
    let mut session = super::open_session(config, sheet)?;
    let removed = session
        .sheet_mut()
        .remove_power(id)
        .map_err(|e| e.to_string())?;
    super::save_session(&mut session)?;
    println!("  {} {removed}", "Removed".yellow());
    Ok(())
}

pub fn list(config: &CliConfig, sheet: Option<&str>) -> Result<(), String> {
    let session = super::open_session(config, sheet)?;
    let powers = &session.sheet().divine_powers;
    if powers.is_empty() {
        println!("  No divine powers.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Type", "Cost", "Damage"]);
    for power in powers {
        table.add_row(vec![
            power.id.clone(),
            super::display_name(&power.name),
            power.power_type.clone(),
            power.cost.to_string(),
            power.damage.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_only_given_fields() {
        let mut power = DivinePower::new("power_1");
        power.description = "kept".to_string();
        PowerFields {
            name: Some("Tidal Surge".into()),
            damage: Some("2d6 + 5".into()),
            ..PowerFields::default()
        }
        .apply(&mut power)
        .unwrap();
        assert_eq!(power.name, "Tidal Surge");
        assert_eq!(power.damage, "2d6 + 5");
        assert_eq!(power.description, "kept");
    }

    #[test]
    fn unrollable_damage_rejected() {
        let mut power = DivinePower::new("power_1");
        let err = PowerFields {
            name: Some("Bad".into()),
            damage: Some("a lot".into()),
            ..PowerFields::default()
        }
        .apply(&mut power)
        .unwrap_err();
        assert!(err.contains("invalid dice expression"));
        assert!(power.name.is_empty());
    }

    #[test]
    fn blank_image_clears() {
        let mut power = DivinePower::new("power_1");
        power.image = Some("old.png".into());
        PowerFields {
            image: Some(String::new()),
            ..PowerFields::default()
        }
        .apply(&mut power)
        .unwrap();
        assert_eq!(power.image, None);
    }
}
