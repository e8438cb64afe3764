use colored::Colorize;
use dg_mechanics::WeaponKind;
use dg_mechanics::combat::{MAX_DIFFICULTY, MIN_DIFFICULTY, attack_with};
use dg_oracle::DICE_ROLL_DELAY;

use crate::config::CliConfig;

pub fn run(
    config: &CliConfig,
    sheet: Option<&str>,
    weapon: &str,
    difficulty: i32,
) -> Result<(), String> {
    let weapon = weapon
        .parse::<WeaponKind>()
        .map_err(|e| e.to_string())?;
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        return Err(format!(
            "difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {difficulty}"
        ));
    }

    let session = super::open_session(config, sheet)?;
    let sheet = session.sheet();
    let mut rng = config.rng();
    let outcome = attack_with(&mut rng, sheet, weapon, difficulty).map_err(|e| e.to_string())?;

    super::reveal_after(config, DICE_ROLL_DELAY, "Steel sings...")?;

    println!(
        "  {} with {} {}",
        "Attack".bold(),
        weapon,
        format!("(skill {} {})", weapon.skill(), sheet.get(weapon.skill())).dimmed()
    );
    println!("  attack: {}", outcome.attack);
    if let Some(damage) = &outcome.damage_roll {
        println!("  damage: {damage}");
    }

    let summary = if outcome.critical {
        outcome.description.yellow().bold()
    } else if outcome.hit {
        outcome.description.green()
    } else {
        outcome.description.red()
    };
    println!("  {summary}");
    Ok(())
}
