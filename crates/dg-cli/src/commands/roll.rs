use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dg_core::CharacterSheet;
use dg_mechanics::{DiceExpr, DiceRollResult, QuickRoll, RandomSource, RollLog, quick_rolls};
use dg_oracle::DICE_ROLL_DELAY;

use crate::config::CliConfig;

/// What to roll.
pub enum RollRequest<'a> {
    /// Typed notation such as `2d6+3`.
    Expr(&'a str),
    /// A preset by id or label.
    Quick(&'a str),
    /// The damage of a divine power by id.
    Power(&'a str),
}

pub fn run(config: &CliConfig, sheet: Option<&str>, request: RollRequest<'_>) -> Result<(), String> {
    let mut rng = config.rng();
    let result = match request {
        RollRequest::Expr(text) => {
            let expr = text.parse::<DiceExpr>().map_err(|e| e.to_string())?;
            expr.roll(&mut rng)
        }
        RollRequest::Quick(name) => {
            let session = super::open_session(config, sheet)?;
            QuickRoll::find(session.sheet(), name)
                .and_then(|quick| quick.roll(&mut rng))
        }
        RollRequest::Power(id) => {
            let session = super::open_session(config, sheet)?;
            return roll_power(config, session.sheet(), id, &mut rng);
        }
    }
    .map_err(|e| e.to_string())?;

    finish(config, result)
}

fn roll_power(
    config: &CliConfig,
    sheet: &CharacterSheet,
    id: &str,
    rng: &mut impl RandomSource,
) -> Result<(), String> {
    let power = sheet.power(id).map_err(|e| e.to_string())?;
    if !power.deals_damage() {
        return Err(format!("{power} has no damage to roll"));
    }
    let expr = power
        .damage
        .parse::<DiceExpr>()
        .map_err(|e| e.to_string())?;
    let mut result = expr.roll(rng).map_err(|e| e.to_string())?;
    result.label = super::display_name(&power.name);
    finish(config, result)
}

fn finish(config: &CliConfig, result: DiceRollResult) -> Result<(), String> {
    super::reveal_after(config, DICE_ROLL_DELAY, "The dice tumble across the altar...")?;
    print_result(&result);

    let mut log: RollLog = super::load_state(config, super::ROLL_LOG_KEY)?;
    log.push(result);
    super::store_state(config, super::ROLL_LOG_KEY, &log)
}

fn print_result(result: &DiceRollResult) {
    println!(
        "  {} {}",
        result.label.bold(),
        format!("({})", result.expr()).dimmed()
    );
    println!("  {result}");
    if result.critical {
        println!("  {}", "CRITICAL! The gods smile upon you.".yellow().bold());
    }
    if result.fumble {
        println!("  {}", "FUMBLE! The Fates laugh.".red());
    }
}

pub fn history(config: &CliConfig) -> Result<(), String> {
    let log: RollLog = super::load_state(config, super::ROLL_LOG_KEY)?;
    if log.is_empty() {
        println!("  No rolls yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Roll", "Dice", "Total"]);
    for result in log.iter() {
        let mut total = result.total.to_string();
        if result.critical {
            total.push_str(" (critical)");
        } else if result.fumble {
            total.push_str(" (fumble)");
        }
        table.add_row(vec![result.label.clone(), result.expr().to_string(), total]);
    }
    println!("{table}");
    Ok(())
}

pub fn presets(config: &CliConfig, sheet: Option<&str>) -> Result<(), String> {
    let session = super::open_session(config, sheet)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Roll", "Dice"]);
    for quick in quick_rolls(session.sheet()) {
        table.add_row(vec![
            quick.id.to_string(),
            quick.label.to_string(),
            quick.expr.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
