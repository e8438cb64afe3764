use colored::Colorize;
use dg_mechanics::DefenseRoll;
use dg_oracle::DICE_ROLL_DELAY;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, sheet: Option<&str>) -> Result<(), String> {
    let session = super::open_session(config, sheet)?;
    let mut rng = config.rng();
    let defense =
        DefenseRoll::for_sheet(&mut rng, session.sheet()).map_err(|e| e.to_string())?;

    super::reveal_after(config, DICE_ROLL_DELAY, "You brace yourself...")?;

    println!("  {}", "Defense".bold());
    println!("  {}", defense.roll);
    println!("  {}", defense.description.cyan());
    Ok(())
}
