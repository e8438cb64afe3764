use colored::Colorize;
use dg_core::Transformation;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, sheet: Option<&str>) -> Result<(), String> {
    let session = super::open_session(config, sheet)?;
    let t = Transformation::of(session.sheet());

    let headline = format!("{}% {}", t.level, t.stage);
    if t.is_transformed() {
        println!("  {} {}", headline.yellow().bold(), "(transformed)".yellow());
    } else {
        println!("  {}", headline.bold());
    }

    match t.points_to_next() {
        Some(points) => println!("  {}", format!("{points} points to the next stage").dimmed()),
        None => println!("  {}", "the highest stage has been reached".dimmed()),
    }

    let effects = t.effects();
    if !effects.is_empty() {
        println!();
        for effect in effects {
            println!("  + {effect}");
        }
    }
    Ok(())
}
