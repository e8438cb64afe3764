use colored::Colorize;
use dg_core::SheetRepository;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, name: &str) -> Result<(), String> {
    let mut repo = SheetRepository::new(config.store());
    if !repo.delete(name).map_err(|e| e.to_string())? {
        return Err(format!("sheet not found: \"{}\"", name.trim()));
    }
    println!("  {} sheet {}", "Deleted".yellow(), name.trim().bold());
    Ok(())
}
