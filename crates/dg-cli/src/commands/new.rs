use colored::Colorize;
use dg_core::{CharacterSheet, SheetRepository};

use crate::config::CliConfig;

pub struct NewSheet<'a> {
    pub name: &'a str,
    pub character_name: Option<&'a str>,
    pub god_name: Option<&'a str>,
    pub patron: Option<&'a str>,
    pub force: bool,
}

pub fn run(config: &CliConfig, args: NewSheet<'_>) -> Result<(), String> {
    let mut repo = SheetRepository::new(config.store());
    if !args.force && repo.exists(args.name).map_err(|e| e.to_string())? {
        return Err(format!(
            "sheet \"{}\" already exists. Use --force to overwrite it",
            args.name.trim()
        ));
    }

    let mut sheet = CharacterSheet::new();
    if let Some(name) = args.character_name {
        sheet.character_name = name.to_string();
    }
    if let Some(god) = args.god_name {
        sheet.god_name = god.to_string();
    }
    if let Some(id) = args.patron {
        let patron = sheet.select_patron(id).map_err(|e| e.to_string())?;
        if sheet.god_name.is_empty() {
            sheet.god_name = patron.name.to_string();
        }
    }

    repo.save(args.name, &sheet).map_err(|e| e.to_string())?;
    println!("  {} sheet {}", "Created".green(), args.name.trim().bold());
    Ok(())
}
