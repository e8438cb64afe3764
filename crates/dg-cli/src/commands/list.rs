use comfy_table::{ContentArrangement, Table};
use dg_core::{SheetRepository, Transformation};

use crate::config::CliConfig;

pub fn run(config: &CliConfig) -> Result<(), String> {
    let repo = SheetRepository::new(config.store());
    let names = repo.list().map_err(|e| e.to_string())?;

    if names.is_empty() {
        println!("  No saved sheets.");
        return Ok(());
    }

    let last = repo.last_opened().map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Sheet", "Character", "Divine Parent", "Stage", "Saved"]);

    for name in &names {
        let marker = if last.as_deref() == Some(name.as_str()) {
            format!("{name} *")
        } else {
            name.clone()
        };
        match repo.peek(name) {
            Ok(saved) => {
                let stage = Transformation::of(&saved.sheet).stage.to_string();
                let saved_at = saved
                    .saved_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    marker,
                    super::display_name(&saved.sheet.character_name),
                    super::display_name(&saved.sheet.god_name),
                    stage,
                    saved_at,
                ]);
            }
            Err(e) => {
                tracing::warn!(sheet = %name, error = %e, "skipping unreadable sheet");
                table.add_row(vec![marker, "(unreadable)".to_string()]);
            }
        }
    }

    println!("{table}");
    println!();
    println!("  {} sheets (* last opened)", names.len());
    Ok(())
}
