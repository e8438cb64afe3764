use std::fs;
use std::path::Path;

use colored::Colorize;
use dg_core::transfer::{import_json, import_json_onto};
use dg_core::{CoreError, SheetRepository};

use crate::config::CliConfig;

/// Import a JSON sheet, saving it as `name` or under the file's stem.
///
/// Importing onto an existing sheet only replaces the fields in the file.
pub fn run(config: &CliConfig, file: &Path, name: Option<&str>) -> Result<(), String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;

    let name = match name {
        Some(name) => name.trim().to_string(),
        None => file
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| format!("cannot derive a sheet name from {}", file.display()))?,
    };

    let mut repo = SheetRepository::new(config.store());
    let imported = match repo.peek(&name) {
        Ok(existing) => import_json_onto(&existing.sheet, &text),
        Err(CoreError::SheetNotFound(_)) => import_json(&text),
        Err(e) => return Err(e.to_string()),
    };
    let sheet = imported.map_err(|e| {
        tracing::warn!(file = %file.display(), error = %e, "import rejected");
        e.to_string()
    })?;

    repo.save(&name, &sheet).map_err(|e| e.to_string())?;
    println!(
        "  {} {} as sheet {}",
        "Imported".green(),
        file.display(),
        name.bold()
    );
    Ok(())
}
