use std::path::{Path, PathBuf};

use dg_core::transfer::{export_file_name, export_json};

use crate::config::CliConfig;

/// Write the sheet as JSON to `output`, to a file named after the sheet
/// when `to_file` is set, or to stdout.
pub fn run(
    config: &CliConfig,
    sheet: Option<&str>,
    output: Option<&Path>,
    to_file: bool,
) -> Result<(), String> {
    let session = super::open_session(config, sheet)?;
    let content = export_json(session.sheet()).map_err(|e| e.to_string())?;

    let target = match output {
        Some(path) => Some(path.to_path_buf()),
        None if to_file => Some(PathBuf::from(export_file_name(session.current_name()))),
        None => None,
    };

    if let Some(path) = target {
        std::fs::write(&path, format!("{content}\n"))
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}
