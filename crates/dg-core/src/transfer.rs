//! Moving sheets in and out as JSON files.
//!
//! Export writes the bare record, pretty-printed. Import accepts either a
//! bare record or a saved envelope; save metadata is ignored. Importing onto
//! an existing sheet overlays only the fields present in the file.

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::sheet::CharacterSheet;

/// File name used when exporting a sheet that has never been named.
pub const DEFAULT_EXPORT_STEM: &str = "divine_sheet";

/// Serialize a sheet as pretty-printed JSON.
pub fn export_json(sheet: &CharacterSheet) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(sheet)?)
}

/// The file name an export of `sheet_name` should be written to.
pub fn export_file_name(sheet_name: Option<&str>) -> String {
    let stem = sheet_name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_EXPORT_STEM);
    format!("{stem}.json")
}

/// Parse a sheet from JSON, filling absent fields with defaults.
pub fn import_json(text: &str) -> CoreResult<CharacterSheet> {
    import_json_onto(&CharacterSheet::default(), text)
}

/// Overlay the fields in `text` onto `current` and return the result.
///
/// `current` is never modified; on error the caller keeps what it had.
pub fn import_json_onto(current: &CharacterSheet, text: &str) -> CoreResult<CharacterSheet> {
    let incoming: Value =
        serde_json::from_str(text).map_err(|e| CoreError::ImportFailed(e.to_string()))?;
    let Value::Object(fields) = incoming else {
        return Err(CoreError::ImportFailed(
            "expected a JSON object describing a character".to_string(),
        ));
    };

    let mut merged = serde_json::to_value(current)?;
    if let Value::Object(base) = &mut merged {
        for (key, value) in fields {
            base.insert(key, value);
        }
    }

    let mut sheet: CharacterSheet =
        serde_json::from_value(merged).map_err(|e| CoreError::ImportFailed(e.to_string()))?;
    sheet.normalize();
    Ok(sheet)
}
