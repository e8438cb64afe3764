pub mod attack;
pub mod defend;
pub mod delete;
pub mod export;
pub mod gods;
pub mod import;
pub mod list;
pub mod names;
pub mod new;
pub mod power;
pub mod prophecy;
pub mod roll;
pub mod set;
pub mod show;
pub mod transformation;

use std::time::{Duration, Instant};

use colored::Colorize;
use dg_core::{DirStore, KeyValueStore, SheetSession};
use dg_oracle::RevealGate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::CliConfig;

/// Store key for the dice roll log.
const ROLL_LOG_KEY: &str = "dice_roll_log";

/// Store key for the prophecy history.
const PROPHECY_HISTORY_KEY: &str = "oracle_history";

/// Open the named sheet, or the last opened one.
fn open_session(config: &CliConfig, sheet: Option<&str>) -> Result<SheetSession<DirStore>, String> {
    let mut session = SheetSession::new(config.store());
    let name = match sheet {
        Some(name) => name.to_string(),
        None => session
            .repository()
            .last_opened()
            .map_err(|e| e.to_string())?
            .ok_or("no sheet selected. Pass --sheet <name> or create one with `demigod new`")?,
    };
    session.load(&name).map_err(|e| e.to_string())?;
    Ok(session)
}

/// Save the session under the name it was opened with.
fn save_session(session: &mut SheetSession<DirStore>) -> Result<(), String> {
    session
        .save_current()
        .map_err(|e| format!("could not save sheet: {e}"))
}

/// Read a JSON value from the data directory, falling back to its default.
///
/// Unreadable data is logged and replaced rather than failing the command.
fn load_state<T: DeserializeOwned + Default>(config: &CliConfig, key: &str) -> Result<T, String> {
    let Some(raw) = config.store().get(key).map_err(|e| e.to_string())? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable state");
            Ok(T::default())
        }
    }
}

/// Write a JSON value to the data directory.
fn store_state<T: Serialize>(config: &CliConfig, key: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    config.store().set(key, &json).map_err(|e| e.to_string())
}

/// Hold back a result for `delay` when dramatic mode is on.
fn reveal_after(config: &CliConfig, delay: Duration, message: &str) -> Result<(), String> {
    if !config.dramatic {
        return Ok(());
    }
    println!("  {}", message.dimmed());
    let mut gate = RevealGate::new();
    let ticket = gate
        .request(Instant::now(), delay)
        .map_err(|e| e.to_string())?;
    std::thread::sleep(gate.remaining(Instant::now()));
    gate.complete(ticket, Instant::now())
        .map_err(|e| e.to_string())
}

/// The sheet's display name, or a placeholder.
fn display_name(name: &str) -> String {
    if name.trim().is_empty() {
        "(unnamed)".to_string()
    } else {
        name.to_string()
    }
}
