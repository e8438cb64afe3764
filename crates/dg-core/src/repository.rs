//! Named sheet persistence.
//!
//! Sheets are stored as JSON under `divine_sheet_<name>`, each wrapped with a
//! save timestamp and format version. A separate `last_divine_sheet` key
//! remembers which sheet was opened most recently so a session can resume it.
//! Saving overwrites in place; there is no history or migration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::sheet::CharacterSheet;
use crate::store::KeyValueStore;

/// Key prefix for saved sheets.
pub const SHEET_KEY_PREFIX: &str = "divine_sheet_";

/// Key holding the name of the most recently opened sheet.
pub const LAST_SHEET_KEY: &str = "last_divine_sheet";

/// Format version written alongside every saved sheet.
pub const FORMAT_VERSION: &str = "1.0";

/// A sheet as it is persisted: the record plus save metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSheet {
    /// The character record.
    #[serde(flatten)]
    pub sheet: CharacterSheet,
    /// When the sheet was last saved.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    /// Format version of the saved data.
    #[serde(default)]
    pub version: Option<String>,
}

/// Save, load, list, and delete named sheets in a key-value store.
#[derive(Debug)]
pub struct SheetRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SheetRepository<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save `sheet` under `name`, replacing any sheet with that name.
    pub fn save(&mut self, name: &str, sheet: &CharacterSheet) -> CoreResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptySheetName);
        }

        let saved = SavedSheet {
            sheet: sheet.clone(),
            saved_at: Some(Utc::now()),
            version: Some(FORMAT_VERSION.to_string()),
        };
        let json = serde_json::to_string(&saved)?;
        self.store.set(&sheet_key(name), &json)?;
        self.store.set(LAST_SHEET_KEY, name)?;
        tracing::info!(sheet = name, "saved sheet");
        Ok(())
    }

    /// Read the sheet saved under `name` without marking it as opened.
    pub fn peek(&self, name: &str) -> CoreResult<SavedSheet> {
        let name = name.trim();
        let raw = self
            .store
            .get(&sheet_key(name))?
            .ok_or_else(|| CoreError::SheetNotFound(name.to_string()))?;

        let mut saved: SavedSheet =
            serde_json::from_str(&raw).map_err(|source| CoreError::CorruptSheet {
                name: name.to_string(),
                source,
            })?;
        saved.sheet.normalize();
        Ok(saved)
    }

    /// Load the sheet saved under `name`, with save metadata.
    ///
    /// Fails without side effects if the sheet is missing or corrupt.
    pub fn load_saved(&mut self, name: &str) -> CoreResult<SavedSheet> {
        let name = name.trim();
        let saved = self.peek(name)?;
        self.store.set(LAST_SHEET_KEY, name)?;
        tracing::info!(sheet = name, "loaded sheet");
        Ok(saved)
    }

    /// Load the sheet saved under `name`.
    pub fn load(&mut self, name: &str) -> CoreResult<CharacterSheet> {
        self.load_saved(name).map(|saved| saved.sheet)
    }

    /// Delete the sheet saved under `name`. Returns true if it existed.
    pub fn delete(&mut self, name: &str) -> CoreResult<bool> {
        let name = name.trim();
        let existed = self.store.remove(&sheet_key(name))?;
        if self.last_opened()?.as_deref() == Some(name) {
            self.store.remove(LAST_SHEET_KEY)?;
        }
        if existed {
            tracing::info!(sheet = name, "deleted sheet");
        }
        Ok(existed)
    }

    /// Names of all saved sheets, sorted.
    pub fn list(&self) -> CoreResult<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(SHEET_KEY_PREFIX).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Returns true if a sheet is saved under `name`.
    pub fn exists(&self, name: &str) -> CoreResult<bool> {
        Ok(self.store.get(&sheet_key(name.trim()))?.is_some())
    }

    /// Name of the most recently saved or loaded sheet.
    pub fn last_opened(&self) -> CoreResult<Option<String>> {
        Ok(self
            .store
            .get(LAST_SHEET_KEY)?
            .filter(|name| !name.trim().is_empty()))
    }
}

fn sheet_key(name: &str) -> String {
    format!("{SHEET_KEY_PREFIX}{name}")
}

/// An editing session: the sheet on screen and the name it is saved under.
///
/// Failed loads leave the current sheet untouched.
#[derive(Debug)]
pub struct SheetSession<S> {
    repository: SheetRepository<S>,
    sheet: CharacterSheet,
    current_name: Option<String>,
}

impl<S: KeyValueStore> SheetSession<S> {
    /// Start a session with a blank sheet.
    pub fn new(store: S) -> Self {
        Self {
            repository: SheetRepository::new(store),
            sheet: CharacterSheet::new(),
            current_name: None,
        }
    }

    /// Start a session, resuming the last opened sheet if there is one.
    ///
    /// A missing or corrupt last sheet is logged and the session starts blank.
    pub fn resume(store: S) -> CoreResult<Self> {
        let mut session = Self::new(store);
        if let Some(name) = session.repository.last_opened()? {
            if let Err(e) = session.load(&name) {
                tracing::warn!(sheet = %name, error = %e, "could not resume last sheet");
            }
        }
        Ok(session)
    }

    /// The sheet being edited.
    pub fn sheet(&self) -> &CharacterSheet {
        &self.sheet
    }

    /// Mutable access to the sheet being edited.
    pub fn sheet_mut(&mut self) -> &mut CharacterSheet {
        &mut self.sheet
    }

    /// Replace the sheet being edited, keeping the current name.
    pub fn replace_sheet(&mut self, sheet: CharacterSheet) {
        self.sheet = sheet;
    }

    /// Name the current sheet was loaded from or saved as.
    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// The repository behind the session.
    pub fn repository(&self) -> &SheetRepository<S> {
        &self.repository
    }

    /// Discard the current sheet and start a blank one.
    pub fn new_sheet(&mut self) {
        self.sheet = CharacterSheet::new();
        self.current_name = None;
    }

    /// Save the current sheet under `name`.
    pub fn save(&mut self, name: &str) -> CoreResult<()> {
        self.repository.save(name, &self.sheet)?;
        self.current_name = Some(name.trim().to_string());
        Ok(())
    }

    /// Save the current sheet under its current name.
    pub fn save_current(&mut self) -> CoreResult<()> {
        let name = self.current_name.clone().ok_or(CoreError::EmptySheetName)?;
        self.save(&name)
    }

    /// Load the sheet saved under `name` into the session.
    pub fn load(&mut self, name: &str) -> CoreResult<()> {
        let sheet = self.repository.load(name)?;
        self.sheet = sheet;
        self.current_name = Some(name.trim().to_string());
        Ok(())
    }

    /// Delete a saved sheet. Deleting the current sheet starts a blank one.
    pub fn delete(&mut self, name: &str) -> CoreResult<bool> {
        let existed = self.repository.delete(name)?;
        if self.current_name.as_deref() == Some(name.trim()) {
            self.new_sheet();
        }
        Ok(existed)
    }

    /// Names of all saved sheets, sorted.
    pub fn saved_sheets(&self) -> CoreResult<Vec<String>> {
        self.repository.list()
    }
}
