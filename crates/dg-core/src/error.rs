/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when editing, saving, or loading a sheet.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The text does not name any attribute.
    #[error("unknown attribute: \"{input}\"{}", format_suggestions(.suggestions))]
    UnknownAttribute {
        /// What the user typed.
        input: String,
        /// Close attribute keys, best match first.
        suggestions: Vec<String>,
    },

    /// The id does not name a patron deity.
    #[error("unknown patron: \"{0}\"")]
    UnknownPatron(String),

    /// No divine power with this id exists on the sheet.
    #[error("divine power not found: {0}")]
    PowerNotFound(String),

    /// A sheet cannot be saved without a name.
    #[error("a sheet needs a name before it can be saved")]
    EmptySheetName,

    /// No sheet has been saved under this name.
    #[error("sheet not found: \"{0}\"")]
    SheetNotFound(String),

    /// The stored data for a sheet could not be decoded.
    #[error("sheet \"{name}\" is corrupt: {source}")]
    CorruptSheet {
        /// The sheet name.
        name: String,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// Imported text was not a usable character record.
    #[error("import failed: {0}")]
    ImportFailed(String),

    /// Encoding a record as JSON failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store could not be read or written.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}
