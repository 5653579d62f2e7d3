//! Interactive editing through the user's `$EDITOR`

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::errors::FreightError;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String, FreightError> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(FreightError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in `editor` and waits for it to close.
/// The editor command may carry arguments, e.g. `code --wait`.
pub fn open_in_editor(editor: &str, path: &Path) -> Result<String, FreightError> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| FreightError::Editor("empty editor command".to_string()))?;

    debug!("Opening {} with {}", path.display(), editor);
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| FreightError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(FreightError::Aborted(format!(
            "editor '{}' exited with {}",
            editor, status
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Writes `initial` to a temporary file, lets the user edit it and returns
/// the edited text. The file is removed on every exit path.
pub fn edit_text(editor: &str, initial: &str, extension: &str) -> Result<String, FreightError> {
    let mut file = tempfile::Builder::new()
        .prefix("freight-")
        .suffix(extension)
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    open_in_editor(editor, file.path())
}
