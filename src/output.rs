//! Output sink — persists generated persona text to a per-user file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::identity::Username;

/// Write `text` to `user_persona_<username>.txt` under `dir`, overwriting
/// any existing file. Returns the path written.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be written.
pub fn save_persona(text: &str, username: &Username, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(format!("user_persona_{username}.txt"));
    fs::write(&path, text)?;
    Ok(path)
}
