//! Flat directory listing and filename hygiene for the shared catalog

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::protocol::{MAX_CATALOG_LEN, MAX_NAME_LEN};

/// Regular files directly under `root`, sorted case-insensitively.
/// Subdirectories, symlinked directories, unreadable entries, and names that
/// could never fit a name field are skipped.
pub fn list_directory(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|n| n.len() <= MAX_NAME_LEN)
        .collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    names
}

/// Display text for a catalog, truncated to whole entries that fit the
/// catalog field. Returns the text and how many entries made it in; index
/// validation must use that count so the menu and the check agree.
pub fn render(names: &[String]) -> (String, usize) {
    let mut text = String::from("Available files:\n");
    let mut kept = 0;
    for (i, name) in names.iter().enumerate() {
        let line = format!("\t[{}] {}\n", i + 1, name);
        if text.len() + line.len() > MAX_CATALOG_LEN {
            break;
        }
        text.push_str(&line);
        kept += 1;
    }
    (text, kept)
}

/// Rejects remote-supplied names that could reach outside the target
/// directory: empty names, NUL bytes, path separators, and dot references.
/// Both sides run this before building any path from a peer's name.
pub fn sanitize_name(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(Error::FileAccess("empty filename".into()));
    }
    if name.contains('\0') {
        return Err(Error::FileAccess("filename contains NUL byte".into()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::FileAccess(format!(
            "filename {name:?} contains a path separator"
        )));
    }
    if name == "." || name == ".." {
        return Err(Error::FileAccess(format!(
            "filename {name:?} is a directory reference"
        )));
    }
    Ok(name)
}
