//! Script document (Scriptfile) discovery and default target selection.

use crate::os_family::OsFamily;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no document is given on the command line
pub const SCRIPTFILE_NAME: &str = "Scriptfile.json";

/// Environment variable naming the default target family
pub const OS_ENV_VAR: &str = "SCRIPTBUILDER_OS";

/// Error message when no Scriptfile is found.
pub const NO_SCRIPTFILE_ERROR: &str =
    "No Scriptfile.json found. Pass a document path or create ./Scriptfile.json.";

thread_local! {
    static CUSTOM_SCRIPTFILE_PATH: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Set a custom Scriptfile path for the current thread
pub fn set_custom_scriptfile_path(path: Option<PathBuf>) {
    CUSTOM_SCRIPTFILE_PATH.with(|p| {
        *p.borrow_mut() = path;
    });
}

fn get_custom_scriptfile_path() -> Option<PathBuf> {
    CUSTOM_SCRIPTFILE_PATH.with(|p| p.borrow().clone())
}

/// Get the user's home directory in a cross-platform way.
pub fn get_home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home));
    }

    if let Some(userprofile) = std::env::var_os("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }

    None
}

/// Resolve a path that may name a directory holding a Scriptfile
fn resolve_in(path: &Path) -> Option<PathBuf> {
    let candidate = if path.is_dir() {
        path.join(SCRIPTFILE_NAME)
    } else {
        path.to_path_buf()
    };
    candidate.exists().then_some(candidate)
}

/// Find the Scriptfile to render.
///
/// A custom path set with [`set_custom_scriptfile_path`] wins. Otherwise the
/// search starts in `start` and walks upwards, stopping after the home
/// directory or the filesystem root.
pub fn find_scriptfile_path(start: &Path) -> Option<PathBuf> {
    if let Some(custom_path) = get_custom_scriptfile_path() {
        return resolve_in(&custom_path);
    }

    let home_dir = get_home_dir();
    let mut current_dir = start.to_path_buf();

    loop {
        let candidate = current_dir.join(SCRIPTFILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        if home_dir.as_ref().is_some_and(|home| current_dir == *home) {
            return None;
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Load the Scriptfile found from the current directory.
/// Returns the path and its contents.
///
/// # Errors
///
/// Returns `Err` if no Scriptfile exists or it cannot be read.
pub fn load_scriptfile() -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let current_dir = std::env::current_dir()?;
    let path = find_scriptfile_path(&current_dir).ok_or(NO_SCRIPTFILE_ERROR)?;
    let content = fs::read_to_string(&path)?;
    Ok((path, content))
}

/// Target family used when none is requested explicitly.
///
/// Reads [`OS_ENV_VAR`]; an unset or unrecognised value falls back to the
/// host platform.
pub fn default_family() -> OsFamily {
    match std::env::var(OS_ENV_VAR) {
        Ok(value) => OsFamily::from_name(&value).unwrap_or_else(|| {
            tracing::warn!(%value, "ignoring unrecognised {OS_ENV_VAR}");
            OsFamily::default()
        }),
        Err(_) => OsFamily::default(),
    }
}
