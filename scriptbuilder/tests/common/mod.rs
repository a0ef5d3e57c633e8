//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path of the compiled binary under test
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_scriptbuilder"))
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to create a Scriptfile.json in a directory
pub fn create_scriptfile(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("Scriptfile.json");
    fs::write(&path, content).unwrap();
    path
}

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper to create a Command isolated from the caller's environment.
/// Clears `SCRIPTBUILDER_OS`/`SCRIPTBUILDER_LOG` and points `HOME` at `home`
/// so the Scriptfile search stops there.
pub fn test_command(binary: &Path, home: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env_remove("SCRIPTBUILDER_OS");
    cmd.env_remove("SCRIPTBUILDER_LOG");
    cmd.env("HOME", home);
    cmd
}

/// Argument 1 selects a branch; branch "0" also appends to a file
pub const SWITCH_DOCUMENT: &str = r#"{
    "statements": [
        { "type": "switch_arg", "index": 1, "cases": [
            { "value": "0", "then": { "type": "list", "statements": [
                { "type": "append_file",
                  "path": "{tmp}{fs}{uid}{fs}scripttest{fs}temp.txt",
                  "lines": ["hello world"] },
                { "type": "interpret", "text": "echo hello zero{lf}" }
            ] } },
            { "value": "1", "then": { "type": "interpret", "text": "echo hello one{lf}" } }
        ] }
    ]
}"#;
