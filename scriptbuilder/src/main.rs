//! # scriptbuilder
//!
//! Render a script document (JSON) as a POSIX shell script or a Windows batch file.
//!
//! ## Usage
//!
//! - Render the nearest `Scriptfile.json` for the host: `scriptbuilder`
//! - Render a document for Windows: `scriptbuilder setup.json --os windows`
//! - Write to a file: `scriptbuilder setup.json --os unix -o setup.sh`

/// Entry point for the CLI tool.
fn main() {
    scriptbuilder::cli::run_cli();
}
