//! # scriptbuilder
//!
//! One statement tree, two script dialects: build [`statement::Statement`]s,
//! then render them as a POSIX shell script or a Windows batch file.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod os_family;
pub mod quote;
pub mod script_builder;
pub mod statement;
pub mod statements;
pub mod token;

pub use error::ScriptError;
pub use os_family::OsFamily;
pub use script_builder::ScriptBuilder;
pub use statement::Statement;

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
