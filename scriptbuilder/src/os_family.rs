//! Target scripting dialects and their fixed conventions.

use clap::ValueEnum;
use std::fmt;

/// The dialect a statement tree is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OsFamily {
    /// POSIX shell (rendered for bash)
    Unix,
    /// Windows batch (cmd.exe)
    Windows,
}

impl OsFamily {
    /// Line terminator used between every emitted line.
    #[must_use]
    pub fn line_terminator(self) -> &'static str {
        match self {
            OsFamily::Unix => "\n",
            OsFamily::Windows => "\r\n",
        }
    }

    #[must_use]
    pub fn file_separator(self) -> &'static str {
        match self {
            OsFamily::Unix => "/",
            OsFamily::Windows => "\\",
        }
    }

    /// Separator between entries of a search path such as `PATH`.
    #[must_use]
    pub fn path_separator(self) -> &'static str {
        match self {
            OsFamily::Unix => ":",
            OsFamily::Windows => ";",
        }
    }

    /// Reference a variable by name, e.g. `$HOME` or `%HOME%`.
    #[must_use]
    pub fn variable(self, name: &str) -> String {
        match self {
            OsFamily::Unix => format!("${name}"),
            OsFamily::Windows => format!("%{name}%"),
        }
    }

    /// Reference positional argument `index` (1-based).
    ///
    /// Returns `None` when the dialect cannot address the argument directly;
    /// batch only exposes `%1` through `%9` without `shift`.
    #[must_use]
    pub fn positional(self, index: usize) -> Option<String> {
        match self {
            OsFamily::Unix if index <= 9 => Some(format!("${index}")),
            OsFamily::Unix => Some(format!("${{{index}}}")),
            OsFamily::Windows if (1..=9).contains(&index) => Some(format!("%{index}")),
            OsFamily::Windows => None,
        }
    }

    #[must_use]
    pub fn temp_dir(self) -> &'static str {
        match self {
            OsFamily::Unix => "/tmp",
            OsFamily::Windows => "%TEMP%",
        }
    }

    #[must_use]
    pub fn home_dir(self) -> &'static str {
        match self {
            OsFamily::Unix => "$HOME",
            OsFamily::Windows => "%USERPROFILE%",
        }
    }

    #[must_use]
    pub fn current_user(self) -> &'static str {
        match self {
            OsFamily::Unix => "$USER",
            OsFamily::Windows => "%USERNAME%",
        }
    }

    #[must_use]
    pub fn root_dir(self) -> &'static str {
        match self {
            OsFamily::Unix => "/",
            OsFamily::Windows => "c:\\",
        }
    }

    /// Marker that starts a comment line.
    #[must_use]
    pub fn comment_marker(self) -> &'static str {
        match self {
            OsFamily::Unix => "#",
            OsFamily::Windows => "@rem",
        }
    }

    /// Parse a family name as given in `SCRIPTBUILDER_OS`, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "unix" | "linux" | "posix" | "sh" => Some(OsFamily::Unix),
            "windows" | "win" | "batch" | "cmd" => Some(OsFamily::Windows),
            _ => None,
        }
    }
}

impl Default for OsFamily {
    fn default() -> Self {
        if cfg!(target_os = "windows") {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Unix => write!(f, "UNIX"),
            OsFamily::Windows => write!(f, "WINDOWS"),
        }
    }
}
