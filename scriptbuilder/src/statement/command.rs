// Statements that run something: raw command lines, literal text, function calls

use super::{Line, split_expanded};
use crate::error::{Result, ScriptError};
use crate::os_family::OsFamily;
use crate::quote::{is_identifier, quote_batch_arg, quote_shell_arg};
use crate::token::replace_tokens;
use serde::Deserialize;

/// Run a single command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Exec {
    command: String,
    /// Replace the running shell with the command (`exec` on UNIX)
    #[serde(default)]
    replace_shell: bool,
}

impl Exec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            replace_shell: false,
        }
    }

    pub fn replacing_shell(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            replace_shell: true,
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    pub(super) fn lines(&self, family: OsFamily) -> Result<Vec<Line>> {
        let command = replace_tokens(&self.command, family);
        if command.contains(['\n', '\r']) {
            return Err(ScriptError::malformed(
                "exec",
                format!("command {:?} spans more than one line", self.command),
            ));
        }
        if command.trim().is_empty() {
            return Err(ScriptError::malformed("exec", "command is empty"));
        }

        let line = match (family, self.replace_shell) {
            (_, false) => command,
            (OsFamily::Unix, true) => format!("exec {command}"),
            (OsFamily::Windows, true) => {
                return Err(ScriptError::unsupported(
                    "exec",
                    "replacing the shell process",
                    family,
                ));
            }
        };
        Ok(vec![Line::Code(line)])
    }
}

/// Emit text exactly as written, after token substitution.
///
/// The text may hold several lines, separated by `{lf}` or real line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Interpret {
    text: String,
}

impl Interpret {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(super) fn lines(&self, family: OsFamily) -> Vec<Line> {
        let text = replace_tokens(&self.text, family);
        if text.is_empty() {
            return Vec::new();
        }
        split_expanded(&text).into_iter().map(Line::Code).collect()
    }
}

/// Invoke a function defined elsewhere in the script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCall")]
pub struct Call {
    function: String,
    args: Vec<String>,
}

#[derive(Deserialize)]
struct RawCall {
    function: String,
    #[serde(default)]
    args: Vec<String>,
}

impl TryFrom<RawCall> for Call {
    type Error = ScriptError;

    fn try_from(raw: RawCall) -> Result<Self> {
        Call::new(raw.function, raw.args)
    }
}

impl Call {
    /// # Errors
    ///
    /// Returns `Err` if `function` is not an identifier, or an argument
    /// contains a line break.
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let function = function.into();
        if !is_identifier(&function) {
            return Err(ScriptError::invalid_argument(
                "call",
                format!("{function:?} is not a valid function name"),
            ));
        }
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if let Some(arg) = args.iter().find(|arg| arg.contains(['\n', '\r'])) {
            return Err(ScriptError::malformed(
                "call",
                format!("argument {arg:?} contains a line break"),
            ));
        }
        Ok(Self { function, args })
    }

    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    pub(super) fn lines(&self, family: OsFamily) -> Vec<Line> {
        let mut line = match family {
            OsFamily::Unix => self.function.clone(),
            OsFamily::Windows => format!("call :{}", self.function),
        };
        for arg in &self.args {
            line.push(' ');
            match family {
                OsFamily::Unix => line.push_str(&quote_shell_arg(arg)),
                OsFamily::Windows => line.push_str(&quote_batch_arg(arg)),
            }
        }
        vec![Line::Code(replace_tokens(&line, family))]
    }
}
