// Single-purpose leaves: variable export, comments and returns

use super::{Line, split_expanded};
use crate::error::{Result, ScriptError};
use crate::os_family::OsFamily;
use crate::quote::{escape_batch_echo, escape_shell_value, is_identifier};
use crate::token::replace_tokens;
use serde::Deserialize;

/// Set an environment variable for the rest of the script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawExport")]
pub struct Export {
    name: String,
    value: String,
}

#[derive(Deserialize)]
struct RawExport {
    name: String,
    value: String,
}

impl TryFrom<RawExport> for Export {
    type Error = ScriptError;

    fn try_from(raw: RawExport) -> Result<Self> {
        Export::new(raw.name, raw.value)
    }
}

impl Export {
    /// # Errors
    ///
    /// Returns `Err` if `name` is not an identifier or `value` contains a
    /// line break.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        if !is_identifier(&name) {
            return Err(ScriptError::invalid_argument(
                "export",
                format!("{name:?} is not a valid variable name"),
            ));
        }
        if value.contains(['\n', '\r']) {
            return Err(ScriptError::malformed(
                "export",
                format!("value of {name} contains a line break"),
            ));
        }
        Ok(Self { name, value })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(super) fn lines(&self, family: OsFamily) -> Result<Vec<Line>> {
        let line = match family {
            OsFamily::Unix => format!("export {}=\"{}\"", self.name, escape_shell_value(&self.value)),
            OsFamily::Windows => format!("set {}={}", self.name, escape_batch_echo(&self.value)),
        };
        let line = replace_tokens(&line, family);
        if line.contains(['\n', '\r']) {
            return Err(ScriptError::malformed(
                "export",
                format!("value of {} expands to more than one line", self.name),
            ));
        }
        Ok(vec![Line::Code(line)])
    }
}

/// A line the interpreter ignores.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub(super) fn lines(&self, family: OsFamily) -> Vec<Line> {
        let marker = family.comment_marker();
        split_expanded(&replace_tokens(&self.text, family))
            .into_iter()
            .map(|text| {
                if text.is_empty() {
                    Line::Code(marker.to_string())
                } else {
                    Line::Code(format!("{marker} {text}"))
                }
            })
            .collect()
    }
}

/// Leave the current function (or the script, at top level) with an exit code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawReturn")]
pub struct Return {
    code: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(i32),
    Expression(String),
}

#[derive(Deserialize)]
struct RawReturn {
    code: RawCode,
}

impl TryFrom<RawReturn> for Return {
    type Error = ScriptError;

    fn try_from(raw: RawReturn) -> Result<Self> {
        match raw.code {
            RawCode::Number(code) => Ok(Return::code(code)),
            RawCode::Expression(expression) => Return::expression(expression),
        }
    }
}

impl Return {
    #[must_use]
    pub fn code(code: i32) -> Self {
        Self {
            code: code.to_string(),
        }
    }

    /// Return the value of an expression such as `{varl}?{varr}`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the expression is blank or spans lines.
    pub fn expression(expression: impl Into<String>) -> Result<Self> {
        let code = expression.into();
        if code.trim().is_empty() || code.contains(['\n', '\r']) {
            return Err(ScriptError::invalid_argument(
                "return",
                format!("{code:?} is not a usable exit code"),
            ));
        }
        Ok(Self { code })
    }

    pub(super) fn lines(&self, family: OsFamily) -> Vec<Line> {
        let line = match family {
            OsFamily::Unix => format!("return {}", self.code),
            OsFamily::Windows => format!("exit /b {}", self.code),
        };
        vec![Line::Code(replace_tokens(&line, family))]
    }
}
