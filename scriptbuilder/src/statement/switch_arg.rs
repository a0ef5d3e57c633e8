//! Branch on the value of a positional argument.
//!
//! UNIX output is a native `case`. A value outside the mapped set matches no
//! arm, so the block does nothing.
//!
//! Batch has no multi-way branch, so WINDOWS output is compiled to a guard and
//! a chain of labels:
//!
//! ```text
//! if not "%1" == "start" if not "%1" == "stop" (
//!    set EXCEPTION=bad argument: %1 not in start stop
//!    goto abort
//! )
//! goto CASE_%1
//! :CASE_start
//!    ...
//!    GOTO END_SWITCH
//! :CASE_stop
//!    ...
//!    GOTO END_SWITCH
//! :END_SWITCH
//! ```
//!
//! Here an unmatched value jumps to `abort` (defined by the enclosing
//! script). The two dialects deliberately differ on that point.

use super::{INDENT, Line, Statement, indent};
use crate::error::{Result, ScriptError};
use crate::os_family::OsFamily;
use crate::quote::{case_pattern, escape_batch_echo, is_label_safe, sanitise_label};
use serde::Deserialize;
use std::collections::HashMap;

/// Variable set before jumping to `abort` on an unmatched value
pub const ERROR_VARIABLE: &str = "EXCEPTION";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Case {
    value: String,
    label: String,
    statement: Statement,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSwitchArg")]
pub struct SwitchArg {
    index: usize,
    cases: Vec<Case>,
}

#[derive(Deserialize)]
struct RawCase {
    value: String,
    then: Statement,
}

#[derive(Deserialize)]
struct RawSwitchArg {
    index: usize,
    cases: Vec<RawCase>,
}

impl TryFrom<RawSwitchArg> for SwitchArg {
    type Error = ScriptError;

    fn try_from(raw: RawSwitchArg) -> Result<Self> {
        SwitchArg::new(
            raw.index,
            raw.cases.into_iter().map(|case| (case.value, case.then)),
        )
    }
}

impl SwitchArg {
    /// Branch on argument `index` (1-based). Cases keep the given order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index` is 0, there are no cases, a value holds a
    /// double quote or line break, a value repeats, or two values reduce to
    /// the same batch label.
    pub fn new<I, S>(index: usize, cases: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Statement)>,
        S: Into<String>,
    {
        if index == 0 {
            return Err(ScriptError::invalid_argument(
                "switch_arg",
                "argument index is 1-based, got 0",
            ));
        }

        let mut labels: HashMap<String, String> = HashMap::new();
        let mut built = Vec::new();
        for (value, statement) in cases {
            let value = value.into();
            if value.contains(['"', '\n', '\r']) {
                return Err(ScriptError::malformed(
                    "switch_arg",
                    format!("case value {value:?} contains a double quote or line break"),
                ));
            }
            let label = sanitise_label(&value);
            // cmd.exe resolves `goto` targets without regard to case
            let key = label.to_ascii_lowercase();
            if let Some(existing) = labels.get(&key) {
                let reason = if *existing == value {
                    format!("case value {value:?} appears more than once")
                } else {
                    format!("case values {existing:?} and {value:?} both map to label CASE_{label}")
                };
                return Err(ScriptError::malformed("switch_arg", reason));
            }
            labels.insert(key, value.clone());
            built.push(Case {
                value,
                label,
                statement,
            });
        }

        if built.is_empty() {
            return Err(ScriptError::invalid_argument("switch_arg", "no cases given"));
        }

        Ok(Self {
            index,
            cases: built,
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cases in rendering order
    pub fn cases(&self) -> impl Iterator<Item = (&str, &Statement)> {
        self.cases
            .iter()
            .map(|case| (case.value.as_str(), &case.statement))
    }

    /// Label fragment a value is dispatched to in batch output
    #[must_use]
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.cases
            .iter()
            .find(|case| case.value == value)
            .map(|case| case.label.as_str())
    }

    pub(super) fn lines(&self, family: OsFamily) -> Result<Vec<Line>> {
        let Some(arg) = family.positional(self.index) else {
            return Err(ScriptError::unsupported(
                "switch_arg",
                format!("argument index {} (only 1 to 9 are addressable)", self.index),
                family,
            ));
        };
        match family {
            OsFamily::Unix => self.unix_lines(&arg),
            OsFamily::Windows => self.windows_lines(&arg),
        }
    }

    fn unix_lines(&self, arg: &str) -> Result<Vec<Line>> {
        let mut lines = vec![Line::Code(format!("case {arg} in"))];
        for case in &self.cases {
            lines.push(Line::Code(format!("{})", case_pattern(&case.value))));
            lines.extend(indent(case.statement.lines(OsFamily::Unix)?, INDENT));
            lines.push(Line::Code(format!("{INDENT};;")));
        }
        lines.push(Line::Code("esac".to_string()));
        Ok(lines)
    }

    fn windows_lines(&self, arg: &str) -> Result<Vec<Line>> {
        let family = OsFamily::Windows;
        let mut lines = Vec::new();

        // Guard: true only when the argument matches none of the values
        let mut guard = String::new();
        for case in &self.cases {
            guard.push_str(&format!(
                "if not \"{arg}\" == \"{}\" ",
                case.value.replace('%', "%%")
            ));
        }
        guard.push('(');
        lines.push(Line::Code(guard));

        let expected: Vec<String> = self
            .cases
            .iter()
            .map(|case| escape_batch_echo(&case.value))
            .collect();
        lines.push(Line::Code(format!(
            "{INDENT}set {ERROR_VARIABLE}=bad argument: {arg} not in {}",
            expected.join(" ")
        )));
        lines.push(Line::Code(format!("{INDENT}goto abort")));
        lines.push(Line::Code(")".to_string()));

        // Jumping straight to CASE_<arg> only works when every value is
        // already its own label
        if self.cases.iter().all(|case| is_label_safe(&case.value)) {
            lines.push(Line::Code(format!("goto CASE_{arg}")));
        } else {
            for case in &self.cases {
                lines.push(Line::Code(format!(
                    "if \"{arg}\" == \"{}\" goto CASE_{}",
                    case.value.replace('%', "%%"),
                    case.label
                )));
            }
        }

        for case in &self.cases {
            lines.push(Line::Code(format!(":CASE_{}", case.label)));
            lines.extend(indent(case.statement.lines(family)?, INDENT));
            lines.push(Line::Code(format!("{INDENT}GOTO END_SWITCH")));
        }
        lines.push(Line::Code(":END_SWITCH".to_string()));
        Ok(lines)
    }
}
