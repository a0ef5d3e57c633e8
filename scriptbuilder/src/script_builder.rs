//! Assemble statements into a complete, runnable script.
//!
//! The builder adds what every script needs around the caller's statements:
//! the interpreter header, an `abort` handler (the target of an unmatched
//! [`SwitchArg`](crate::statement::SwitchArg) on WINDOWS), function
//! definitions and exported variables.

use crate::error::{Result, ScriptError};
use crate::os_family::OsFamily;
use crate::quote::is_identifier;
use crate::statement::{self, ERROR_VARIABLE, Export, INDENT, Line, Statement};

const UNIX_HEADER: &[&str] = &[
    "#!/bin/bash",
    "set +u",
    "shopt -s xpg_echo",
    "shopt -s expand_aliases",
];

/// Names the generated script already uses for its own labels or functions
const RESERVED_NAMES: &[&str] = &["abort", "END_SWITCH"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuilder {
    variables: Vec<Export>,
    functions: Vec<(String, Statement)>,
    statements: Vec<Statement>,
}

impl ScriptBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn add_statements(&mut self, statements: impl IntoIterator<Item = Statement>) {
        self.statements.extend(statements);
    }

    /// Export a variable before the main statements run.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the variable is invalid or already exported.
    pub fn export_variable(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let export = Export::new(name, value)?;
        if self.variables.iter().any(|existing| existing.name() == export.name()) {
            return Err(ScriptError::invalid_argument(
                "script",
                format!("variable {} is exported twice", export.name()),
            ));
        }
        self.variables.push(export);
        Ok(())
    }

    /// Define a function the main statements can reach with a `call`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `name` is not an identifier, is reserved by the
    /// script itself, or is already defined.
    pub fn define_function(&mut self, name: impl Into<String>, body: Statement) -> Result<()> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ScriptError::invalid_argument(
                "script",
                format!("{name:?} is not a valid function name"),
            ));
        }
        // Batch labels match without regard to case
        let reserved = RESERVED_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(&name))
            || name
                .get(..5)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("CASE_"));
        if reserved {
            return Err(ScriptError::invalid_argument(
                "script",
                format!("function name {name} is reserved"),
            ));
        }
        if self
            .functions
            .iter()
            .any(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            return Err(ScriptError::invalid_argument(
                "script",
                format!("function {name} is defined twice"),
            ));
        }
        self.functions.push((name, body));
        Ok(())
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Render the whole script for `family`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any statement; no partial text is
    /// ever returned.
    #[tracing::instrument(skip_all, fields(family = %family))]
    pub fn render(&self, family: OsFamily) -> Result<String> {
        let all: Vec<Statement> = self
            .functions
            .iter()
            .map(|(_, body)| body.clone())
            .chain(self.statements.iter().cloned())
            .collect();
        statement::check_switch_labels(&all, family)?;

        let lines = match family {
            OsFamily::Unix => self.unix_lines()?,
            OsFamily::Windows => self.windows_lines()?,
        };
        tracing::debug!(
            functions = self.functions.len(),
            variables = self.variables.len(),
            statements = self.statements.len(),
            lines = lines.len(),
            "rendered script"
        );
        Ok(statement::join_lines(&lines, family))
    }

    fn unix_lines(&self) -> Result<Vec<Line>> {
        let family = OsFamily::Unix;
        let mut lines: Vec<Line> = UNIX_HEADER.iter().map(|l| code(l)).collect();

        lines.push(code("function abort {"));
        lines.push(code(&format!("{INDENT}echo \"aborting: $@\" 1>&2")));
        lines.push(code(&format!("{INDENT}exit 1")));
        lines.push(code("}"));

        for (name, body) in &self.functions {
            lines.push(code(&format!("function {name} {{")));
            lines.extend(statement::indent(body.lines(family)?, INDENT));
            lines.push(code(&format!("{INDENT}return 0")));
            lines.push(code("}"));
        }

        self.push_body(&mut lines, family)?;
        lines.push(code("exit $?"));
        Ok(lines)
    }

    fn windows_lines(&self) -> Result<Vec<Line>> {
        let family = OsFamily::Windows;
        let mut lines = vec![code("@echo off")];

        self.push_body(&mut lines, family)?;
        lines.push(code("exit /b 0"));

        lines.push(code(":abort"));
        lines.push(code(&format!("{INDENT}echo aborting: %{ERROR_VARIABLE}%")));
        lines.push(code(&format!("{INDENT}exit /b 1")));

        for (name, body) in &self.functions {
            lines.push(code(&format!(":{name}")));
            lines.extend(statement::indent(body.lines(family)?, INDENT));
            lines.push(code(&format!("{INDENT}exit /b 0")));
        }
        Ok(lines)
    }

    /// Exported variables followed by the main statements
    fn push_body(&self, lines: &mut Vec<Line>, family: OsFamily) -> Result<()> {
        for variable in &self.variables {
            lines.extend(Statement::Export(variable.clone()).lines(family)?);
        }
        for statement in &self.statements {
            lines.extend(statement.lines(family)?);
        }
        Ok(())
    }
}

fn code(text: &str) -> Line {
    Line::Code(text.to_string())
}
