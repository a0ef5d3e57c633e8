//! JSON description of a whole script.
//!
//! ```json
//! {
//!   "variables": [{ "name": "APP_HOME", "value": "{home}{fs}app" }],
//!   "functions": [{ "name": "greet", "body": [{ "type": "exec", "command": "echo hi" }] }],
//!   "statements": [
//!     { "type": "switch_arg", "index": 1, "cases": [
//!       { "value": "hello", "then": { "type": "call", "function": "greet" } }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Every statement is validated while it is deserialized, so a document that
//! parses always yields a well-formed tree.

use crate::error::ScriptError;
use crate::script_builder::ScriptBuilder;
use crate::statement::{Statement, StatementList};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptDocument {
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// A document that could not be read or turned into a script
#[derive(Debug)]
pub struct DocumentError {
    /// Human-readable error message
    pub message: String,
    /// Line number (1-indexed), when the JSON itself was at fault
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DocumentError {}

impl From<serde_json::Error> for DocumentError {
    fn from(error: serde_json::Error) -> Self {
        use serde_json::error::Category;

        // serde_json's text already ends with the position
        let kind = match error.classify() {
            Category::Io => "could not read document",
            Category::Syntax => "invalid JSON",
            Category::Data => "invalid document",
            Category::Eof => "unexpected end of document",
        };
        let line = error.line();
        let column = error.column();
        DocumentError {
            message: format!("{kind}: {error}"),
            line: (line > 0).then_some(line),
            column: (line > 0).then_some(column),
        }
    }
}

impl From<ScriptError> for DocumentError {
    fn from(error: ScriptError) -> Self {
        DocumentError {
            message: error.to_string(),
            line: None,
            column: None,
        }
    }
}

impl ScriptDocument {
    /// Parse and validate a document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `source` is not valid JSON or describes an invalid
    /// statement.
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Turn the document into a builder ready to render.
    ///
    /// # Errors
    ///
    /// Returns `Err` on duplicate or invalid variable and function names.
    pub fn into_builder(self) -> Result<ScriptBuilder, DocumentError> {
        let mut builder = ScriptBuilder::new();
        for variable in self.variables {
            builder.export_variable(variable.name, variable.value)?;
        }
        for function in self.functions {
            let body: StatementList = function.body.into_iter().collect();
            builder.define_function(function.name, body.into())?;
        }
        builder.add_statements(self.statements);
        Ok(builder)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::os_family::OsFamily;
    use crate::statements::{append_file, interpret, new_statement_list, switch_arg};

    #[test]
    fn test_parse_switch_document() {
        let document = ScriptDocument::parse(
            r#"{
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
            }"#,
        )
        .unwrap();

        let expected = switch_arg(
            1,
            [
                (
                    "0",
                    new_statement_list([
                        append_file("{tmp}{fs}{uid}{fs}scripttest{fs}temp.txt", ["hello world"])
                            .unwrap(),
                        interpret("echo hello zero{lf}"),
                    ]),
                ),
                ("1", interpret("echo hello one{lf}")),
            ],
        )
        .unwrap();
        assert_eq!(document.statements, vec![expected]);
    }

    #[test]
    fn test_parse_rejects_invalid_statement() {
        let err = ScriptDocument::parse(
            r#"{ "statements": [ { "type": "switch_arg", "index": 0, "cases": [] } ] }"#,
        )
        .unwrap_err();
        assert!(err.message.contains("argument index is 1-based"), "{}", err.message);
        assert!(err.message.starts_with("invalid document: "), "{}", err.message);
    }

    #[test]
    fn test_parse_reports_syntax_position() {
        let err = ScriptDocument::parse("{\n  \"statements\": ]\n}").unwrap_err();
        assert!(err.message.starts_with("invalid JSON: "), "{}", err.message);
        assert_eq!(err.line, Some(2));
        assert!(err.column.is_some());
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn test_parse_rejects_unknown_statement_type() {
        let err = ScriptDocument::parse(r#"{ "statements": [ { "type": "loop" } ] }"#).unwrap_err();
        assert!(err.message.contains("unknown variant"), "{}", err.message);
    }

    #[test]
    fn test_return_accepts_number_or_expression() {
        let document = ScriptDocument::parse(
            r#"{ "statements": [
                { "type": "return", "code": 2 },
                { "type": "return", "code": "{varl}?{varr}" }
            ] }"#,
        )
        .unwrap();
        let text = document.into_builder().unwrap().render(OsFamily::Unix).unwrap();
        assert!(text.contains("\nreturn 2\nreturn $?\n"));
    }

    #[test]
    fn test_into_builder_renders_functions() {
        let document = ScriptDocument::parse(
            r#"{
                "variables": [{ "name": "APP", "value": "demo" }],
                "functions": [{ "name": "greet", "body": [
                    { "type": "exec", "command": "echo hi" }
                ] }],
                "statements": [{ "type": "call", "function": "greet", "args": ["now"] }]
            }"#,
        )
        .unwrap();
        let text = document.into_builder().unwrap().render(OsFamily::Windows).unwrap();
        assert!(text.starts_with("@echo off\r\nset APP=demo\r\ncall :greet now\r\nexit /b 0\r\n"));
        assert!(text.ends_with(":greet\r\n   echo hi\r\n   exit /b 0\r\n"));
    }

    #[test]
    fn test_into_builder_rejects_duplicate_function() {
        let document = ScriptDocument::parse(
            r#"{ "functions": [
                { "name": "a", "body": [] },
                { "name": "a", "body": [] }
            ] }"#,
        )
        .unwrap();
        assert!(document.into_builder().is_err());
    }
}
