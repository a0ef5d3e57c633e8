//! The statement tree and its rendering into lines of script text.
//!
//! A [`Statement`] is dialect-neutral. Rendering it for an [`OsFamily`] is a
//! pure function of the tree and the family: nothing is cached, nothing is
//! mutated, and the same input always yields byte-identical output.

mod append_file;
mod command;
mod list;
mod simple;
mod switch_arg;

pub use append_file::{AppendFile, HEREDOC_DELIMITER};
pub use command::{Call, Exec, Interpret};
pub use list::StatementList;
pub use simple::{Comment, Export, Return};
pub use switch_arg::{ERROR_VARIABLE, SwitchArg};

use crate::error::{Result, ScriptError};
use crate::os_family::OsFamily;
use serde::Deserialize;

/// Indentation applied to the body of a switch branch
pub(crate) const INDENT: &str = "   ";

/// One rendered line, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Script code; may be indented by an enclosing block
    Code(String),
    /// Heredoc payload or terminator, which must appear exactly as written
    Literal(String),
}

impl Line {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Line::Code(text) | Line::Literal(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    Exec(Exec),
    Interpret(Interpret),
    AppendFile(AppendFile),
    List(StatementList),
    SwitchArg(SwitchArg),
    Export(Export),
    Call(Call),
    Comment(Comment),
    Return(Return),
}

impl Statement {
    /// Short name of the statement kind, used in error messages and logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Exec(_) => "exec",
            Statement::Interpret(_) => "interpret",
            Statement::AppendFile(_) => "append_file",
            Statement::List(_) => "list",
            Statement::SwitchArg(_) => "switch_arg",
            Statement::Export(_) => "export",
            Statement::Call(_) => "call",
            Statement::Comment(_) => "comment",
            Statement::Return(_) => "return",
        }
    }

    /// Render into individual lines for `family`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if this statement, or any statement below it, is
    /// malformed once tokens are expanded or needs a feature `family` lacks.
    pub fn lines(&self, family: OsFamily) -> Result<Vec<Line>> {
        match self {
            Statement::Exec(exec) => exec.lines(family),
            Statement::Interpret(interpret) => Ok(interpret.lines(family)),
            Statement::AppendFile(append) => append.lines(family),
            Statement::List(list) => list.lines(family),
            Statement::SwitchArg(switch) => switch.lines(family),
            Statement::Export(export) => export.lines(family),
            Statement::Call(call) => Ok(call.lines(family)),
            Statement::Comment(comment) => Ok(comment.lines(family)),
            Statement::Return(ret) => Ok(ret.lines(family)),
        }
    }

    /// Render into script text. Every line, including the last, ends with
    /// the family's line terminator.
    ///
    /// # Errors
    ///
    /// See [`Statement::lines`]. Additionally, batch labels are global to the
    /// script, so a tree holding more than one [`SwitchArg`] cannot be
    /// rendered for [`OsFamily::Windows`].
    pub fn render(&self, family: OsFamily) -> Result<String> {
        tracing::trace!(kind = self.kind(), %family, "rendering statement");
        check_switch_labels(std::slice::from_ref(self), family)?;
        Ok(join_lines(&self.lines(family)?, family))
    }

    /// Number of [`SwitchArg`] nodes in this tree, including this one
    pub(crate) fn switch_count(&self) -> usize {
        match self {
            Statement::List(list) => list.iter().map(Statement::switch_count).sum(),
            Statement::SwitchArg(switch) => {
                1 + switch
                    .cases()
                    .map(|(_, statement)| statement.switch_count())
                    .sum::<usize>()
            }
            _ => 0,
        }
    }
}

/// Reject trees whose switches would share `CASE_`/`END_SWITCH` labels in
/// one batch file
pub(crate) fn check_switch_labels(statements: &[Statement], family: OsFamily) -> Result<()> {
    if family != OsFamily::Windows {
        return Ok(());
    }
    let switches: usize = statements.iter().map(Statement::switch_count).sum();
    if switches > 1 {
        return Err(ScriptError::unsupported(
            "switch_arg",
            format!("{switches} switches in one script (batch labels are script-global)"),
            family,
        ));
    }
    Ok(())
}

/// Join lines, terminating each with the family's line terminator
#[must_use]
pub fn join_lines(lines: &[Line], family: OsFamily) -> String {
    let terminator = family.line_terminator();
    let mut text = String::new();
    for line in lines {
        text.push_str(line.text());
        text.push_str(terminator);
    }
    text
}

/// Indent every non-empty code line by `prefix`, dropping empty code lines.
/// Literal lines are kept exactly as they are.
pub(crate) fn indent(lines: Vec<Line>, prefix: &str) -> Vec<Line> {
    lines
        .into_iter()
        .filter_map(|line| match line {
            Line::Code(text) if text.trim().is_empty() => None,
            Line::Code(text) => Some(Line::Code(format!("{prefix}{text}"))),
            literal @ Line::Literal(_) => Some(literal),
        })
        .collect()
}

/// Split token-expanded text into lines. One trailing line break is
/// ignored, and an empty string is a single empty line.
pub(crate) fn split_expanded(text: &str) -> Vec<String> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::statements::{append_file, comment, export, interpret, new_statement_list, switch_arg};

    #[test]
    fn test_indent_skips_literals_and_blank_code() {
        let lines = vec![
            Line::Code("cat >> f <<'END_OF_FILE'".to_string()),
            Line::Literal("body".to_string()),
            Line::Code(String::new()),
            Line::Literal("END_OF_FILE".to_string()),
        ];
        assert_eq!(
            indent(lines, INDENT),
            vec![
                Line::Code("   cat >> f <<'END_OF_FILE'".to_string()),
                Line::Literal("body".to_string()),
                Line::Literal("END_OF_FILE".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_expanded() {
        assert_eq!(split_expanded("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_expanded("a\r\nb"), vec!["a", "b"]);
        assert_eq!(split_expanded(""), vec![""]);
        assert_eq!(split_expanded("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let tree = new_statement_list([
            comment("setup"),
            export("APP_HOME", "{home}{fs}app").unwrap(),
            interpret("echo ready{lf}"),
        ]);
        for family in [OsFamily::Unix, OsFamily::Windows] {
            let first = tree.render(family).unwrap();
            let second = tree.render(family).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_list_render_is_concatenation_of_children() {
        let a = interpret("echo a{lf}");
        let b = append_file("{tmp}{fs}out.txt", ["one", "two"]).unwrap();
        let list = new_statement_list([a.clone(), b.clone()]);
        for family in [OsFamily::Unix, OsFamily::Windows] {
            let expected = format!("{}{}", a.render(family).unwrap(), b.render(family).unwrap());
            assert_eq!(list.render(family).unwrap(), expected);
        }
    }

    #[test]
    fn test_unix_output_has_no_windows_syntax() {
        let tree = new_statement_list([
            export("TARGET", "{tmp}{fs}{uid}").unwrap(),
            append_file("{home}{fs}notes.txt", ["first", "second"]).unwrap(),
            comment("done"),
        ]);
        let text = tree.render(OsFamily::Unix).unwrap();
        assert!(!text.contains("\r\n"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn test_windows_output_has_no_unix_syntax() {
        let tree = new_statement_list([
            export("TARGET", "{tmp}{fs}{uid}").unwrap(),
            append_file("{home}{fs}notes.txt", ["first", "second"]).unwrap(),
            comment("done"),
        ]);
        let text = tree.render(OsFamily::Windows).unwrap();
        assert!(!text.contains(HEREDOC_DELIMITER));
        assert!(!text.contains('$'));
        assert!(text.split("\r\n").all(|line| !line.contains('\n')));
    }

    #[test]
    fn test_two_switches_rejected_for_windows_only() {
        let first = switch_arg(1, [("a", interpret("echo a{lf}"))]).unwrap();
        let second = switch_arg(2, [("b", interpret("echo b{lf}"))]).unwrap();
        let tree = new_statement_list([first, second]);

        assert!(tree.render(OsFamily::Unix).is_ok());
        let err = tree.render(OsFamily::Windows).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Unsupported {
                kind: "switch_arg",
                family: OsFamily::Windows,
                ..
            }
        ));
    }
}
