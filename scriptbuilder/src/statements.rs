//! Shorthand constructors returning [`Statement`] directly.
//!
//! ```
//! use scriptbuilder::os_family::OsFamily;
//! use scriptbuilder::statements::{interpret, switch_arg};
//!
//! let dispatch = switch_arg(1, [
//!     ("start", interpret("echo starting{lf}")),
//!     ("stop", interpret("echo stopping{lf}")),
//! ])?;
//! assert!(dispatch.render(OsFamily::Unix)?.starts_with("case $1 in\n"));
//! # Ok::<(), scriptbuilder::error::ScriptError>(())
//! ```

use crate::error::Result;
use crate::statement::{
    AppendFile, Call, Comment, Exec, Export, Interpret, Return, Statement, StatementList,
    SwitchArg,
};

pub fn exec(command: impl Into<String>) -> Statement {
    Statement::Exec(Exec::new(command))
}

/// Replace the shell with `command`. Only renders for UNIX.
pub fn exec_replacing_shell(command: impl Into<String>) -> Statement {
    Statement::Exec(Exec::replacing_shell(command))
}

pub fn interpret(text: impl Into<String>) -> Statement {
    Statement::Interpret(Interpret::new(text))
}

/// # Errors
///
/// See [`AppendFile::new`].
pub fn append_file<I, S>(path: impl Into<String>, lines: I) -> Result<Statement>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AppendFile::new(path, lines).map(Statement::AppendFile)
}

pub fn new_statement_list(statements: impl IntoIterator<Item = Statement>) -> Statement {
    Statement::List(statements.into_iter().collect())
}

/// # Errors
///
/// See [`SwitchArg::new`].
pub fn switch_arg<I, S>(index: usize, cases: I) -> Result<Statement>
where
    I: IntoIterator<Item = (S, Statement)>,
    S: Into<String>,
{
    SwitchArg::new(index, cases).map(Statement::SwitchArg)
}

/// # Errors
///
/// See [`Export::new`].
pub fn export(name: impl Into<String>, value: impl Into<String>) -> Result<Statement> {
    Export::new(name, value).map(Statement::Export)
}

/// # Errors
///
/// See [`Call::new`].
pub fn call<I, S>(function: impl Into<String>, args: I) -> Result<Statement>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Call::new(function, args).map(Statement::Call)
}

pub fn comment(text: impl Into<String>) -> Statement {
    Statement::Comment(Comment::new(text))
}

pub fn return_code(code: i32) -> Statement {
    Statement::Return(Return::code(code))
}

/// # Errors
///
/// See [`Return::expression`].
pub fn return_expression(expression: impl Into<String>) -> Result<Statement> {
    Return::expression(expression).map(Statement::Return)
}

impl From<StatementList> for Statement {
    fn from(list: StatementList) -> Self {
        Statement::List(list)
    }
}

impl From<SwitchArg> for Statement {
    fn from(switch: SwitchArg) -> Self {
        Statement::SwitchArg(switch)
    }
}

impl From<AppendFile> for Statement {
    fn from(append: AppendFile) -> Self {
        Statement::AppendFile(append)
    }
}
