//! Append literal lines to a file.
//!
//! UNIX output is a single `cat >>` fed by a quoted here-document, so the
//! payload is written without any expansion. Batch has no here-document, so
//! WINDOWS output is one `echo` redirect per line with the payload escaped.

use super::{Line, split_expanded};
use crate::error::{Result, ScriptError};
use crate::os_family::OsFamily;
use crate::quote::{escape_batch_echo, quote_shell_arg};
use crate::token::replace_tokens;
use serde::Deserialize;

/// Terminator of the UNIX here-document. No payload line may equal it.
pub const HEREDOC_DELIMITER: &str = "END_OF_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAppendFile")]
pub struct AppendFile {
    path: String,
    lines: Vec<String>,
}

#[derive(Deserialize)]
struct RawAppendFile {
    path: String,
    lines: Vec<String>,
}

impl TryFrom<RawAppendFile> for AppendFile {
    type Error = ScriptError;

    fn try_from(raw: RawAppendFile) -> Result<Self> {
        AppendFile::new(raw.path, raw.lines)
    }
}

impl AppendFile {
    /// # Errors
    ///
    /// Returns `Err` if the path is empty or holds a double quote, or a
    /// payload line equals [`HEREDOC_DELIMITER`].
    pub fn new<I, S>(path: impl Into<String>, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(ScriptError::invalid_argument("append_file", "path is empty"));
        }
        if path.contains(['"', '\n', '\r']) {
            return Err(ScriptError::malformed(
                "append_file",
                format!("path {path:?} contains a double quote or line break"),
            ));
        }
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        check_delimiter(lines.iter().map(String::as_str))?;
        Ok(Self { path, lines })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn payload(&self) -> &[String] {
        &self.lines
    }

    pub(super) fn lines(&self, family: OsFamily) -> Result<Vec<Line>> {
        match family {
            OsFamily::Unix => self.unix_lines(),
            OsFamily::Windows => Ok(self.windows_lines()),
        }
    }

    fn unix_lines(&self) -> Result<Vec<Line>> {
        let family = OsFamily::Unix;
        let path = replace_tokens(&quote_shell_arg(&self.path), family);
        let payload: Vec<String> = self
            .lines
            .iter()
            .flat_map(|line| split_expanded(&replace_tokens(line, family)))
            .collect();
        // A token may have produced the delimiter, so check the expanded text too
        check_delimiter(payload.iter().map(String::as_str))?;

        let mut lines = Vec::with_capacity(payload.len() + 2);
        lines.push(Line::Code(format!("cat >> {path} <<'{HEREDOC_DELIMITER}'")));
        lines.extend(payload.into_iter().map(Line::Literal));
        lines.push(Line::Literal(HEREDOC_DELIMITER.to_string()));
        Ok(lines)
    }

    fn windows_lines(&self) -> Vec<Line> {
        let family = OsFamily::Windows;
        let target = format!("\"{}\"", replace_tokens(&self.path, family));
        self.lines
            .iter()
            .flat_map(|line| split_expanded(&replace_tokens(&escape_batch_echo(line), family)))
            .map(|line| {
                // `echo(` prints its argument verbatim, including empty or
                // blank text, `off` and `/?`
                if line.ends_with(|c: char| c.is_ascii_digit()) {
                    // `echo(x 2>>file` would redirect stream 2 instead
                    Line::Code(format!("(echo({line})>>{target}"))
                } else {
                    Line::Code(format!("echo({line}>>{target}"))
                }
            })
            .collect()
    }
}

fn check_delimiter<'a>(mut lines: impl Iterator<Item = &'a str>) -> Result<()> {
    match lines.position(|line| line == HEREDOC_DELIMITER) {
        Some(index) => Err(ScriptError::malformed(
            "append_file",
            format!(
                "line {} equals the here-document delimiter {HEREDOC_DELIMITER}",
                index + 1
            ),
        )),
        None => Ok(()),
    }
}
