//! Dialect-neutral placeholders (`{tmp}`, `{fs}`, ...) and their substitution.

use crate::os_family::OsFamily;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Placeholder syntax: a lowercase name in braces
#[allow(clippy::expect_used)]
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z]+)\}").expect("token regex pattern is valid"));

/// A placeholder that expands to a different literal per [`OsFamily`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellToken {
    /// File separator
    Fs,
    /// Search-path separator
    Ps,
    /// Line terminator
    Lf,
    Tmp,
    Uid,
    Home,
    Root,
    /// Opens a variable reference
    VarL,
    /// Closes a variable reference
    VarR,
    Rem,
    Return,
    Exit,
    Args,
    Sh,
    Source,
    Export,
}

impl ShellToken {
    /// Look up a token by the name used between the braces.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let token = match name {
            "fs" => ShellToken::Fs,
            "ps" => ShellToken::Ps,
            "lf" => ShellToken::Lf,
            "tmp" => ShellToken::Tmp,
            "uid" => ShellToken::Uid,
            "home" => ShellToken::Home,
            "root" => ShellToken::Root,
            "varl" => ShellToken::VarL,
            "varr" => ShellToken::VarR,
            "rem" => ShellToken::Rem,
            "return" => ShellToken::Return,
            "exit" => ShellToken::Exit,
            "args" => ShellToken::Args,
            "sh" => ShellToken::Sh,
            "source" => ShellToken::Source,
            "export" => ShellToken::Export,
            _ => return None,
        };
        Some(token)
    }

    /// The literal this token stands for in `family`.
    #[must_use]
    pub fn to(self, family: OsFamily) -> &'static str {
        match (self, family) {
            (ShellToken::Fs, _) => family.file_separator(),
            (ShellToken::Ps, _) => family.path_separator(),
            (ShellToken::Lf, _) => family.line_terminator(),
            (ShellToken::Tmp, _) => family.temp_dir(),
            (ShellToken::Uid, _) => family.current_user(),
            (ShellToken::Home, _) => family.home_dir(),
            (ShellToken::Root, _) => family.root_dir(),
            (ShellToken::Rem, _) => family.comment_marker(),
            (ShellToken::VarL, OsFamily::Unix) => "$",
            (ShellToken::VarL | ShellToken::VarR, OsFamily::Windows) => "%",
            (ShellToken::VarR, OsFamily::Unix) => "",
            (ShellToken::Return, OsFamily::Unix) => "return",
            (ShellToken::Exit, OsFamily::Unix) => "exit",
            (ShellToken::Return | ShellToken::Exit, OsFamily::Windows) => "exit /b",
            (ShellToken::Args, OsFamily::Unix) => "$@",
            (ShellToken::Args, OsFamily::Windows) => "%*",
            (ShellToken::Sh, OsFamily::Unix) => "bash",
            (ShellToken::Sh, OsFamily::Windows) => "cmd",
            (ShellToken::Source, OsFamily::Unix) => ".",
            (ShellToken::Source, OsFamily::Windows) => "@call",
            (ShellToken::Export, OsFamily::Unix) => "export",
            (ShellToken::Export, OsFamily::Windows) => "set",
        }
    }
}

/// Replace every recognised `{token}` in `text` with its literal for `family`.
///
/// Unknown names are left as written. The pass runs once: text produced by a
/// replacement is never scanned again.
#[must_use]
pub fn replace_tokens(text: &str, family: OsFamily) -> String {
    TOKEN_REGEX
        .replace_all(text, |caps: &Captures| match ShellToken::from_name(&caps[1]) {
            Some(token) => token.to(family).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_path_tokens_unix() {
        assert_eq!(
            replace_tokens("{tmp}{fs}{uid}{fs}scripttest{fs}temp.txt", OsFamily::Unix),
            "/tmp/$USER/scripttest/temp.txt"
        );
    }

    #[test]
    fn test_replace_path_tokens_windows() {
        assert_eq!(
            replace_tokens("{tmp}{fs}{uid}{fs}scripttest{fs}temp.txt", OsFamily::Windows),
            "%TEMP%\\%USERNAME%\\scripttest\\temp.txt"
        );
    }

    #[test]
    fn test_line_feed_token() {
        assert_eq!(replace_tokens("echo hi{lf}", OsFamily::Unix), "echo hi\n");
        assert_eq!(replace_tokens("echo hi{lf}", OsFamily::Windows), "echo hi\r\n");
    }

    #[test]
    fn test_variable_tokens() {
        assert_eq!(replace_tokens("{varl}JAVA_HOME{varr}", OsFamily::Unix), "$JAVA_HOME");
        assert_eq!(replace_tokens("{varl}JAVA_HOME{varr}", OsFamily::Windows), "%JAVA_HOME%");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(replace_tokens("awk '{print}' {nope}", OsFamily::Unix), "awk '{print}' {nope}");
        assert_eq!(replace_tokens("${HOME} {Fs} {}", OsFamily::Unix), "${HOME} {Fs} {}");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        // "{varl}" expands to "$" and must not combine with the following text
        // into a second token
        assert_eq!(replace_tokens("{{varl}fs}", OsFamily::Unix), "{$fs}");
    }

    #[test]
    fn test_every_token_has_a_name() {
        for name in [
            "fs", "ps", "lf", "tmp", "uid", "home", "root", "varl", "varr", "rem", "return",
            "exit", "args", "sh", "source", "export",
        ] {
            assert!(ShellToken::from_name(name).is_some(), "{name} should be a token");
        }
    }
}
