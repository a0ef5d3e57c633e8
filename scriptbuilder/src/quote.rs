//! Escaping and quoting for literal text placed into generated scripts.
//!
//! All helpers here work on text *before* token substitution, so a token
//! such as `{uid}` still expands to a live variable reference afterwards.

/// Escape a string value for use inside double quotes in a POSIX shell.
///
/// `!` is left alone: history expansion is off in a non-interactive shell, and
/// there a backslash before `!` survives into the value.
pub fn escape_shell_value(value: &str) -> String {
    value
        .replace('\\', "\\\\") // Backslash must be first
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`")
}

/// Escape batch metacharacters with a caret so they are taken literally
pub fn escape_batch_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '^' | '&' | '|' | '<' | '>' | '(' | ')') {
            escaped.push('^');
        }
        escaped.push(ch);
    }
    escaped
}

/// Escape literal text for an `echo` or `set` line in a batch file, including
/// `%` which would otherwise start a variable expansion
pub fn escape_batch_echo(value: &str) -> String {
    escape_batch_value(value).replace('%', "%%")
}

/// Quote a command argument for a POSIX shell.
///
/// Arguments made only of characters that the shell never reinterprets are
/// left bare. Anything else is double-quoted, so `$VAR` references produced by
/// tokens still expand while literal metacharacters are escaped.
pub fn quote_shell_arg(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_plain_shell_char) {
        arg.to_string()
    } else {
        // `$` in the raw argument is escaped; token output added later is not
        format!("\"{}\"", escape_shell_value(arg))
    }
}

/// Quote a command argument for a batch file
pub fn quote_batch_arg(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '&' | '|' | '<' | '>' | '^' | '(' | ')' | ',' | ';' | '='));
    if needs_quotes {
        format!("\"{}\"", arg.replace('"', "\"\""))
    } else {
        arg.to_string()
    }
}

/// Render a literal as a `case` pattern, single-quoting it unless it is made
/// only of characters with no meaning in a pattern
pub fn case_pattern(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// Whether `value` can be appended to a batch label verbatim
pub fn is_label_safe(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Turn `value` into a batch label fragment by replacing anything other than
/// ASCII alphanumerics and underscores with an underscore
pub fn sanitise_label(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Whether `name` is usable as a variable or function name in both dialects
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_plain_shell_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '_' | '.' | '/' | ':' | '=' | '@' | '%' | '+' | ',' | '-' | '{' | '}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_shell_value() {
        assert_eq!(escape_shell_value(r#"say "hi" $USER"#), r#"say \"hi\" \$USER"#);
        assert_eq!(escape_shell_value(r"a\b"), r"a\\b");
        assert_eq!(escape_shell_value("wow!"), "wow!");
    }

    #[test]
    fn test_escape_batch_value() {
        assert_eq!(escape_batch_value("a & b | c"), "a ^& b ^| c");
        assert_eq!(escape_batch_value("<x>"), "^<x^>");
        assert_eq!(escape_batch_value("(^)"), "^(^^^)");
    }

    #[test]
    fn test_escape_batch_echo_doubles_percent() {
        assert_eq!(escape_batch_echo("100% > 50%"), "100%% ^> 50%%");
    }

    #[test]
    fn test_quote_shell_arg() {
        assert_eq!(quote_shell_arg("--force"), "--force");
        assert_eq!(quote_shell_arg("{tmp}{fs}file"), "{tmp}{fs}file");
        assert_eq!(quote_shell_arg("hello world"), "\"hello world\"");
        assert_eq!(quote_shell_arg(""), "\"\"");
        assert_eq!(quote_shell_arg("$HOME"), "\"\\$HOME\"");
    }

    #[test]
    fn test_quote_batch_arg() {
        assert_eq!(quote_batch_arg("/q"), "/q");
        assert_eq!(quote_batch_arg("hello world"), "\"hello world\"");
        assert_eq!(quote_batch_arg(r#"say "x""#), r#""say ""x""""#);
        assert_eq!(quote_batch_arg(""), "\"\"");
    }

    #[test]
    fn test_case_pattern() {
        assert_eq!(case_pattern("0"), "0");
        assert_eq!(case_pattern("start-all"), "start-all");
        assert_eq!(case_pattern("a*"), "'a*'");
        assert_eq!(case_pattern("it's"), "'it'\\''s'");
        assert_eq!(case_pattern(""), "''");
    }

    #[test]
    fn test_sanitise_label() {
        assert_eq!(sanitise_label("start"), "start");
        assert_eq!(sanitise_label("start-all"), "start_all");
        assert_eq!(sanitise_label("a b.c"), "a_b_c");
        assert!(is_label_safe("start_all"));
        assert!(!is_label_safe("start-all"));
        assert!(!is_label_safe(""));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("JAVA_HOME"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("has-dash"));
        assert!(!is_identifier(""));
    }
}
