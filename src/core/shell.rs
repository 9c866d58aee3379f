//! Shell-style quoting for displaying commands.
//!
//! Tool invocations never go through a shell; these helpers only render a
//! copy-pasteable form of the command for logs and error details.

/// Quote a single argument so a POSIX shell would read it back unchanged.
/// - Empty strings become `''`
/// - Strings with shell metacharacters are wrapped in single quotes
/// - Embedded single quotes are escaped as `'\''`
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    const SHELL_META: &[char] = &[
        ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}',
        '<', '>', '|', '&', ';', '#', '~', '^',
    ];

    if !arg.contains(SHELL_META) {
        return arg.to_string();
    }

    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// Render `program` followed by its quoted arguments.
pub fn render_command<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    std::iter::once(quote_arg(program))
        .chain(args.iter().map(|a| quote_arg(a.as_ref())))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_arg_simple() {
        assert_eq!(quote_arg("collateralType"), "collateralType");
        assert_eq!(quote_arg("--accept-all"), "--accept-all");
    }

    #[test]
    fn quote_arg_regex() {
        assert_eq!(quote_arg(r"\bilk\b"), r"'\bilk\b'");
        assert_eq!(quote_arg("^legacy.*$"), "'^legacy.*$'");
    }

    #[test]
    fn quote_arg_with_single_quote() {
        assert_eq!(quote_arg("it's"), "'it'\\''s'");
    }

    #[test]
    fn quote_arg_empty() {
        assert_eq!(quote_arg(""), "''");
    }

    #[test]
    fn render_command_joins_quoted_args() {
        let args = ["-e", "sol", "--accept-all", r"\bilk\b", "collateral type"];
        assert_eq!(
            render_command("fastmod", &args),
            r"fastmod -e sol --accept-all '\bilk\b' 'collateral type'"
        );
    }
}
