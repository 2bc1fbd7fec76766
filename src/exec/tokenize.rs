// src/exec/tokenize.rs

//! Splitting a substituted command line into executable and arguments.

/// Executable token plus the raw argument string that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable as written, including surrounding quotes when quoted.
    pub executable: String,
    pub arguments: String,
}

impl CommandLine {
    /// Split a command line.
    ///
    /// - With two or more `"` characters, the executable runs up to and
    ///   including the second quote (`"/opt/my tools/run" -v` gives
    ///   `"/opt/my tools/run"`); the rest, minus one leading space, is the
    ///   argument string.
    /// - Otherwise the line is split at the first space; with no space the
    ///   whole line is the executable.
    pub fn parse(line: &str) -> Self {
        if line.matches('"').count() > 1 {
            let mut parts = line.splitn(3, '"');
            let before = parts.next().unwrap_or_default();
            let quoted = parts.next().unwrap_or_default();
            let rest = parts.next().unwrap_or_default();
            return Self {
                executable: format!("{before}\"{quoted}\""),
                arguments: rest.strip_prefix(' ').unwrap_or(rest).to_string(),
            };
        }

        match line.split_once(' ') {
            Some((exe, args)) => Self {
                executable: exe.to_string(),
                arguments: args.to_string(),
            },
            None => Self {
                executable: line.to_string(),
                arguments: String::new(),
            },
        }
    }

    /// Executable with one pair of surrounding quotes removed.
    pub fn unquoted_executable(&self) -> &str {
        unquote(&self.executable)
    }

    pub fn argv(&self) -> Vec<String> {
        split_arguments(&self.arguments)
    }
}

pub fn tokenize(line: &str) -> CommandLine {
    CommandLine::parse(line)
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Split an argument string into argv.
///
/// Whitespace separates arguments; a double-quoted run is kept together with
/// the quotes dropped (`a "b c"d` gives `a`, `b cd`). An unterminated quote
/// runs to the end of the string.
pub fn split_arguments(arguments: &str) -> Vec<String> {
    let mut argv = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in arguments.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    argv.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        argv.push(current);
    }
    argv
}
