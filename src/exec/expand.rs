// src/exec/expand.rs

//! Executable path expansion: environment variables, `~`, and the
//! ampersand escape needed on Windows.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:([A-Za-z_][A-Za-z0-9_]*)|\{([^}]*)\})").expect("valid env var regex")
});

/// Replace `$NAME` and `${NAME}` with the variable's value. References to
/// unset variables are left as written.
pub fn expand_vars(input: &str) -> Cow<'_, str> {
    expand_vars_with(input, |name| std::env::var(name).ok())
}

/// [`expand_vars`] with a custom lookup.
pub fn expand_vars_with<F>(input: &str, lookup: F) -> Cow<'_, str>
where
    F: Fn(&str) -> Option<String>,
{
    ENV_VAR.replace_all(input, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    })
}

/// Expand a leading `~` or `~/` to the user's home directory.
pub fn expand_home(path: &str) -> Cow<'_, str> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return Cow::Borrowed(path),
    };
    match dirs::home_dir() {
        Some(home) => Cow::Owned(format!("{}{}", home.to_string_lossy(), rest)),
        None => Cow::Borrowed(path),
    }
}

/// Full executable expansion: variables first, then the home marker.
pub fn expand_executable(path: &str) -> String {
    let vars = expand_vars(path);
    expand_home(&vars).into_owned()
}

/// `&` escaped for `cmd.exe`.
pub fn escape_ampersand(s: &str) -> String {
    s.replace('&', "^^^&")
}

/// Whether this platform needs [`escape_ampersand`] before launching.
pub const fn needs_ampersand_escape() -> bool {
    cfg!(windows)
}
