// src/exec/substitute.rs

//! Placeholder substitution.
//!
//! | token  | replaced by                |
//! |--------|----------------------------|
//! | `<id>` | item id                    |
//! | `<na>` | item name                  |
//! | `<dl>` | item download location     |
//! | `<lb>` | item label                 |
//!
//! Matching is literal and case-sensitive and there is no escaping. Tokens
//! are replaced one after the other in the order above, so a value that
//! itself contains a later token (e.g. a name containing `<dl>`) has that
//! token replaced as well.

pub const ID: &str = "<id>";
pub const NAME: &str = "<na>";
pub const DOWNLOAD_LOCATION: &str = "<dl>";
pub const LABEL: &str = "<lb>";

/// Values substituted into a command line for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionContext {
    pub id: String,
    pub name: String,
    pub download_location: String,
    pub label: String,
}

impl SubstitutionContext {
    pub fn substitute(&self, command: &str) -> String {
        substitute(command, self)
    }
}

pub fn substitute(command: &str, ctx: &SubstitutionContext) -> String {
    command
        .replace(ID, &ctx.id)
        .replace(NAME, &ctx.name)
        .replace(DOWNLOAD_LOCATION, &ctx.download_location)
        .replace(LABEL, &ctx.label)
}
