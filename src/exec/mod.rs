// src/exec/mod.rs

//! Command execution layer.
//!
//! Turns one matched command record plus an item context into a side effect.
//!
//! - [`substitute`] replaces the `<id>`, `<na>`, `<dl>`, `<lb>` placeholders.
//! - [`tokenize`] splits a command line into executable and arguments.
//! - [`expand`] resolves `$VAR`, `${VAR}` and `~` in the executable path.
//! - [`pipeline`] runs the steps in order and reports a [`CommandOutcome`].
//! - [`backend`] provides the `ExecutorBackend` trait and the production
//!   `RealExecutorBackend`; tests replace it with a recording fake.
//! - [`task_runner`] launches script processes and logs their exit.
//! - [`fetch`] performs URL calls.

pub mod backend;
pub mod expand;
pub mod fetch;
pub mod pipeline;
pub mod substitute;
pub mod task_runner;
pub mod tokenize;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use pipeline::{prepare_script, CommandOutcome, Pipeline, PreparedScript};
pub use substitute::{substitute, SubstitutionContext};
pub use task_runner::ScriptInvocation;
pub use tokenize::{split_arguments, tokenize, CommandLine};
