// src/engine/mod.rs

//! Event-to-command engine.
//!
//! This module ties together:
//! - the command store (ordered records, persisted on every change)
//! - the event router (bus subscriptions, one per distinct event)
//! - the pre-removal cache (item metadata captured before removal)
//! - the dispatcher (context resolution + label/event matching)
//!
//! [`ExecutePlugin`] owns all of it; commands themselves are carried out by
//! [`crate::exec::Pipeline`].

pub mod cache;
pub mod dispatch;
pub mod plugin;
pub mod router;
pub mod store;

pub use cache::{PreRemovalCache, Snapshot};
pub use dispatch::{DispatchReport, Dispatcher};
pub use plugin::{ExecutePlugin, Host};
pub use router::EventRouter;
pub use store::{new_command_id, CommandStore, Mutation, NewCommand};
