// src/host/mod.rs

//! Interfaces to the host application.
//!
//! The engine never talks to the host directly; it goes through:
//! - [`bus`]: named notifications (`ItemFinished`, `PreItemRemoved`, ...)
//!   with subscribe / unsubscribe / emit.
//! - [`registry`]: per-item status lookups (`name`, `save_path`, `label`, ...).
//!
//! Both come with small in-process implementations (`LocalEventBus`,
//! `MemoryItemRegistry`) that the binary and the tests use.

pub mod bus;
pub mod registry;

pub use bus::{BoxFuture, EventBus, Handler, HandlerId, LocalEventBus, Notification};
pub use registry::{fields, ItemInfo, ItemRegistry, ItemStatus, MemoryItemRegistry, StatusValue};
