// src/host/bus.rs

//! Event bus interface and an in-process implementation.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

use crate::config::CommandRecord;
use crate::types::NotificationName;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Callback invoked for each delivered notification.
pub type Handler = Arc<dyn Fn(Notification) -> BoxFuture<'static, ()> + Send + Sync>;

/// Token returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

/// Notifications carried by the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    ItemAdded { item_id: String, extra: Vec<String> },
    ItemFinished { item_id: String, extra: Vec<String> },
    ItemRemoved { item_id: String, extra: Vec<String> },
    ItemCopied { item_id: String, extra: Vec<String> },
    PreItemRemoved { item_id: String },
    CommandAdded { record: CommandRecord },
    CommandRemoved { command_id: String },
}

impl Notification {
    pub fn name(&self) -> NotificationName {
        match self {
            Notification::ItemAdded { .. } => NotificationName::ItemAdded,
            Notification::ItemFinished { .. } => NotificationName::ItemFinished,
            Notification::ItemRemoved { .. } => NotificationName::ItemRemoved,
            Notification::ItemCopied { .. } => NotificationName::ItemCopied,
            Notification::PreItemRemoved { .. } => NotificationName::PreItemRemoved,
            Notification::CommandAdded { .. } => NotificationName::CommandAdded,
            Notification::CommandRemoved { .. } => NotificationName::CommandRemoved,
        }
    }

    /// Item the notification is about, if it concerns an item.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Notification::ItemAdded { item_id, .. }
            | Notification::ItemFinished { item_id, .. }
            | Notification::ItemRemoved { item_id, .. }
            | Notification::ItemCopied { item_id, .. }
            | Notification::PreItemRemoved { item_id } => Some(item_id),
            Notification::CommandAdded { .. } | Notification::CommandRemoved { .. } => None,
        }
    }

    /// Extra positional arguments delivered alongside the item id.
    pub fn extra(&self) -> &[String] {
        match self {
            Notification::ItemAdded { extra, .. }
            | Notification::ItemFinished { extra, .. }
            | Notification::ItemRemoved { extra, .. }
            | Notification::ItemCopied { extra, .. } => extra,
            _ => &[],
        }
    }
}

/// Host event bus.
pub trait EventBus: Send + Sync {
    fn subscribe(&self, name: NotificationName, handler: Handler) -> HandlerId;

    /// Returns `false` if the handler was not (or no longer) subscribed.
    fn unsubscribe(&self, name: NotificationName, id: HandlerId) -> bool;

    fn emit(&self, notification: Notification) -> BoxFuture<'_, ()>;
}

/// In-process bus: handlers run in subscription order and each is awaited
/// before the next one starts.
#[derive(Default)]
pub struct LocalEventBus {
    next_id: AtomicU64,
    handlers: Mutex<BTreeMap<NotificationName, Vec<(HandlerId, Handler)>>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions for `name`.
    pub fn subscriber_count(&self, name: NotificationName) -> usize {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name)
            .map_or(0, Vec::len)
    }
}

impl EventBus for LocalEventBus {
    fn subscribe(&self, name: NotificationName, handler: Handler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name)
            .or_default()
            .push((id, handler));
        trace!(notification = %name, ?id, "handler subscribed");
        id
    }

    fn unsubscribe(&self, name: NotificationName, id: HandlerId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(list) = handlers.get_mut(&name) else {
            return false;
        };
        let before = list.len();
        list.retain(|(hid, _)| *hid != id);
        before != list.len()
    }

    fn emit(&self, notification: Notification) -> BoxFuture<'_, ()> {
        // Snapshot the handler list so handlers may (un)subscribe while running.
        let handlers: Vec<Handler> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&notification.name())
            .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        Box::pin(async move {
            debug!(
                notification = %notification.name(),
                handlers = handlers.len(),
                "delivering notification"
            );
            for handler in handlers {
                handler(notification.clone()).await;
            }
        })
    }
}
