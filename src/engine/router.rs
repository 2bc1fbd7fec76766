// src/engine/router.rs

//! Event bus subscriptions: one handler per distinct command event, plus the
//! pre-removal snapshot handler whenever `removed` is in use.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info};

use crate::host::{BoxFuture, EventBus, Handler, HandlerId, Notification};
use crate::types::{EventKind, NotificationName};

use super::dispatch::Dispatcher;

#[derive(Debug, Default)]
struct Registrations {
    events: BTreeMap<EventKind, HandlerId>,
    pre_removed: Option<HandlerId>,
}

pub struct EventRouter {
    bus: Arc<dyn EventBus>,
    dispatcher: Dispatcher,
    registered: Mutex<Registrations>,
}

impl EventRouter {
    pub fn new(bus: Arc<dyn EventBus>, dispatcher: Dispatcher) -> Self {
        Self {
            bus,
            dispatcher,
            registered: Mutex::new(Registrations::default()),
        }
    }

    /// Subscribe a handler for each event not registered yet.
    pub fn register<I>(&self, events: I)
    where
        I: IntoIterator<Item = EventKind>,
    {
        for event in events {
            self.ensure_registered(event);
        }
    }

    /// Subscribe the handler for `event` unless it already is. Returns
    /// `true` when a new subscription was made.
    pub fn ensure_registered(&self, event: EventKind) -> bool {
        let mut reg = self.lock();
        if reg.events.contains_key(&event) {
            return false;
        }

        let name = event.notification();
        let id = self
            .bus
            .subscribe(name, event_handler(self.dispatcher.clone(), event));
        reg.events.insert(event, id);
        info!(%event, notification = %name, "registered event handler");

        if event == EventKind::Removed && reg.pre_removed.is_none() {
            let id = self.bus.subscribe(
                NotificationName::PreItemRemoved,
                pre_removed_handler(self.dispatcher.clone()),
            );
            reg.pre_removed = Some(id);
            debug!("registered pre-removal handler");
        }
        true
    }

    /// Drop every subscription made by this router. Safe to call more than
    /// once and against a bus that already forgot the handlers.
    pub fn unregister(&self) {
        let mut reg = self.lock();
        for (event, id) in std::mem::take(&mut reg.events) {
            if !self.bus.unsubscribe(event.notification(), id) {
                debug!(%event, "handler was already gone from the bus");
            }
        }
        if let Some(id) = reg.pre_removed.take() {
            self.bus.unsubscribe(NotificationName::PreItemRemoved, id);
        }
        info!("event handlers unregistered");
    }

    /// Events that currently have a handler.
    pub fn registered_events(&self) -> Vec<EventKind> {
        self.lock().events.keys().copied().collect()
    }

    pub fn has_pre_removed_handler(&self) -> bool {
        self.lock().pre_removed.is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registrations> {
        self.registered.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handler bound to one event value.
fn event_handler(dispatcher: Dispatcher, event: EventKind) -> Handler {
    Arc::new(move |notification: Notification| -> BoxFuture<'static, ()> {
        let dispatcher = dispatcher.clone();
        Box::pin(async move {
            let Some(item_id) = notification.item_id() else {
                return;
            };
            if let Err(err) = dispatcher
                .execute_commands(item_id, event, notification.extra())
                .await
            {
                error!(item_id, %event, error = %err, "dispatch aborted");
            }
        })
    })
}

fn pre_removed_handler(dispatcher: Dispatcher) -> Handler {
    Arc::new(move |notification: Notification| -> BoxFuture<'static, ()> {
        let dispatcher = dispatcher.clone();
        Box::pin(async move {
            let Some(item_id) = notification.item_id() else {
                return;
            };
            if let Err(err) = dispatcher.on_pre_removed(item_id).await {
                error!(item_id, error = %err, "failed to snapshot item before removal");
            }
        })
    })
}
