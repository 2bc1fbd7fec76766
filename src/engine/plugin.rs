// src/engine/plugin.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{CommandRecord, Persistence};
use crate::errors::Result;
use crate::exec::Pipeline;
use crate::host::{EventBus, ItemRegistry, Notification};
use crate::types::{CommandType, EventKind};

use super::dispatch::Dispatcher;
use super::router::EventRouter;
use super::store::{CommandStore, Mutation, NewCommand};

/// Host services the plugin consumes.
#[derive(Clone)]
pub struct Host {
    pub bus: Arc<dyn EventBus>,
    pub registry: Arc<dyn ItemRegistry>,
}

/// Enabled plugin instance: owns the command store, the pre-removal cache
/// (inside the dispatcher) and the bus subscriptions.
///
/// The management methods (`add_command`, `get_commands`, `remove_command`,
/// `save_command`) are what an RPC layer would export.
pub struct ExecutePlugin {
    store: Arc<RwLock<CommandStore>>,
    bus: Arc<dyn EventBus>,
    dispatcher: Dispatcher,
    router: EventRouter,
}

impl ExecutePlugin {
    /// Load the store and subscribe handlers for every event it uses.
    pub async fn enable(
        persistence: Arc<dyn Persistence>,
        host: Host,
        pipeline: Pipeline,
    ) -> Result<Self> {
        let store = Arc::new(RwLock::new(CommandStore::load(persistence)?));
        let dispatcher = Dispatcher::new(Arc::clone(&store), host.registry, Arc::new(pipeline));
        let router = EventRouter::new(Arc::clone(&host.bus), dispatcher.clone());

        let events = store.read().await.events();
        router.register(events);

        debug!("execute plugin enabled");
        Ok(Self {
            store,
            bus: host.bus,
            dispatcher,
            router,
        })
    }

    /// Save the store and drop every bus subscription.
    ///
    /// Handlers are removed even if the save fails; the save error is
    /// returned afterwards.
    pub async fn disable(&self) -> Result<()> {
        let saved = self.store.read().await.save();
        self.router.unregister();
        debug!("execute plugin disabled");
        saved
    }

    pub async fn add_command(
        &self,
        event: EventKind,
        command: impl Into<String>,
        command_type: CommandType,
        label: impl Into<String>,
        delay: impl Into<String>,
    ) -> Result<String> {
        let record = self.store.write().await.add(NewCommand {
            event,
            command: command.into(),
            command_type,
            label: label.into(),
            delay: delay.into(),
        })?;

        self.router.ensure_registered(record.event);
        let id = record.id.clone();
        self.bus.emit(Notification::CommandAdded { record }).await;
        Ok(id)
    }

    pub async fn get_commands(&self) -> Vec<CommandRecord> {
        self.store.read().await.records().to_vec()
    }

    /// Remove a command. An unknown id is `Ok(Mutation::NotFound)` and emits
    /// nothing.
    pub async fn remove_command(&self, command_id: &str) -> Result<Mutation> {
        let outcome = self.store.write().await.remove(command_id)?;
        if outcome == Mutation::Applied {
            self.bus
                .emit(Notification::CommandRemoved {
                    command_id: command_id.to_string(),
                })
                .await;
        }
        Ok(outcome)
    }

    /// Change event and command text of an existing command.
    pub async fn save_command(
        &self,
        command_id: &str,
        event: EventKind,
        command: impl Into<String>,
    ) -> Result<Mutation> {
        let outcome = self
            .store
            .write()
            .await
            .update(command_id, event, command.into())?;
        if outcome == Mutation::Applied {
            self.router.ensure_registered(event);
        }
        Ok(outcome)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }
}

impl Drop for ExecutePlugin {
    fn drop(&mut self) {
        if !self.router.registered_events().is_empty() {
            info!("execute plugin dropped while enabled; unregistering handlers");
            self.router.unregister();
        }
    }
}
