// src/engine/dispatch.rs

//! Resolving the item context for a firing event and running every
//! matching command through the pipeline.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{CommandOutcome, Pipeline, SubstitutionContext};
use crate::host::{fields, ItemRegistry};
use crate::types::EventKind;

use super::cache::PreRemovalCache;
use super::store::CommandStore;

/// What one `execute_commands` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub item_id: String,
    pub event: EventKind,
    /// `true` when the event is never dispatched (`added`).
    pub suppressed: bool,
    /// Outcome per matched command id, in store order.
    pub outcomes: Vec<(String, CommandOutcome)>,
}

impl DispatchReport {
    fn new(item_id: &str, event: EventKind) -> Self {
        Self {
            item_id: item_id.to_string(),
            event,
            suppressed: false,
            outcomes: Vec::new(),
        }
    }

    pub fn matched(&self) -> usize {
        self.outcomes.len()
    }

    pub fn command_ids(&self) -> Vec<&str> {
        self.outcomes.iter().map(|(id, _)| id.as_str()).collect()
    }
}

/// Cheap to clone; every clone shares the same store, cache and pipeline.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<RwLock<CommandStore>>,
    cache: Arc<Mutex<PreRemovalCache>>,
    registry: Arc<dyn ItemRegistry>,
    pipeline: Arc<Pipeline>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<RwLock<CommandStore>>,
        registry: Arc<dyn ItemRegistry>,
        pipeline: Arc<Pipeline>,
    ) -> Self {
        Self {
            store,
            cache: Arc::new(Mutex::new(PreRemovalCache::new())),
            registry,
            pipeline,
        }
    }

    /// Snapshot an item that is about to be removed.
    pub async fn on_pre_removed(&self, item_id: &str) -> Result<()> {
        self.cache
            .lock()
            .await
            .on_pre_removed(self.registry.as_ref(), item_id)
    }

    pub async fn has_snapshot(&self, item_id: &str) -> bool {
        self.cache.lock().await.contains(item_id)
    }

    /// Run every command bound to `event` whose label matches the item's.
    ///
    /// - `added` is never dispatched.
    /// - `removed` reads the item from its pre-removal snapshot.
    /// - Other events read the item from the registry.
    ///
    /// Lookup failures abort the whole dispatch. Failures of individual
    /// commands only show up in their outcome.
    pub async fn execute_commands(
        &self,
        item_id: &str,
        event: EventKind,
        extra: &[String],
    ) -> Result<DispatchReport> {
        debug!(item_id, %event, ?extra, "execute_commands");
        let mut report = DispatchReport::new(item_id, event);

        if event == EventKind::Added {
            debug!(item_id, "dispatch is not performed for the added event");
            report.suppressed = true;
            return Ok(report);
        }

        let ctx = match event {
            EventKind::Removed => self.cache.lock().await.take(item_id)?.into_context(),
            _ => self.resolve_context(item_id)?,
        };
        debug!(
            item_id,
            name = %ctx.name,
            download_location = %ctx.download_location,
            label = %ctx.label,
            "item context resolved"
        );

        // Clone the matches so the store lock is not held across delays.
        let records = self.store.read().await.matching(event, &ctx.label);
        info!(item_id, %event, matched = records.len(), "running commands");

        for record in records {
            let outcome = self.pipeline.run(&record, &ctx).await;
            report.outcomes.push((record.id, outcome));
        }
        Ok(report)
    }

    fn resolve_context(&self, item_id: &str) -> Result<SubstitutionContext> {
        let status = self.registry.status(
            item_id,
            &[
                fields::NAME,
                fields::SAVE_PATH,
                fields::MOVE_ON_COMPLETED,
                fields::MOVE_ON_COMPLETED_PATH,
                fields::LABEL,
            ],
        )?;

        let download_location = if status.flag(fields::MOVE_ON_COMPLETED)? {
            status.text(fields::MOVE_ON_COMPLETED_PATH)?
        } else {
            status.text(fields::SAVE_PATH)?
        };

        Ok(SubstitutionContext {
            id: item_id.to_string(),
            name: status.text(fields::NAME)?.to_string(),
            download_location: download_location.to_string(),
            label: status.text(fields::LABEL)?.to_string(),
        })
    }
}
