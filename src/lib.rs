// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod host;
pub mod logging;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, FireArgs};
use crate::config::{default_config_path, CommandRecord, Persistence, TomlPersistence};
use crate::engine::{ExecutePlugin, Host, Mutation};
use crate::exec::{Pipeline, RealExecutorBackend};
use crate::fs::RealFileSystem;
use crate::host::{EventBus, ItemInfo, LocalEventBus, MemoryItemRegistry, Notification};
use crate::types::EventKind;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the TOML command store
/// - an in-process event bus and item registry
/// - the real executor backend
/// - the plugin, for the duration of one subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    debug!(path = ?config_path, "using command store");
    let persistence: Arc<dyn Persistence> = Arc::new(TomlPersistence::at(config_path));

    let bus = Arc::new(LocalEventBus::new());
    let registry = Arc::new(MemoryItemRegistry::new());
    let backend = Arc::new(RealExecutorBackend::new());
    let pipeline = Pipeline::new(backend.clone(), Arc::new(RealFileSystem));

    let host = Host {
        bus: bus.clone(),
        registry: registry.clone(),
    };
    let plugin = ExecutePlugin::enable(persistence, host, pipeline).await?;

    let outcome = run_command(&plugin, bus.as_ref(), &registry, args.command).await;

    plugin.disable().await?;
    backend.drain().await;
    outcome
}

async fn run_command(
    plugin: &ExecutePlugin,
    bus: &dyn EventBus,
    registry: &MemoryItemRegistry,
    command: Command,
) -> Result<()> {
    match command {
        Command::Add {
            event,
            command,
            command_type,
            label,
            delay,
        } => {
            let id = plugin
                .add_command(event, command, command_type, label, delay)
                .await?;
            println!("{id}");
        }
        Command::List => print_commands(&plugin.get_commands().await),
        Command::Remove { id } => {
            report_mutation(plugin.remove_command(&id).await?, "removed");
        }
        Command::Save { id, event, command } => {
            report_mutation(plugin.save_command(&id, event, command).await?, "saved");
        }
        Command::Fire(fire) => fire_event(bus, registry, fire).await,
    }
    Ok(())
}

/// Register the described item and deliver the notification(s) the host
/// would send for `fire.event`.
async fn fire_event(bus: &dyn EventBus, registry: &MemoryItemRegistry, fire: FireArgs) {
    let item_id = fire.item_id.clone();
    registry.insert(
        item_id.clone(),
        ItemInfo {
            name: fire.name,
            save_path: fire.save_path,
            move_on_completed: fire.move_on_completed_path.is_some(),
            move_on_completed_path: fire.move_on_completed_path.unwrap_or_default(),
            label: fire.label,
        },
    );

    info!(item_id = %item_id, event = %fire.event, "firing event");
    let extra = fire.extra;
    match fire.event {
        EventKind::Added => bus.emit(Notification::ItemAdded { item_id, extra }).await,
        EventKind::Complete => bus.emit(Notification::ItemFinished { item_id, extra }).await,
        EventKind::Copied => bus.emit(Notification::ItemCopied { item_id, extra }).await,
        EventKind::Removed => {
            bus.emit(Notification::PreItemRemoved {
                item_id: item_id.clone(),
            })
            .await;
            registry.remove(&item_id);
            bus.emit(Notification::ItemRemoved { item_id, extra }).await;
        }
    }
}

fn report_mutation(mutation: Mutation, done: &str) {
    match mutation {
        Mutation::Applied => println!("{done}"),
        Mutation::NotFound => println!("not found"),
    }
}

fn print_commands(commands: &[CommandRecord]) {
    if commands.is_empty() {
        println!("no commands");
        return;
    }
    for record in commands {
        println!("{}", record.id);
        println!("    event:   {}", record.event);
        println!("    type:    {}", record.command_type);
        println!("    command: {}", record.command);
        if !record.label.is_empty() {
            println!("    label:   {}", record.label);
        }
        if record.delay_duration().is_some() {
            println!("    delay:   {}s", record.delay);
        }
    }
}
