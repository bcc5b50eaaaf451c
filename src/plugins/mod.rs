//! Plugin system for command and button handlers.
//!
//! Add a new handler by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding it to `commands()` or `buttons()`

pub mod dismiss;
pub mod join;
pub mod ping;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use twilight_model::application::command::Command;

use crate::bot::{ButtonContext, CommandContext};
use crate::cache::GuildCache;

/// A slash command handler unit.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command definition registered with Discord; its name is also the
    /// registry key.
    fn definition(&self) -> Command;

    /// Run the command against the guild's cache entry.
    ///
    /// The interaction is already acknowledged when this runs. The cache
    /// entry is shared with other in-flight handlers; do not assume
    /// exclusive access.
    async fn execute(&self, cache: Arc<GuildCache>, ctx: &CommandContext) -> anyhow::Result<()>;
}

/// A button handler unit.
#[async_trait]
pub trait ButtonHandler: Send + Sync {
    /// Custom id this handler is bound to.
    fn custom_id(&self) -> &'static str;

    async fn execute(&self, cache: Arc<GuildCache>, ctx: &ButtonContext) -> anyhow::Result<()>;
}

/// All registered command handlers.
fn commands() -> Vec<Arc<dyn CommandHandler>> {
    vec![Arc::new(ping::Ping), Arc::new(join::Join)]
}

/// All registered button handlers.
fn buttons() -> Vec<Arc<dyn ButtonHandler>> {
    vec![Arc::new(dismiss::Dismiss)]
}

/// Immutable lookup tables for command and button handlers.
///
/// Built exactly once at startup; command names and button ids live in
/// independent namespaces.
pub struct HandlerRegistry {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    buttons: HashMap<String, Arc<dyn ButtonHandler>>,
}

impl HandlerRegistry {
    /// Load the statically registered handlers.
    pub fn load() -> Self {
        let registry = Self::with_handlers(commands(), buttons());
        info!(
            "loaded {} command and {} button handlers",
            registry.commands.len(),
            registry.buttons.len()
        );
        registry
    }

    pub(crate) fn with_handlers(
        commands: Vec<Arc<dyn CommandHandler>>,
        buttons: Vec<Arc<dyn ButtonHandler>>,
    ) -> Self {
        let mut command_map: HashMap<String, Arc<dyn CommandHandler>> = HashMap::new();
        for handler in commands {
            let name = handler.definition().name;
            if command_map.contains_key(&name) {
                warn!("duplicate command handler {:?}, keeping the first", name);
                continue;
            }
            command_map.insert(name, handler);
        }

        let mut button_map: HashMap<String, Arc<dyn ButtonHandler>> = HashMap::new();
        for handler in buttons {
            let id = handler.custom_id();
            if button_map.contains_key(id) {
                warn!("duplicate button handler {:?}, keeping the first", id);
                continue;
            }
            button_map.insert(id.to_string(), handler);
        }

        Self {
            commands: command_map,
            buttons: button_map,
        }
    }

    /// Look up a command handler by name.
    pub fn command(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(name).cloned()
    }

    /// Look up a button handler by custom id.
    pub fn button(&self, custom_id: &str) -> Option<Arc<dyn ButtonHandler>> {
        self.buttons.get(custom_id).cloned()
    }

    /// Command definitions for guild deployment.
    pub fn command_definitions(&self) -> Vec<Command> {
        self.commands
            .values()
            .map(|handler| handler.definition())
            .collect()
    }
}
