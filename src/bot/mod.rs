//! Bot module - application state and gateway runtime.

mod context;
mod deploy;
mod runtime;

pub use context::{ButtonContext, CommandContext, HttpReplier, Replier};
pub use deploy::deploy_guild_commands;
pub use runtime::run;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use once_cell::sync::OnceCell;
use twilight_http::Client;
use twilight_http::client::InteractionClient;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;

use crate::cache::CacheRegistry;
use crate::plugins::HandlerRegistry;

/// Shared application state.
///
/// Explicitly owned and passed into the event handlers; there is no
/// process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    /// Discord HTTP client.
    pub http: Arc<Client>,

    /// Guild cache registry.
    pub registry: CacheRegistry,

    /// Loaded command and button handlers.
    pub handlers: Arc<HandlerRegistry>,

    /// Application id, learned from the Ready event.
    application_id: Arc<OnceCell<Id<ApplicationMarker>>>,
}

impl AppState {
    pub fn new(http: Arc<Client>, registry: CacheRegistry, handlers: Arc<HandlerRegistry>) -> Self {
        Self {
            http,
            registry,
            handlers,
            application_id: Arc::new(OnceCell::new()),
        }
    }

    /// Record the application id once the gateway reports it.
    pub fn set_application_id(&self, id: Id<ApplicationMarker>) {
        self.application_id.get_or_init(|| id);
    }

    pub fn application_id(&self) -> Result<Id<ApplicationMarker>> {
        self.application_id
            .get()
            .copied()
            .context("application id not yet known (no Ready event received)")
    }

    /// Interaction client bound to the known application id.
    pub fn interaction(&self) -> Result<InteractionClient<'_>> {
        Ok(self.http.interaction(self.application_id()?))
    }
}
