//! Dismiss button plugin.

use std::sync::Arc;

use async_trait::async_trait;

use super::ButtonHandler;
use crate::bot::ButtonContext;
use crate::cache::GuildCache;

/// Acknowledges a notice so the user knows the press registered.
pub struct Dismiss;

#[async_trait]
impl ButtonHandler for Dismiss {
    fn custom_id(&self) -> &'static str {
        "dismiss"
    }

    async fn execute(&self, _cache: Arc<GuildCache>, ctx: &ButtonContext) -> anyhow::Result<()> {
        ctx.reply("Dismissed.").await
    }
}
