//! Interaction routing - slash commands and button presses.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;
use twilight_model::application::interaction::{Interaction, InteractionData};

use crate::bot::{AppState, ButtonContext, CommandContext, HttpReplier};
use crate::cache::{GuildCache, GuildHandle};
use crate::plugins::HandlerRegistry;

/// How long a button error notice stays visible before it is retracted.
const BUTTON_ERROR_TTL: Duration = Duration::from_secs(5);

const COMMAND_ERROR_NOTICE: &str = "There was an error executing this command!";
const BUTTON_ERROR_NOTICE: &str = "There was an error executing this button!";

pub async fn handle(state: &AppState, interaction: Interaction) -> Result<()> {
    // Interactions outside a guild have no cache to bind to.
    let Some(guild_id) = interaction.guild_id else {
        return Ok(());
    };

    // An interaction can be the very first contact with a guild.
    let cache = state
        .registry
        .get_or_create(&GuildHandle::new(guild_id))
        .await?;

    let replier = Arc::new(HttpReplier::new(
        state.http.clone(),
        state.application_id()?,
        interaction.id,
        interaction.token.clone(),
    ));
    let invoker = interaction.author_id();

    match interaction.data {
        Some(InteractionData::ApplicationCommand(data)) => {
            let ctx = CommandContext::new(replier, data.name.clone(), data.options.clone(), invoker);
            dispatch_command(&state.handlers, cache, ctx).await
        }
        Some(InteractionData::MessageComponent(data)) => {
            let ctx = ButtonContext::new(replier, data.custom_id.clone(), invoker);
            dispatch_button(&state.handlers, cache, ctx).await
        }
        _ => Ok(()),
    }
}

/// Dispatch a slash command to its handler.
///
/// An unknown command name is a stale registration, not an error; the
/// interaction is dropped silently. A failing handler produces exactly
/// one user-visible notice and never propagates.
async fn dispatch_command(
    handlers: &HandlerRegistry,
    cache: Arc<GuildCache>,
    ctx: CommandContext,
) -> Result<()> {
    let Some(handler) = handlers.command(&ctx.name) else {
        return Ok(());
    };

    ctx.defer().await?;

    if let Err(error) = handler.execute(cache, &ctx).await {
        warn!(%error, "command {:?} failed", ctx.name);
        ctx.follow_up(COMMAND_ERROR_NOTICE).await?;
    }
    Ok(())
}

/// Dispatch a button press to its handler.
///
/// A failing handler gets one visible error notice, which is retracted
/// after a fixed delay.
async fn dispatch_button(
    handlers: &HandlerRegistry,
    cache: Arc<GuildCache>,
    ctx: ButtonContext,
) -> Result<()> {
    let Some(handler) = handlers.button(&ctx.custom_id) else {
        return Ok(());
    };

    if let Err(error) = handler.execute(cache, &ctx).await {
        warn!(%error, "button {:?} failed", ctx.custom_id);
        ctx.reply(BUTTON_ERROR_NOTICE).await?;
        tokio::time::sleep(BUTTON_ERROR_TTL).await;
        ctx.delete_reply().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use twilight_model::application::command::{Command, CommandType};
    use twilight_model::id::Id;
    use twilight_util::builder::command::CommandBuilder;

    use super::*;
    use crate::bot::Replier;
    use crate::cache::CacheRegistry;
    use crate::database::memory::MemoryStore;
    use crate::plugins::{ButtonHandler, CommandHandler};

    #[derive(Default)]
    struct RecordingReplier {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingReplier {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl Replier for RecordingReplier {
        async fn reply(&self, content: &str) -> Result<()> {
            self.calls.lock().push(format!("reply:{content}"));
            Ok(())
        }

        async fn defer(&self) -> Result<()> {
            self.calls.lock().push("defer".to_string());
            Ok(())
        }

        async fn follow_up(&self, content: &str) -> Result<()> {
            self.calls.lock().push(format!("follow_up:{content}"));
            Ok(())
        }

        async fn delete_reply(&self) -> Result<()> {
            self.calls.lock().push("delete".to_string());
            Ok(())
        }
    }

    struct FailingCommand;

    #[async_trait]
    impl CommandHandler for FailingCommand {
        fn definition(&self) -> Command {
            CommandBuilder::new("boom", "Always fails", CommandType::ChatInput).build()
        }

        async fn execute(&self, _cache: Arc<GuildCache>, _ctx: &CommandContext) -> Result<()> {
            anyhow::bail!("boom")
        }
    }

    struct FailingButton;

    #[async_trait]
    impl ButtonHandler for FailingButton {
        fn custom_id(&self) -> &'static str {
            "boom"
        }

        async fn execute(&self, _cache: Arc<GuildCache>, _ctx: &ButtonContext) -> Result<()> {
            anyhow::bail!("boom")
        }
    }

    async fn cache_entry() -> Arc<GuildCache> {
        let registry = CacheRegistry::new(Arc::new(MemoryStore::new()));
        registry
            .get_or_create(&GuildHandle::new(Id::new(1)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_command_is_dropped_silently() {
        let handlers = HandlerRegistry::with_handlers(Vec::new(), Vec::new());
        let replier = Arc::new(RecordingReplier::default());
        let ctx = CommandContext::new(replier.clone(), "gone".to_string(), Vec::new(), None);

        dispatch_command(&handlers, cache_entry().await, ctx)
            .await
            .unwrap();

        assert!(replier.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_button_is_dropped_silently() {
        let handlers = HandlerRegistry::with_handlers(Vec::new(), Vec::new());
        let replier = Arc::new(RecordingReplier::default());
        let ctx = ButtonContext::new(replier.clone(), "close".to_string(), None);

        dispatch_button(&handlers, cache_entry().await, ctx)
            .await
            .unwrap();

        assert!(replier.calls().is_empty());
    }

    #[tokio::test]
    async fn failing_command_produces_one_error_notice() {
        let handlers =
            HandlerRegistry::with_handlers(vec![Arc::new(FailingCommand)], Vec::new());
        let replier = Arc::new(RecordingReplier::default());
        let ctx = CommandContext::new(replier.clone(), "boom".to_string(), Vec::new(), None);

        dispatch_command(&handlers, cache_entry().await, ctx)
            .await
            .unwrap();

        assert_eq!(
            replier.calls(),
            vec![
                "defer".to_string(),
                format!("follow_up:{COMMAND_ERROR_NOTICE}"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failing_button_notice_is_retracted() {
        let handlers = HandlerRegistry::with_handlers(Vec::new(), vec![Arc::new(FailingButton)]);
        let replier = Arc::new(RecordingReplier::default());
        let ctx = ButtonContext::new(replier.clone(), "boom".to_string(), None);

        dispatch_button(&handlers, cache_entry().await, ctx)
            .await
            .unwrap();

        assert_eq!(
            replier.calls(),
            vec![format!("reply:{BUTTON_ERROR_NOTICE}"), "delete".to_string()]
        );
    }
}
