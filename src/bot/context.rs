//! Interaction contexts handed to command and button handlers.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use twilight_http::Client;
use twilight_http::client::InteractionClient;
use twilight_model::application::interaction::application_command::CommandDataOption;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, InteractionMarker, UserMarker};
use twilight_util::builder::InteractionResponseDataBuilder;

/// Outbound reply primitives of one interaction.
///
/// The router and the handlers only ever talk to an interaction through
/// this trait, which keeps the dispatch paths testable without a gateway
/// connection.
#[async_trait]
pub trait Replier: Send + Sync {
    /// Send the initial response message.
    async fn reply(&self, content: &str) -> Result<()>;

    /// Acknowledge the interaction with a deferred response.
    async fn defer(&self) -> Result<()>;

    /// Send a follow-up message after the initial response.
    async fn follow_up(&self, content: &str) -> Result<()>;

    /// Retract the initial response.
    async fn delete_reply(&self) -> Result<()>;
}

/// [`Replier`] backed by the Discord HTTP API.
pub struct HttpReplier {
    http: Arc<Client>,
    application_id: Id<ApplicationMarker>,
    interaction_id: Id<InteractionMarker>,
    token: String,
}

impl HttpReplier {
    pub fn new(
        http: Arc<Client>,
        application_id: Id<ApplicationMarker>,
        interaction_id: Id<InteractionMarker>,
        token: String,
    ) -> Self {
        Self {
            http,
            application_id,
            interaction_id,
            token,
        }
    }

    fn interaction(&self) -> InteractionClient<'_> {
        self.http.interaction(self.application_id)
    }
}

#[async_trait]
impl Replier for HttpReplier {
    async fn reply(&self, content: &str) -> Result<()> {
        let data = InteractionResponseDataBuilder::new().content(content).build();
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data),
        };
        self.interaction()
            .create_response(self.interaction_id, &self.token, &response)
            .await?;
        Ok(())
    }

    async fn defer(&self) -> Result<()> {
        let response = InteractionResponse {
            kind: InteractionResponseType::DeferredChannelMessageWithSource,
            data: None,
        };
        self.interaction()
            .create_response(self.interaction_id, &self.token, &response)
            .await?;
        Ok(())
    }

    async fn follow_up(&self, content: &str) -> Result<()> {
        self.interaction()
            .create_followup(&self.token)
            .content(content)?
            .await?;
        Ok(())
    }

    async fn delete_reply(&self) -> Result<()> {
        self.interaction().delete_response(&self.token).await?;
        Ok(())
    }
}

/// Context for one slash command invocation.
pub struct CommandContext {
    replier: Arc<dyn Replier>,
    /// Invoked command name.
    pub name: String,
    /// Raw command options.
    pub options: Vec<CommandDataOption>,
    /// Invoking user, when the gateway supplied one.
    pub invoker: Option<Id<UserMarker>>,
}

impl CommandContext {
    pub fn new(
        replier: Arc<dyn Replier>,
        name: String,
        options: Vec<CommandDataOption>,
        invoker: Option<Id<UserMarker>>,
    ) -> Self {
        Self {
            replier,
            name,
            options,
            invoker,
        }
    }

    #[allow(dead_code)]
    pub async fn reply(&self, content: &str) -> Result<()> {
        self.replier.reply(content).await
    }

    pub async fn defer(&self) -> Result<()> {
        self.replier.defer().await
    }

    pub async fn follow_up(&self, content: &str) -> Result<()> {
        self.replier.follow_up(content).await
    }

    #[allow(dead_code)]
    pub async fn delete_reply(&self) -> Result<()> {
        self.replier.delete_reply().await
    }
}

/// Context for one button press.
pub struct ButtonContext {
    replier: Arc<dyn Replier>,
    /// Custom id of the pressed button.
    pub custom_id: String,
    /// Invoking user, when the gateway supplied one.
    pub invoker: Option<Id<UserMarker>>,
}

impl ButtonContext {
    pub fn new(
        replier: Arc<dyn Replier>,
        custom_id: String,
        invoker: Option<Id<UserMarker>>,
    ) -> Self {
        Self {
            replier,
            custom_id,
            invoker,
        }
    }

    pub async fn reply(&self, content: &str) -> Result<()> {
        self.replier.reply(content).await
    }

    #[allow(dead_code)]
    pub async fn follow_up(&self, content: &str) -> Result<()> {
        self.replier.follow_up(content).await
    }

    pub async fn delete_reply(&self) -> Result<()> {
        self.replier.delete_reply().await
    }
}
