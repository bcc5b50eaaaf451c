//! Gateway runtime - shard event loop.

use tracing::{error, warn};
use twilight_gateway::Shard;

use super::AppState;
use crate::events;

/// Run the gateway loop until the connection fails fatally.
///
/// Each event is handled in its own task; a slow or failing handler never
/// blocks the loop or events for other guilds.
pub async fn run(mut shard: Shard, state: AppState) {
    loop {
        let event = match shard.next_event().await {
            Ok(event) => event,
            Err(source) => {
                if source.is_fatal() {
                    error!(error = %source, "fatal gateway error, shutting down");
                    break;
                }
                warn!(error = %source, "gateway error");
                continue;
            }
        };

        let state = state.clone();
        tokio::spawn(async move {
            events::handle_event(&state, event).await;
        });
    }
}
