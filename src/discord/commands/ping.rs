use crate::core::commands::{CommandError, SlashCommand};
use crate::discord::interaction::GatewayInteraction;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use poise::serenity_prelude as serenity;
use serde_json::{json, Value};

/// Check that the bot is alive and how long it has been running.
pub struct PingCommand {
    started_at: DateTime<Utc>,
}

impl PingCommand {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }
}

#[async_trait]
impl SlashCommand<GatewayInteraction> for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn schema(&self) -> Value {
        json!({
            "name": "ping",
            "type": 1,
            "description": "Check that the bot is alive",
        })
    }

    async fn execute(&self, interaction: &GatewayInteraction) -> Result<(), CommandError> {
        let uptime = format_uptime(Utc::now() - self.started_at);
        interaction
            .respond(
                serenity::CreateInteractionResponseMessage::new()
                    .content(format!("🏓 Pong! Up for {}", uptime)),
            )
            .await
    }
}

/// Compact "1d 2h 3m 4s" rendering, dropping leading zero units.
fn format_uptime(uptime: Duration) -> String {
    let total = uptime.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60,
    );

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{}s", seconds));
    parts.join(" ")
}
