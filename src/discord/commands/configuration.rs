// /configuration - show which configuration rows exist and which still need a value.
//
// Values are never echoed back: some of them (API keys) are secrets.

use crate::core::commands::{CommandError, SlashCommand};
use crate::core::configuration::ConfigurationEntry;
use crate::discord::interaction::GatewayInteraction;
use crate::discord::SharedConfiguration;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use serde_json::{json, Value};

pub struct ConfigurationCommand {
    configuration: SharedConfiguration,
}

impl ConfigurationCommand {
    pub fn new(configuration: SharedConfiguration) -> Self {
        Self { configuration }
    }
}

#[async_trait]
impl SlashCommand<GatewayInteraction> for ConfigurationCommand {
    fn name(&self) -> &str {
        "configuration"
    }

    fn schema(&self) -> Value {
        json!({
            "name": "configuration",
            "type": 1,
            "description": "Show which bot configuration values are set",
            // ADMINISTRATOR
            "default_member_permissions": "8",
            "dm_permission": false,
        })
    }

    async fn execute(&self, interaction: &GatewayInteraction) -> Result<(), CommandError> {
        let entries = self.configuration.entries().await?;

        let embed = serenity::CreateEmbed::new()
            .title("⚙️ Bot Configuration")
            .description(render_entries(&entries))
            .color(serenity::Color::BLURPLE)
            .timestamp(serenity::Timestamp::now());

        interaction
            .respond(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            )
            .await
    }
}

fn render_entries(entries: &[ConfigurationEntry]) -> String {
    if entries.is_empty() {
        return "No configuration rows yet. They are created when the bot starts.".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let status = if entry.is_set() { "✅ set" } else { "❌ not set" };
            format!("`{}` {}", entry.name, status)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
