use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde_json::Value;

use crate::core::commands::{CommandPublisher, PublishError};

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Publishes guild commands through Discord's bulk-overwrite endpoint.
pub struct DiscordCommandPublisher {
    client: Client,
    base_url: String,
    application_id: String,
    guild_id: String,
}

impl DiscordCommandPublisher {
    pub fn new(
        token: &str,
        application_id: impl Into<String>,
        guild_id: impl Into<String>,
    ) -> Result<Self, PublishError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("DiscordBot (maps_community_bot, 0.1.0)"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bot {}", token))
                .map_err(|e| PublishError::Transport(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DISCORD_API_BASE.to_string(),
            application_id: application_id.into(),
            guild_id: guild_id.into(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn commands_url(&self) -> String {
        format!(
            "{}/applications/{}/guilds/{}/commands",
            self.base_url, self.application_id, self.guild_id
        )
    }
}

#[async_trait]
impl CommandPublisher for DiscordCommandPublisher {
    async fn replace_all(&self, schemas: &[Value]) -> Result<usize, PublishError> {
        let response = self
            .client
            .put(self.commands_url())
            .json(schemas)
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let registered: Vec<Value> = response
            .json()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;
        Ok(registered.len())
    }
}
