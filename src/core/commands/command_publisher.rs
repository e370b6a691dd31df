use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("API rejected commands ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Replaces the full set of remotely advertised commands.
///
/// This is an overwrite, not a diff: anything registered remotely but missing
/// from `schemas` is removed.
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    /// Returns how many commands the remote side now advertises.
    async fn replace_all(&self, schemas: &[Value]) -> Result<usize, PublishError>;
}

/// Publish once, logging the result. Never fails: local dispatch keeps working
/// whatever the remote side currently advertises.
pub async fn publish_commands(publisher: &dyn CommandPublisher, schemas: &[Value]) -> bool {
    match publisher.replace_all(schemas).await {
        Ok(count) => {
            tracing::info!(count, "Successfully registered commands");
            true
        }
        Err(err) => {
            tracing::error!("Failed to register commands: {}", err);
            false
        }
    }
}
