// The command registry maps command names to their handlers.
//
// It is built exactly once from the static command catalog and then only read.
// Because nothing mutates it after startup, it can be shared behind an Arc
// across every concurrently dispatched interaction without any locking.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Error type returned by command and event handlers.
/// Boxed so handlers can `?` errors from Discord, the database, or anything else.
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// A single remotely invocable slash command.
///
/// `I` is the interaction type handed to `execute`. The Discord layer uses the
/// gateway interaction; tests use lightweight fakes.
#[async_trait]
pub trait SlashCommand<I: Send + Sync>: Send + Sync {
    /// Unique name the command is registered and looked up under.
    fn name(&self) -> &str;

    /// Declarative schema sent to the remote API when publishing commands.
    fn schema(&self) -> Value;

    async fn execute(&self, interaction: &I) -> Result<(), CommandError>;
}

pub struct CommandRegistry<I: Send + Sync> {
    commands: HashMap<String, Arc<dyn SlashCommand<I>>>,
    schemas: Vec<Value>,
}

impl<I: Send + Sync> CommandRegistry<I> {
    /// Build the registry from commands in load order.
    ///
    /// Duplicate names are resolved last-write-wins. The schema list keeps one
    /// entry per loaded command, so it may contain duplicates if names collide.
    pub fn from_modules(modules: Vec<Arc<dyn SlashCommand<I>>>) -> Self {
        let mut commands: HashMap<String, Arc<dyn SlashCommand<I>>> =
            HashMap::with_capacity(modules.len());
        let mut schemas = Vec::with_capacity(modules.len());

        for module in modules {
            let name = module.name().to_string();
            schemas.push(module.schema());

            if commands.insert(name.clone(), module).is_some() {
                tracing::warn!(command = %name, "Duplicate command name, keeping the last one loaded");
            }
        }

        tracing::debug!(count = commands.len(), "Command registry built");
        Self { commands, schemas }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn SlashCommand<I>>> {
        self.commands.get(name)
    }

    /// Schemas in load order, ready to be published.
    pub fn schemas(&self) -> &[Value] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
