use std::fmt;

/// The configuration rows this bot guarantees exist after startup.
/// Values are filled in by operators; the bot only ever inserts the names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationKey {
    NewMapsChannelId,
    BanAppealChannelId,
    SourcejumpApiKey,
    SourcejumpApiUrl,
    DatabaseIssuesChannelId,
    DatabaseManagerRoleId,
}

impl ConfigurationKey {
    pub const ALL: [ConfigurationKey; 6] = [
        ConfigurationKey::NewMapsChannelId,
        ConfigurationKey::BanAppealChannelId,
        ConfigurationKey::SourcejumpApiKey,
        ConfigurationKey::SourcejumpApiUrl,
        ConfigurationKey::DatabaseIssuesChannelId,
        ConfigurationKey::DatabaseManagerRoleId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigurationKey::NewMapsChannelId => "NEW_MAPS_CHANNEL_ID",
            ConfigurationKey::BanAppealChannelId => "BAN_APPEAL_CHANNEL_ID",
            ConfigurationKey::SourcejumpApiKey => "SOURCEJUMP_API_KEY",
            ConfigurationKey::SourcejumpApiUrl => "SOURCEJUMP_API_URL",
            ConfigurationKey::DatabaseIssuesChannelId => "DATABASE_ISSUES_CHANNEL_ID",
            ConfigurationKey::DatabaseManagerRoleId => "DATABASE_MANAGER_ROLE_ID",
        }
    }

    /// Every key name, in seeding order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|key| key.as_str()).collect()
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the configuration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationEntry {
    pub name: String,
    pub value: Option<String>,
}

impl ConfigurationEntry {
    pub fn is_set(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}
