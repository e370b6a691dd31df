pub mod bot_settings;

pub use bot_settings::BotSettings;
