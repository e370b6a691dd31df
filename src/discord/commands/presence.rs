// Bot presence shown in the member list.
//
// Discord-layer glue only: we work with SDK types (Context, ActivityData,
// OnlineStatus) and keep it short.

use poise::serenity_prelude as serenity;

/// Called once the bot is ready so members can see what it is doing.
pub fn on_ready(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching("for new maps");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Shown while operators still have configuration values to fill in.
pub fn on_configuration_incomplete(ctx: &serenity::Context, missing: usize) {
    let activity = serenity::ActivityData::custom(incomplete_status(missing));
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Idle);
}

fn incomplete_status(missing: usize) -> String {
    match missing {
        1 => "1 setting needs a value".to_string(),
        n => format!("{} settings need a value", n),
    }
}
