use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio::sync::Mutex;
use tracing::info;

use collate_bot::bot::{schema, MentionDetector, SharedController};
use collate_bot::commands::Command;
use collate_bot::config::BotConfig;
use collate_bot::controller::ConversationController;
use collate_bot::localization::init_localization;
use collate_bot::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;
    init_tracing(config.log_format)?;
    init_localization(&config.default_language)?;

    info!(
        log_format = ?config.log_format,
        default_language = %config.default_language,
        "Starting Collate Telegram Bot"
    );

    let bot = Bot::new(&config.bot_token);
    let me = bot.get_me().await?;
    bot.set_my_commands(Command::bot_commands()).await?;
    let mentions = Arc::new(MentionDetector::new(me.username())?);
    info!(bot_username = %me.username(), "Bot initialized, starting dispatcher");

    // A single list is shared by every chat the bot is in
    let controller: SharedController = Arc::new(Mutex::new(ConversationController::new()));

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![controller, mentions, me])
        .default_handler(|_upd| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
