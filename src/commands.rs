//! Bot commands.

use teloxide::utils::command::BotCommands;

/// Commands understood by the collate bot
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "begin a new list")]
    Start,
    #[command(description = "show usage")]
    Help,
    #[command(description = "show the responses collected so far")]
    Collate,
    #[command(description = "close the list and post the final responses")]
    Stop,
}
