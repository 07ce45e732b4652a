//! Bot module for handling Telegram interactions
//!
//! This module is split into two submodules:
//! - `message_handler`: Turns incoming commands and text messages into chat events
//! - `mention`: Detects and strips `@botname` mentions

pub mod mention;
pub mod message_handler;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::commands::Command;

// Re-export handler functions for use in main.rs
pub use mention::MentionDetector;
pub use message_handler::{command_handler, message_handler, SharedController};

/// Dispatcher handler tree.
///
/// Requires `SharedController`, `Arc<MentionDetector>` and `Me` as dependencies.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(dptree::filter(message_handler::is_plain_text).endpoint(message_handler))
}
