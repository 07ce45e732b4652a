//! # Collate Telegram Bot
//!
//! A Telegram bot that collects one short response per participant for a
//! topic chosen by whoever started the list, and posts them back as a single
//! collated list.

pub mod bot;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod formatter;
pub mod localization;
pub mod observability;
pub mod session;
pub mod transport;
