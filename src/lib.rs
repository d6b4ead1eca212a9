//! teams-webhook: incoming webhook messages
//!
//! A library for building JSON messages and posting them once to a
//! chat-platform incoming webhook, such as a Microsoft Teams channel.

pub mod config;
pub mod message;
pub mod webhook;
