//! Conversation domain types.

pub mod commands;
pub mod detector;
pub mod export;
pub mod state;
