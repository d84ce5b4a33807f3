//! Conversation application services.

pub mod pacing;
pub mod persistence;
pub mod query_handlers;
pub mod turn_handlers;
