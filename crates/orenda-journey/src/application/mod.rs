//! Journey application services.

pub mod player;
pub mod query_handlers;
