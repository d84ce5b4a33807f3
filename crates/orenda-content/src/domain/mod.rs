//! Content domain types.

pub mod bundle;
pub mod journey;
pub mod pacing;
pub mod script;
pub mod topics;
