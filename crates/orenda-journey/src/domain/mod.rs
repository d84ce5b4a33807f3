//! Journey domain types.

pub mod commands;
pub mod reflection;
