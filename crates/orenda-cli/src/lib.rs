//! Orenda Bridge — terminal front end.
//!
//! Wires content, pacing, the reflection provider and the file store into a
//! conversation or journey driven from standard input.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod terminal;
