//! Orenda Core — shared abstractions.
//!
//! This crate defines the traits and value types that the conversation and
//! journey crates depend on: time, randomness, persistence, rendering and the
//! reflection provider. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod provider;
pub mod rng;
pub mod store;
pub mod view;
