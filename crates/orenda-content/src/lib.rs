//! Orenda Bridge — static content and pacing configuration.
//!
//! Responsible for the topic catalog, scripted dialogue, journey scenes and
//! pacing tuning, loaded once at startup and validated before a session may
//! begin.

pub mod application;
pub mod domain;
