//! Orenda Bridge — conversation flow.
//!
//! Responsible for the stage machine that walks a user from the opener
//! through birth-detail gathering and topic probing to the close, the paced
//! delivery of agent lines, session persistence and export.

pub mod application;
pub mod domain;
