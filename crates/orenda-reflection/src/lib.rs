//! Orenda Bridge — reflection providers.
//!
//! The HTTP client talks to the remote bridge endpoint; the offline provider
//! stands in when no endpoint is configured so that every line comes from
//! the scripted fallbacks.

pub mod http_provider;
pub mod offline;
