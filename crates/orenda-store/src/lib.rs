//! Orenda Bridge — local key-value persistence.
//!
//! Session data is kept as a flat map of keys to JSON-encoded strings in a
//! single file, the way a browser's local storage would hold it.

pub mod file_store;
