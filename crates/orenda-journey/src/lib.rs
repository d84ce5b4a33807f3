//! Orenda Bridge — Houses Journey.
//!
//! Plays scripted scenes between pairs of houses. Each scene ends in a
//! question; the user's answer is kept as a reflection in the local store.

pub mod application;
pub mod domain;
