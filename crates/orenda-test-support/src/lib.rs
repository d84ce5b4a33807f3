//! Shared test doubles for the Orenda Bridge conversation engine.

mod clock;
mod provider;
mod rng;
mod store;
mod view;

pub use clock::{FixedClock, RecordingPacer};
pub use provider::{
    FailingReflectionProvider, ScriptedReflectionProvider, StalledReflectionProvider,
};
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingStore, InMemoryStore};
pub use view::{RecordingView, ViewEvent};
