//! Test reflection providers.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use orenda_core::error::BridgeError;
use orenda_core::provider::{ReflectionProvider, ReflectionRequest, ReflectionResult};

/// A provider that replays a queue of canned outcomes and records every
/// request it receives. Once the queue is drained it answers each request
/// with `"reflection N"`, N counting from 1 across all requests.
#[derive(Debug, Default)]
pub struct ScriptedReflectionProvider {
    outcomes: Mutex<VecDeque<Result<ReflectionResult, BridgeError>>>,
    requests: Mutex<Vec<ReflectionRequest>>,
    warm_ups: Mutex<usize>,
}

impl ScriptedReflectionProvider {
    /// Creates a provider that always succeeds with generated text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that first returns `outcomes` in order.
    #[must_use]
    pub fn with_outcomes(outcomes: Vec<Result<ReflectionResult, BridgeError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    /// Convenience for a queue of successful responses.
    #[must_use]
    pub fn with_responses(responses: &[&str]) -> Self {
        Self::with_outcomes(
            responses
                .iter()
                .map(|r| {
                    Ok(ReflectionResult {
                        success: true,
                        response: (*r).to_owned(),
                    })
                })
                .collect(),
        )
    }

    /// Returns a snapshot of all received requests.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<ReflectionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns how many times `warm_up` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn warm_up_calls(&self) -> usize {
        *self.warm_ups.lock().unwrap()
    }
}

#[async_trait]
impl ReflectionProvider for ScriptedReflectionProvider {
    async fn reflect(&self, request: &ReflectionRequest) -> Result<ReflectionResult, BridgeError> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        if let Some(outcome) = self.outcomes.lock().unwrap().pop_front() {
            return outcome;
        }
        Ok(ReflectionResult {
            success: true,
            response: format!("reflection {count}"),
        })
    }

    async fn warm_up(&self) -> Result<(), BridgeError> {
        *self.warm_ups.lock().unwrap() += 1;
        Ok(())
    }
}

/// A provider whose every call fails, including warm-up.
#[derive(Debug, Default)]
pub struct FailingReflectionProvider {
    calls: Mutex<usize>,
}

impl FailingReflectionProvider {
    /// Creates a failing provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many reflections were requested.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ReflectionProvider for FailingReflectionProvider {
    async fn reflect(&self, _request: &ReflectionRequest) -> Result<ReflectionResult, BridgeError> {
        *self.calls.lock().unwrap() += 1;
        Err(BridgeError::Provider("connection refused".into()))
    }

    async fn warm_up(&self) -> Result<(), BridgeError> {
        Err(BridgeError::Provider("connection refused".into()))
    }
}

/// A provider that sleeps before answering. Used to exercise caller-side
/// timeouts.
#[derive(Debug)]
pub struct StalledReflectionProvider(pub Duration);

#[async_trait]
impl ReflectionProvider for StalledReflectionProvider {
    async fn reflect(&self, _request: &ReflectionRequest) -> Result<ReflectionResult, BridgeError> {
        tokio::time::sleep(self.0).await;
        Ok(ReflectionResult {
            success: true,
            response: "too late".to_owned(),
        })
    }

    async fn warm_up(&self) -> Result<(), BridgeError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}
