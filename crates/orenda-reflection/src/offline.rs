//! Provider used when no endpoint is configured.

use async_trait::async_trait;
use orenda_core::error::BridgeError;
use orenda_core::provider::{ReflectionProvider, ReflectionRequest, ReflectionResult};

/// Always unavailable, so every reflection falls back to scripted text.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineReflectionProvider;

#[async_trait]
impl ReflectionProvider for OfflineReflectionProvider {
    async fn reflect(&self, _request: &ReflectionRequest) -> Result<ReflectionResult, BridgeError> {
        Err(BridgeError::Provider("no bridge endpoint configured".to_owned()))
    }
}
