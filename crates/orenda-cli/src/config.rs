//! Runtime configuration assembled from the command line.

use std::sync::Arc;

use orenda_content::application::loader::{builtin_bundle, load_bundle, load_pacing};
use orenda_content::domain::bundle::ContentBundle;
use orenda_content::domain::pacing::PacingConfig;
use orenda_core::clock::{Clock, Pacer, SystemClock, TokioPacer};
use orenda_core::provider::ReflectionProvider;
use orenda_core::store::KeyValueStore;
use orenda_reflection::http_provider::HttpReflectionProvider;
use orenda_reflection::offline::OfflineReflectionProvider;
use orenda_store::file_store::FileStore;
use tracing::info;

use crate::cli::Cli;
use crate::error::AppError;

/// Everything a command needs to run.
#[derive(Clone)]
pub struct AppConfig {
    /// Validated content bundle.
    pub content: Arc<ContentBundle>,
    /// Pacing tuning.
    pub pacing: PacingConfig,
    /// Reflection provider.
    pub provider: Arc<dyn ReflectionProvider>,
    /// Local key-value store.
    pub store: Arc<dyn KeyValueStore>,
    /// Source of timestamps.
    pub clock: Arc<dyn Clock>,
    /// Source of delays.
    pub pacer: Arc<dyn Pacer>,
    /// User identifier forwarded to the provider.
    pub user_id: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("pacing", &self.pacing)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Loads content and pacing and picks the provider and store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Bridge` wrapping `BridgeError::Config` if a file is
    /// unreadable or invalid, or if the bridge URL is malformed.
    pub async fn load(cli: &Cli) -> Result<Self, AppError> {
        let content = match &cli.content {
            Some(path) => load_bundle(path).await?,
            None => builtin_bundle()?,
        };

        let mut pacing = match &cli.pacing {
            Some(path) => load_pacing(path).await?,
            None => PacingConfig::default(),
        };
        if cli.fast {
            pacing = PacingConfig {
                depth: pacing.depth,
                history_window: pacing.history_window,
                request_timeout_ms: pacing.request_timeout_ms,
                warm_up_timeout_ms: pacing.warm_up_timeout_ms,
                ..PacingConfig::instant()
            };
        }

        let provider: Arc<dyn ReflectionProvider> = match cli
            .bridge_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        {
            Some(url) => {
                info!(url, "using remote reflection endpoint");
                Arc::new(HttpReflectionProvider::new(url)?)
            }
            None => {
                info!("no bridge url configured, running on scripted lines");
                Arc::new(OfflineReflectionProvider)
            }
        };

        Ok(Self {
            content: Arc::new(content),
            pacing,
            provider,
            store: Arc::new(FileStore::new(&cli.state_file)),
            clock: Arc::new(SystemClock),
            pacer: Arc::new(TokioPacer),
            user_id: cli.user_id.clone(),
        })
    }
}
