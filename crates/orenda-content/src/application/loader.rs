//! Loads and validates content bundles and pacing files.
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as
//! JSON. A file that cannot be read, parsed or validated is a fatal
//! configuration error; there is no partial load.

use std::path::Path;

use orenda_core::error::BridgeError;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::domain::bundle::ContentBundle;
use crate::domain::pacing::PacingConfig;

const BUILTIN_BUNDLE: &str = include_str!("../../content/bridge.json");

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl Format {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

fn parse<T: DeserializeOwned>(text: &str, format: Format, what: &str) -> Result<T, BridgeError> {
    match format {
        Format::Json => serde_json::from_str(text)
            .map_err(|e| BridgeError::Config(format!("malformed {what}: {e}"))),
        Format::Yaml => serde_yaml::from_str(text)
            .map_err(|e| BridgeError::Config(format!("malformed {what}: {e}"))),
    }
}

async fn read(path: &Path, what: &str) -> Result<String, BridgeError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        BridgeError::Config(format!("cannot read {what} at {}: {e}", path.display()))
    })
}

/// Parses and validates a content bundle from text.
///
/// # Errors
///
/// Returns `BridgeError::Config` if the text is malformed or fails validation.
pub fn parse_bundle(text: &str, format: Format) -> Result<ContentBundle, BridgeError> {
    let bundle: ContentBundle = parse(text, format, "content bundle")?;
    bundle.validate()?;
    Ok(bundle)
}

/// Returns the bundle compiled into the binary.
///
/// # Errors
///
/// Returns `BridgeError::Config` if the embedded bundle fails validation.
pub fn builtin_bundle() -> Result<ContentBundle, BridgeError> {
    parse_bundle(BUILTIN_BUNDLE, Format::Json)
}

/// Reads, parses and validates a content bundle from disk.
///
/// # Errors
///
/// Returns `BridgeError::Config` if the file is unreadable, malformed or
/// invalid.
pub async fn load_bundle(path: &Path) -> Result<ContentBundle, BridgeError> {
    let text = read(path, "content bundle").await?;
    let bundle = parse_bundle(&text, Format::from_path(path))?;
    info!(
        path = %path.display(),
        topics = bundle.topics.len(),
        probed = bundle.probe_sequence.total(),
        "content bundle loaded"
    );
    Ok(bundle)
}

/// Parses and validates a pacing document. Omitted fields keep their
/// defaults.
///
/// # Errors
///
/// Returns `BridgeError::Config` if the text is malformed or inconsistent.
pub fn parse_pacing(text: &str, format: Format) -> Result<PacingConfig, BridgeError> {
    let pacing: PacingConfig = parse(text, format, "pacing config")?;
    pacing.validate()?;
    Ok(pacing)
}

/// Reads, parses and validates a pacing file from disk.
///
/// # Errors
///
/// Returns `BridgeError::Config` if the file is unreadable, malformed or
/// inconsistent.
pub async fn load_pacing(path: &Path) -> Result<PacingConfig, BridgeError> {
    let text = read(path, "pacing config").await?;
    let pacing = parse_pacing(&text, Format::from_path(path))?;
    debug!(path = %path.display(), ?pacing, "pacing config loaded");
    Ok(pacing)
}
