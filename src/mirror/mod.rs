//! Activity mirror
//!
//! Best-effort write-through of roster changes to a secondary document store.
//! The mirror is injected into the signup sheet at construction: a no-op when
//! disabled, a TOML document store when enabled. There is no retry and no
//! consistency guarantee with the in-memory store.

mod document;

use async_trait::async_trait;
use std::sync::Arc;

use crate::activities::{seed_activities, Activity};
use crate::config::MirrorConfig;
use crate::logger;

pub use document::DocumentMirror;

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse mirror document: {0}")]
    Decode(#[from] toml::de::Error),
    #[error("failed to encode mirror document: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Secondary store that roster changes are forwarded to
#[async_trait]
pub trait Mirror: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Activities held by the mirror, if it is a source of truth at startup
    async fn load_activities(&self) -> Result<Option<Vec<Activity>>, MirrorError>;

    /// Append `email` to the participants of `activity`
    async fn push_participant(&self, activity: &str, email: &str) -> Result<(), MirrorError>;

    /// Remove every occurrence of `email` from the participants of `activity`
    async fn pull_participant(&self, activity: &str, email: &str) -> Result<(), MirrorError>;
}

/// Mirror used when the external store is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMirror;

#[async_trait]
impl Mirror for NoopMirror {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn load_activities(&self) -> Result<Option<Vec<Activity>>, MirrorError> {
        Ok(None)
    }

    async fn push_participant(&self, _activity: &str, _email: &str) -> Result<(), MirrorError> {
        Ok(())
    }

    async fn pull_participant(&self, _activity: &str, _email: &str) -> Result<(), MirrorError> {
        Ok(())
    }
}

pub type SharedMirror = Arc<dyn Mirror>;

/// Build the mirror selected by configuration
pub async fn build(config: &MirrorConfig) -> Result<SharedMirror, MirrorError> {
    if !config.enabled {
        return Ok(Arc::new(NoopMirror));
    }

    let mirror = DocumentMirror::open(&config.path, &seed_activities()).await?;
    logger::log_info(&format!(
        "[Mirror] Document store enabled at {}",
        mirror.path().display()
    ));
    Ok(Arc::new(mirror))
}
