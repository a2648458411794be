// Application state module
// Shared by every connection task

use super::types::Config;
use crate::activities::SignupSheet;
use crate::mirror::{self, MirrorError, SharedMirror};

/// Application state
pub struct AppState {
    pub config: Config,
    pub sheet: SignupSheet,
}

impl AppState {
    /// Create `AppState` with the mirror selected by `config.mirror`
    pub async fn new(config: &Config) -> Result<Self, MirrorError> {
        let mirror = mirror::build(&config.mirror).await?;
        Self::with_mirror(config, mirror).await
    }

    /// Create `AppState` around an already built mirror
    pub async fn with_mirror(config: &Config, mirror: SharedMirror) -> Result<Self, MirrorError> {
        let sheet = SignupSheet::from_mirror(mirror).await?;
        Ok(Self::with_sheet(config, sheet))
    }

    pub fn with_sheet(config: &Config, sheet: SignupSheet) -> Self {
        Self {
            config: config.clone(),
            sheet,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}

#[cfg(test)]
impl AppState {
    /// Default configuration with the seed roster and the given mirror
    pub fn for_tests(mirror: SharedMirror) -> Self {
        let config = Config::load_from("does-not-exist/config").expect("default config");
        let sheet = SignupSheet::new(crate::activities::ActivityStore::seeded(), mirror);
        Self::with_sheet(&config, sheet)
    }
}
