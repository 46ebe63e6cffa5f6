//! Application state management.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gitinfo_types::GitProperties;

use crate::config::{Config, GitConfig};
use crate::properties;

/// Shared application state.
///
/// Everything here is fixed by the startup sequence; handlers only read,
/// so concurrent requests need no coordination.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The five configured metadata values
    git: GitConfig,
    /// Summary of the properties resource, if it loaded at startup
    git_properties: Option<GitProperties>,
    /// Location of the properties resource, re-read per detail request
    properties_path: PathBuf,
}

impl AppState {
    /// Create state from explicit parts.
    pub fn new(
        git: GitConfig,
        git_properties: Option<GitProperties>,
        properties_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                git,
                git_properties,
                properties_path: properties_path.into(),
            }),
        }
    }

    /// Build state from configuration, probing the properties resource once.
    pub fn from_config(config: &Config) -> Self {
        let git_properties = properties::probe(&config.properties_path);
        Self::new(
            config.git.clone(),
            git_properties,
            config.properties_path.clone(),
        )
    }

    /// The configured build metadata values.
    pub fn git(&self) -> &GitConfig {
        &self.inner.git
    }

    /// The git properties summary, absent when no resource was found at startup.
    pub fn git_properties(&self) -> Option<&GitProperties> {
        self.inner.git_properties.as_ref()
    }

    /// Location of the bundled properties resource.
    pub fn properties_path(&self) -> &Path {
        &self.inner.properties_path
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
