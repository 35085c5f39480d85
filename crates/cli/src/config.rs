//! Optional TOML configuration.
//!
//! Looked up from `--config`, then `WIDGETRY_CONFIG`; absent both, defaults
//! apply. Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use widgetry_core::FactoryConfig;
use widgetry_host::RouterConfig;

pub(crate) const CONFIG_ENV: &str = "WIDGETRY_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WidgetryConfig {
    pub(crate) generator: FactoryConfig,
    pub(crate) host: HostSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct HostSection {
    pub(crate) notification_ttl_secs: u64,
    pub(crate) max_submissions: usize,
}

impl Default for HostSection {
    fn default() -> Self {
        let defaults = RouterConfig::default();
        HostSection {
            notification_ttl_secs: defaults.notification_ttl.as_secs(),
            max_submissions: defaults.max_submissions,
        }
    }
}

impl WidgetryConfig {
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let Some(path) = path else {
            return Ok(WidgetryConfig::default());
        };
        let src = std::fs::read_to_string(&path)
            .map_err(|e| format!("error reading config '{}': {}", path.display(), e))?;
        let config: WidgetryConfig = toml::from_str(&src)
            .map_err(|e| format!("error parsing config '{}': {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub(crate) fn router_config(&self) -> RouterConfig {
        RouterConfig {
            notification_ttl: Duration::from_secs(self.host.notification_ttl_secs),
            max_submissions: self.host.max_submissions,
        }
    }
}
