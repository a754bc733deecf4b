use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{NavError, NavResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NavConfig {
    pub host: HostConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostConfig {
    /// Whether back-navigation is available on a host. A host with this
    /// disabled keeps only the current entry across refreshes.
    pub navigate_back_enabled: bool,
    /// Maximum back-stack depth. The oldest (root) entry is evicted when
    /// a forward navigation would exceed it.
    pub history_capacity: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            navigate_back_enabled: true,
            history_capacity: 256,
        }
    }
}

impl NavConfig {
    pub fn load() -> NavResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> NavResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(NavError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            NavError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            NavError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        // A capacity below 2 could never hold a back target.
        self.host.history_capacity = self.host.history_capacity.max(2);
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("CROSSNAV_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("crossnav").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("crossnav")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("crossnav").join("config.toml"));
    }
    None
}
