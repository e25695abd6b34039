use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::CrowdConfig;

/// Resolves, parses and validates the Crowd configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the config path: explicit path > CROWD_CONFIG env > ~/.crowd/crowd.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("CROWD_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".crowd")
            .join("crowd.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> crowd_core::Result<CrowdConfig> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            Self::parse_file(&config_path)?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            CrowdConfig::default()
        };

        Self::check(Self::apply_env_overrides(config))
    }

    /// Validate a config, logging warnings. Errors are joined into one
    /// `CrowdError::Config`.
    pub fn check(config: CrowdConfig) -> crowd_core::Result<CrowdConfig> {
        let warnings = config.validate().map_err(crowd_core::CrowdError::Config)?;
        for w in &warnings {
            warn!("{}", w);
        }
        Ok(config)
    }

    fn parse_file(path: &Path) -> crowd_core::Result<CrowdConfig> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str::<CrowdConfig>(&raw).map_err(|e| {
            crowd_core::CrowdError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply CROWD_* environment variable overrides.
    fn apply_env_overrides(config: CrowdConfig) -> CrowdConfig {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Unparsable values are ignored
    /// with a warning.
    pub fn apply_overrides<F>(mut config: CrowdConfig, lookup: F) -> CrowdConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CROWD_BASE_URL") {
            config.service.base_url = v;
        }
        if let Some(v) = lookup("CROWD_AGENT_COUNT") {
            match v.parse::<usize>() {
                Ok(n) => config.crowd.agent_count = n,
                Err(_) => warn!(value = %v, "ignoring non-numeric CROWD_AGENT_COUNT"),
            }
        }
        if let Some(v) = lookup("CROWD_SEED") {
            match v.parse::<u64>() {
                Ok(seed) => config.crowd.seed = seed,
                Err(_) => warn!(value = %v, "ignoring non-numeric CROWD_SEED"),
            }
        }
        if let Some(v) = lookup("CROWD_LOG_LEVEL") {
            config.logging.level = v;
        }
        config
    }
}
