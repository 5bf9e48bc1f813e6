use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegtraceError};

/// Identity of the process recording segments. Stamped into the parent
/// descriptors this process hands to downstream callees, so a trace can be
/// stitched back to the service and address that produced each segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub service: String,
    pub peer: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: "unknown-service".to_string(),
            peer: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides);
        }
        apply_overrides(&mut cfg, load_env_overrides());
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        apply_overrides(&mut cfg, load_env_overrides());
        cfg
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    service: Option<String>,
    peer: Option<String>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("SEGTRACE_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("segtrace/config.toml")
}

fn load_file_overrides(path: &PathBuf) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| SegtraceError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed: ConfigOverrides = toml::from_str(&raw)
        .map_err(|e| SegtraceError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

fn load_env_overrides() -> ConfigOverrides {
    ConfigOverrides {
        service: env::var("SEGTRACE_SERVICE").ok(),
        peer: env::var("SEGTRACE_PEER").ok(),
    }
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides) {
    if let Some(v) = overrides.service {
        cfg.service = v;
    }
    if let Some(v) = overrides.peer {
        cfg.peer = Some(v);
    }
}
