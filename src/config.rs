use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Default bound for the recursive manifest search.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Root configuration structure, deserialized from `.depscanr/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Detection settings.
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Deserialize)]
pub struct ScanConfig {
    /// Maximum directory depth for the recursive search.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Extra directory names to skip, on top of the built-in ignore list.
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scan: ScanConfig::default(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.depscanr/config.toml`
/// 3. `~/.config/depscanr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".depscanr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("depscanr").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
