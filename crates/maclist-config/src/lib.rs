use anyhow::Context;
use maclist_core::{MaskOptions, PLACEHOLDER, ShapePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the current directory
pub const PROJECT_CONFIG_FILE: &str = "maclist.toml";

/// Configuration for a masking run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default)]
    pub on_unexpected_shape: ShapePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            placeholder: default_placeholder(),
            on_unexpected_shape: ShapePolicy::default(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("large_maclist.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("large_maclist_masked.json")
}

fn default_placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// Values given on the command line; `None` keeps the config file value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub placeholder: Option<String>,
    pub on_unexpected_shape: Option<ShapePolicy>,
}

impl Config {
    /// Resolve configuration.
    ///
    /// An explicit path must exist. Otherwise `./maclist.toml` is tried, then
    /// the per-user config file. Nothing is created when no file is found.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let local = PathBuf::from(PROJECT_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::config_path()
            && global.exists()
        {
            return Self::load_from(&global);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load config from a TOML file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Per-user config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "maclist", "maclist")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(input_path) = overrides.input_path {
            self.input_path = input_path;
        }
        if let Some(output_path) = overrides.output_path {
            self.output_path = output_path;
        }
        if let Some(placeholder) = overrides.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(policy) = overrides.on_unexpected_shape {
            self.on_unexpected_shape = policy;
        }
        self
    }

    pub fn mask_options(&self) -> MaskOptions {
        MaskOptions {
            placeholder: self.placeholder.clone(),
            on_unexpected_shape: self.on_unexpected_shape,
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
