use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::infra::gobuild::GoBuild;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler invocation settings
    pub build: BuildConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Toolchain program used for diagnostic builds
    pub program: String,

    /// Root directory for throwaway build workspaces (system temp if unset)
    pub temp_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            temp_dir: None,
        }
    }
}

impl Config {
    /// Materialize the configured build runner. A CLI `--build-with`
    /// override takes precedence over the config file and environment.
    pub fn runner(&self, program_override: Option<String>) -> GoBuild {
        GoBuild {
            program: program_override.unwrap_or_else(|| self.build.program.clone()),
            temp_root: self.build.temp_dir.clone(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["unuse.toml", ".unuse.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with UNUSE_ prefix
    builder = builder.add_source(config::Environment::with_prefix("UNUSE").separator("_"));

    let cfg = builder.build().context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}
