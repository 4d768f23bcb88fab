//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.
//! The CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STRATA_<SECTION>__<KEY>`, e.g.
//!    `STRATA_TOOLCHAIN__PROGRAM=/opt/dotnet/dotnet`
//! 3. Config file: `--config FILE`, or `config.toml` in the platform config dir
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::{Context, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// External build tool settings.
    pub toolchain: ToolchainConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Program invoked for every `new`, `add`, `sln` and `restore` call.
    pub program: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            toolchain: ToolchainConfig {
                program: "dotnet".into(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let cfg: Self = Config::builder()
            .set_default("toolchain.program", defaults.toolchain.program)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix("STRATA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration")?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.toolchain.program.trim().is_empty() {
            bail!("toolchain.program must not be empty");
        }
        if OutputFormat::from_config(&self.output.format).is_none() {
            bail!(
                "unknown output.format '{}' (expected auto, human, plain or json)",
                self.output.format
            );
        }
        Ok(())
    }

    /// The configured output format, falling back to `Auto`.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_config(&self.output.format).unwrap_or_default()
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.strata.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".strata.toml"))
    }
}
