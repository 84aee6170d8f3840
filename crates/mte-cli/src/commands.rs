// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared command implementations for the `mte` CLI.
//!
//! These functions are library-level so they can be tested without
//! spawning the binary.

use anyhow::{Context, Result};
use mte_config::{
    ConfigError, ConfigWarning, DEFAULT_CONFIG_FILE, ProjectSnapshot, TermEnvConfig,
    load_config_with, validate_config_in,
};
use mte_core::{EnvironmentMap, EnvironmentResolver, HostEnvironment, MANAGED_VARIABLES};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Inputs of `mte env`.
#[derive(Debug, Clone, Default)]
pub struct EnvOptions {
    /// Explicit config file. Defaults to `mte.toml` in the project directory,
    /// if it exists.
    pub config: Option<PathBuf>,
    /// Project directory. Defaults to the current directory.
    pub project: Option<PathBuf>,
}

impl EnvOptions {
    fn project_dir(&self) -> Result<PathBuf> {
        match &self.project {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("read current directory"),
        }
    }

    /// The config file to load, if any.
    fn config_path(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.config {
            return Ok(Some(path.clone()));
        }
        let candidate = self.project_dir()?.join(DEFAULT_CONFIG_FILE);
        Ok(candidate.is_file().then_some(candidate))
    }

    /// Directory relative paths in the config are anchored at: the
    /// project directory when given, else the config file's directory.
    fn base_dir(&self, config_path: Option<&Path>) -> Result<PathBuf> {
        if self.project.is_none() {
            if let Some(parent) = config_path.and_then(Path::parent) {
                return Ok(parent.to_path_buf());
            }
        }
        self.project_dir()
    }
}

/// Load the project snapshot described by `opts`.
///
/// `MTE_*` overrides and the `PATH` used to find a `system` Maven are read
/// from `host`.
pub fn load_snapshot<H: HostEnvironment>(
    opts: &EnvOptions,
    host: H,
) -> Result<ProjectSnapshot<H>> {
    let path = opts.config_path()?;
    let config = match &path {
        Some(p) => load_config_with(Some(p.as_path()), &host)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => {
            debug!(target: "mte.config", "no config file, using defaults");
            load_config_with(None, &host)?
        }
    };
    let base_dir = opts.base_dir(path.as_deref())?;
    Ok(ProjectSnapshot::with_host(config, base_dir, host))
}

/// Run the resolver over `env` and keep only the variables it manages.
///
/// `config_host` feeds config loading; `resolver_host` is what the resolver
/// reads through to for variables missing from `env`.
pub fn resolve_environment<C, R>(
    opts: &EnvOptions,
    mut env: EnvironmentMap,
    config_host: C,
    resolver_host: R,
) -> Result<EnvironmentMap>
where
    C: HostEnvironment,
    R: HostEnvironment,
{
    let snapshot = load_snapshot(opts, config_host)?;
    EnvironmentResolver::with_host(resolver_host).customize(&snapshot, &snapshot, &mut env);
    Ok(env.select(&MANAGED_VARIABLES))
}

/// Load and validate a config file, returning its advisory warnings.
///
/// Without `path`, `mte.toml` in the current directory is used. Relative
/// paths are checked against the config file's directory, as `mte env`
/// resolves them.
pub fn validate<H: HostEnvironment>(path: Option<&Path>, host: H) -> Result<Vec<ConfigWarning>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()
            .context("read current directory")?
            .join(DEFAULT_CONFIG_FILE),
    };
    let config: TermEnvConfig = load_config_with(Some(path.as_path()), &host)
        .with_context(|| format!("load config '{}'", path.display()))?;

    let base_dir = path.parent().unwrap_or(Path::new(""));
    match validate_config_in(&config, base_dir) {
        Ok(warnings) => {
            info!(target: "mte.config", warnings = warnings.len(), "config is valid");
            Ok(warnings)
        }
        Err(ConfigError::ValidationError { reasons }) => {
            anyhow::bail!("invalid config '{}': {}", path.display(), reasons.join("; "))
        }
        Err(e) => Err(e.into()),
    }
}

/// The `log_level` of the config `mte env`/`mte validate` would load.
///
/// Errors are ignored here; the command itself reports them.
pub fn configured_log_level<H: HostEnvironment>(opts: &EnvOptions, host: H) -> Option<String> {
    let path = opts.config_path().ok()??;
    load_config_with(Some(path.as_path()), &host).ok()?.log_level
}
