// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adapter from a loaded [`TermEnvConfig`] to the `mte-core` provider traits.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use mte_core::{
    HostEnvironment, JavaSdkInfo, MAVEN_LAUNCHER, MavenConfig, MavenHomeResolver, MavenHomeType,
    MavenSettingsProvider, PATH, ProcessEnvironment, SdkProvider,
};
use tracing::debug;

use crate::{ConfigError, HOME_BUNDLED, HOME_SYSTEM, HOME_WRAPPER, TermEnvConfig};

/// A project's settings as seen by the resolver.
///
/// Relative paths in the config are taken relative to `base_dir`, normally
/// the directory holding the `mte.toml`. The `system` Maven home is looked
/// up on the host's `PATH`.
#[derive(Debug, Clone)]
pub struct ProjectSnapshot<H = ProcessEnvironment> {
    config: TermEnvConfig,
    base_dir: PathBuf,
    host: H,
}

impl ProjectSnapshot<ProcessEnvironment> {
    /// Snapshot over `config` reading `PATH` from the process environment.
    pub fn new(config: TermEnvConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self::with_host(config, base_dir, ProcessEnvironment)
    }

    /// Load `path` (with `MTE_*` overrides) and anchor it at its parent
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = crate::load_config(Some(path))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::new(config, base_dir))
    }
}

impl<H: HostEnvironment> ProjectSnapshot<H> {
    /// Snapshot over `config` reading host variables from `host`.
    pub fn with_host(config: TermEnvConfig, base_dir: impl Into<PathBuf>, host: H) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            host,
        }
    }

    /// The underlying config.
    pub fn config(&self) -> &TermEnvConfig {
        &self.config
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn anchored(&self, raw: &str) -> Option<PathBuf> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(self.base_dir.join(raw))
    }

    /// Installation owning the first `mvn` on the host `PATH`.
    fn system_home(&self) -> Option<PathBuf> {
        let path = self.host.var(PATH)?;
        let launcher = mte_which::which_in(MAVEN_LAUNCHER, OsStr::new(&path))?;
        let launcher = std::fs::canonicalize(&launcher).unwrap_or(launcher);
        let home = launcher.parent()?.parent()?.to_path_buf();
        debug!(target: "mte.maven", home = %home.display(), "resolved system maven home");
        Some(home)
    }
}

impl<H: HostEnvironment> SdkProvider for ProjectSnapshot<H> {
    fn java_sdk(&self) -> Option<JavaSdkInfo> {
        let sdk = self.config.sdk.as_ref()?;
        if !sdk.kind.is_java_like() {
            debug!(target: "mte.java", kind = %sdk.kind, "sdk is not java-like");
            return None;
        }
        self.anchored(&sdk.home).map(JavaSdkInfo::new)
    }
}

impl<H: HostEnvironment> MavenHomeResolver for ProjectSnapshot<H> {
    fn resolve_home(&self, identifier: &str) -> Option<PathBuf> {
        match identifier.trim() {
            HOME_WRAPPER => None,
            HOME_SYSTEM => self.system_home(),
            HOME_BUNDLED => {
                let bundled = self.config.maven.as_ref()?.bundled_home.as_deref()?;
                self.anchored(bundled)
            }
            other => self.anchored(other),
        }
    }
}

impl<H: HostEnvironment> MavenSettingsProvider for ProjectSnapshot<H> {
    fn root_config(&self) -> Option<MavenConfig> {
        let maven = self.config.maven.as_ref()?;

        let home = maven.home.as_deref().map(str::trim).unwrap_or(HOME_SYSTEM);
        let home_type = if home == HOME_WRAPPER {
            MavenHomeType::Wrapper
        } else {
            MavenHomeType::StaticResolved(home.to_string())
        };
        let project_dir = maven
            .project_dir
            .as_deref()
            .and_then(|d| self.anchored(d))
            .unwrap_or_else(|| self.base_dir.clone());

        let mut config = MavenConfig::new(project_dir, home_type);
        config.use_wrapper = maven.use_wrapper.unwrap_or(false);
        config.local_repository = maven
            .local_repository
            .as_deref()
            .and_then(|p| self.anchored(p));
        config.user_settings_file = maven
            .user_settings_file
            .as_deref()
            .and_then(|p| self.anchored(p));
        config.work_offline = maven.work_offline.unwrap_or(false);
        config.threads = maven.threads.clone();
        config.failure_mode_flag = maven
            .failure_behavior
            .map(|f| f.command_line_option())
            .filter(|flag| !flag.is_empty())
            .map(str::to_string);
        config.checksum_policy_flag = maven
            .checksum_policy
            .map(|c| c.command_line_option())
            .filter(|flag| !flag.is_empty())
            .map(str::to_string);
        config.always_update_snapshots = maven.always_update_snapshots.unwrap_or(false);
        config.print_stack_traces = maven.print_stack_traces.unwrap_or(false);
        config.non_recursive = maven.non_recursive.unwrap_or(false);
        config.enabled_profiles = maven.enabled_profiles.clone();
        config.disabled_profiles = maven.disabled_profiles.clone();
        Some(config)
    }
}
