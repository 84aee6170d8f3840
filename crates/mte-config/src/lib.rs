// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project snapshot loading, validation, and merging for maven-term-env.
//!
//! This crate provides [`TermEnvConfig`] (the contents of an `mte.toml`
//! file) together with helpers for loading it, applying `MTE_*`
//! environment overrides, merging overlays, and producing advisory
//! [`ConfigWarning`]s. [`ProjectSnapshot`] adapts a loaded config to the
//! provider traits of `mte-core`.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod snapshot;

pub use snapshot::ProjectSnapshot;

use mte_core::{HostEnvironment, ProcessEnvironment};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent resolution but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A whole section is absent, so its variables will not be set.
    MissingSection {
        /// Name of the missing table.
        section: String,
        /// What the user loses.
        hint: String,
    },
    /// The SDK is not Java-like, so `JAVA_HOME` will not be set.
    NonJavaSdk {
        /// The configured kind.
        kind: SdkKind,
    },
    /// A profile is listed as both enabled and disabled.
    ProfileConflict {
        /// The profile name.
        profile: String,
    },
    /// The user settings file does not exist or is not a regular file.
    SettingsFileMissing {
        /// Configured path.
        path: String,
    },
    /// The project directory does not exist.
    ProjectDirMissing {
        /// Configured path.
        path: String,
    },
    /// `home = "bundled"` without a `bundled_home`.
    BundledHomeUnset,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::MissingSection { section, hint } => {
                write!(f, "missing section '[{section}]': {hint}")
            }
            ConfigWarning::NonJavaSdk { kind } => {
                write!(f, "sdk kind '{kind}' is not a Java SDK; JAVA_HOME will not be set")
            }
            ConfigWarning::ProfileConflict { profile } => {
                write!(f, "profile '{profile}' is both enabled and disabled")
            }
            ConfigWarning::SettingsFileMissing { path } => {
                write!(f, "user settings file '{path}' is not a regular file")
            }
            ConfigWarning::ProjectDirMissing { path } => {
                write!(f, "project directory '{path}' does not exist")
            }
            ConfigWarning::BundledHomeUnset => {
                write!(f, "maven home is 'bundled' but bundled_home is not set")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level contents of an `mte.toml` project snapshot.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct TermEnvConfig {
    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// The project SDK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk: Option<SdkSection>,

    /// Settings of the root Maven project. Absent means the project has no
    /// Maven root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maven: Option<MavenSection>,
}

/// `[sdk]` table.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct SdkSection {
    /// SDK installation directory.
    pub home: String,
    /// SDK flavour; only Java-like kinds produce `JAVA_HOME`.
    #[serde(default)]
    pub kind: SdkKind,
}

/// Flavour of a configured SDK.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SdkKind {
    /// A regular JDK.
    #[default]
    Java,
    /// A JetBrains runtime.
    Jbr,
    /// An Android SDK.
    Android,
    /// Anything else (Python, Node, ...).
    Other,
}

impl SdkKind {
    /// Whether the SDK is a Java runtime.
    pub fn is_java_like(self) -> bool {
        matches!(self, SdkKind::Java | SdkKind::Jbr)
    }
}

impl std::fmt::Display for SdkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SdkKind::Java => "java",
            SdkKind::Jbr => "jbr",
            SdkKind::Android => "android",
            SdkKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// `[maven]` table.
///
/// Booleans are optional so that overlays can leave them unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct MavenSection {
    /// Root project directory, relative to the snapshot's base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<String>,
    /// Always use the project's `mvnw`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_wrapper: Option<bool>,
    /// `wrapper`, `bundled`, `system`, or a Maven installation directory.
    /// Defaults to `system`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    /// Directory that `home = "bundled"` refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundled_home: Option<String>,
    /// Local repository override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<String>,
    /// Alternative user `settings.xml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_settings_file: Option<String>,
    /// `-o`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_offline: Option<bool>,
    /// `-T` argument, e.g. `"4"` or `"1C"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<String>,
    /// How the build reacts to module failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_behavior: Option<FailureBehavior>,
    /// How artifact checksum mismatches are treated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_policy: Option<ChecksumPolicy>,
    /// `-U`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_update_snapshots: Option<bool>,
    /// `-e`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_stack_traces: Option<bool>,
    /// `-N`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_recursive: Option<bool>,
    /// Profiles to activate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled_profiles: Vec<String>,
    /// Profiles to deactivate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_profiles: Vec<String>,
}

/// Maven's reactor failure mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FailureBehavior {
    /// Maven's own default; no flag.
    #[default]
    Default,
    /// `-ff`
    Fast,
    /// `-fae`
    AtEnd,
    /// `-fn`
    Never,
}

impl FailureBehavior {
    /// Command line flag, empty for [`FailureBehavior::Default`].
    pub fn command_line_option(self) -> &'static str {
        match self {
            FailureBehavior::Default => "",
            FailureBehavior::Fast => "-ff",
            FailureBehavior::AtEnd => "-fae",
            FailureBehavior::Never => "-fn",
        }
    }
}

/// Maven's checksum policy.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ChecksumPolicy {
    /// Maven's own default; no flag.
    #[default]
    Default,
    /// `-C`
    Fail,
    /// `-c`
    Warn,
}

impl ChecksumPolicy {
    /// Command line flag, empty for [`ChecksumPolicy::Default`].
    pub fn command_line_option(self) -> &'static str {
        match self {
            ChecksumPolicy::Default => "",
            ChecksumPolicy::Fail => "-C",
            ChecksumPolicy::Warn => "-c",
        }
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// `home` value selecting the project's Maven wrapper.
pub const HOME_WRAPPER: &str = "wrapper";

/// `home` value selecting the installation at `bundled_home`.
pub const HOME_BUNDLED: &str = "bundled";

/// `home` value selecting the installation that owns `mvn` on `PATH`.
pub const HOME_SYSTEM: &str = "system";

/// Default file name looked up in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "mte.toml";

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`TermEnvConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`TermEnvConfig::default()`].
///
/// Overrides from the process environment are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<TermEnvConfig, ConfigError> {
    load_config_with(path, &ProcessEnvironment)
}

/// Like [`load_config`], reading overrides from `host`.
pub fn load_config_with(
    path: Option<&Path>,
    host: &dyn HostEnvironment,
) -> Result<TermEnvConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            debug!(target: "mte.config", path = %p.display(), "loaded config file");
            parse_toml(&content)?
        }
        None => TermEnvConfig::default(),
    };
    apply_env_overrides(&mut config, host);
    Ok(config)
}

/// Parse a TOML string into a [`TermEnvConfig`].
pub fn parse_toml(content: &str) -> Result<TermEnvConfig, ConfigError> {
    toml::from_str::<TermEnvConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `MTE_JAVA_HOME` (a Java SDK home)
/// - `MTE_MAVEN_HOME`
/// - `MTE_MAVEN_PROJECT_DIR`
/// - `MTE_MAVEN_LOCAL_REPOSITORY`
/// - `MTE_MAVEN_OFFLINE` (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`)
/// - `MTE_LOG_LEVEL`
///
/// Setting any `MTE_MAVEN_*` variable creates the `[maven]` table.
pub fn apply_env_overrides(config: &mut TermEnvConfig, host: &dyn HostEnvironment) {
    if let Some(val) = host.var("MTE_JAVA_HOME") {
        debug!(target: "mte.config", var = "MTE_JAVA_HOME", "override");
        config.sdk = Some(SdkSection {
            home: val,
            kind: SdkKind::Java,
        });
    }
    if let Some(val) = host.var("MTE_LOG_LEVEL") {
        config.log_level = Some(val);
    }
    if let Some(val) = host.var("MTE_MAVEN_HOME") {
        debug!(target: "mte.config", var = "MTE_MAVEN_HOME", "override");
        config.maven.get_or_insert_with(Default::default).home = Some(val);
    }
    if let Some(val) = host.var("MTE_MAVEN_PROJECT_DIR") {
        config.maven.get_or_insert_with(Default::default).project_dir = Some(val);
    }
    if let Some(val) = host.var("MTE_MAVEN_LOCAL_REPOSITORY") {
        config
            .maven
            .get_or_insert_with(Default::default)
            .local_repository = Some(val);
    }
    if let Some(val) = host.var("MTE_MAVEN_OFFLINE") {
        match parse_bool(&val) {
            Some(flag) => {
                config.maven.get_or_insert_with(Default::default).work_offline = Some(flag);
            }
            None => debug!(target: "mte.config", value = %val, "ignoring MTE_MAVEN_OFFLINE"),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (bad log level, unusable thread counts, empty profile names)
/// are returned as a [`ConfigError::ValidationError`]; soft issues come back
/// as warnings. Relative paths are checked against the current directory.
pub fn validate_config(config: &TermEnvConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    validate_config_in(config, Path::new(""))
}

/// Like [`validate_config`], checking relative paths against `base_dir`,
/// the directory [`ProjectSnapshot`] anchors them at.
pub fn validate_config_in(
    config: &TermEnvConfig,
    base_dir: &Path,
) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level {
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!("invalid log_level '{level}'"));
        }
    }

    match &config.sdk {
        Some(sdk) => {
            if sdk.home.trim().is_empty() {
                errors.push("sdk: home must not be empty".into());
            }
            if !sdk.kind.is_java_like() {
                warnings.push(ConfigWarning::NonJavaSdk { kind: sdk.kind });
            }
        }
        None => warnings.push(ConfigWarning::MissingSection {
            section: "sdk".into(),
            hint: "JAVA_HOME will not be set".into(),
        }),
    }

    match &config.maven {
        Some(maven) => validate_maven(maven, base_dir, &mut errors, &mut warnings),
        None => warnings.push(ConfigWarning::MissingSection {
            section: "maven".into(),
            hint: "MAVEN_* variables will not be set".into(),
        }),
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

fn validate_maven(
    maven: &MavenSection,
    base_dir: &Path,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ConfigWarning>,
) {
    if let Some(threads) = &maven.threads {
        if let Some(problem) = threads_problem(threads) {
            errors.push(format!("maven: {problem}"));
        }
    }

    for name in maven.enabled_profiles.iter().chain(&maven.disabled_profiles) {
        if name.trim().is_empty() {
            errors.push("maven: profile name must not be empty".into());
        }
    }
    for name in &maven.enabled_profiles {
        if maven.disabled_profiles.contains(name) {
            warnings.push(ConfigWarning::ProfileConflict {
                profile: name.clone(),
            });
        }
    }

    if let Some(dir) = &maven.project_dir {
        if !dir.trim().is_empty() && !base_dir.join(dir.trim()).is_dir() {
            warnings.push(ConfigWarning::ProjectDirMissing { path: dir.clone() });
        }
    }

    if let Some(settings) = &maven.user_settings_file {
        if !settings.trim().is_empty() && !base_dir.join(settings.trim()).is_file() {
            warnings.push(ConfigWarning::SettingsFileMissing {
                path: settings.clone(),
            });
        }
    }

    let bundled_unset = maven.bundled_home.as_deref().is_none_or(|h| h.trim().is_empty());
    if maven.home.as_deref().map(str::trim) == Some(HOME_BUNDLED) && bundled_unset {
        warnings.push(ConfigWarning::BundledHomeUnset);
    }
}

/// Why `threads` cannot be passed to `-T`, if it cannot.
fn threads_problem(threads: &str) -> Option<String> {
    let t = threads.trim();
    if t.is_empty() {
        return Some("threads must not be blank".into());
    }
    let count = t.strip_suffix(['C', 'c']).unwrap_or(t);
    match count.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => None,
        Ok(_) => Some(format!("threads '{t}' must be greater than zero")),
        Err(_) => Some(format!("threads '{t}' is not a count like '4' or '1C'")),
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations.  Values in `overlay` take precedence over `base`.
///
/// `[maven]` tables are merged field by field; profile lists come from the
/// overlay when it lists any.
pub fn merge_configs(base: TermEnvConfig, overlay: TermEnvConfig) -> TermEnvConfig {
    let maven = match (base.maven, overlay.maven) {
        (Some(b), Some(o)) => Some(merge_maven(b, o)),
        (b, o) => o.or(b),
    };
    TermEnvConfig {
        log_level: overlay.log_level.or(base.log_level),
        sdk: overlay.sdk.or(base.sdk),
        maven,
    }
}

fn merge_maven(base: MavenSection, overlay: MavenSection) -> MavenSection {
    fn profiles(base: Vec<String>, overlay: Vec<String>) -> Vec<String> {
        if overlay.is_empty() { base } else { overlay }
    }

    MavenSection {
        project_dir: overlay.project_dir.or(base.project_dir),
        use_wrapper: overlay.use_wrapper.or(base.use_wrapper),
        home: overlay.home.or(base.home),
        bundled_home: overlay.bundled_home.or(base.bundled_home),
        local_repository: overlay.local_repository.or(base.local_repository),
        user_settings_file: overlay.user_settings_file.or(base.user_settings_file),
        work_offline: overlay.work_offline.or(base.work_offline),
        threads: overlay.threads.or(base.threads),
        failure_behavior: overlay.failure_behavior.or(base.failure_behavior),
        checksum_policy: overlay.checksum_policy.or(base.checksum_policy),
        always_update_snapshots: overlay
            .always_update_snapshots
            .or(base.always_update_snapshots),
        print_stack_traces: overlay.print_stack_traces.or(base.print_stack_traces),
        non_recursive: overlay.non_recursive.or(base.non_recursive),
        enabled_profiles: profiles(base.enabled_profiles, overlay.enabled_profiles),
        disabled_profiles: profiles(base.disabled_profiles, overlay.disabled_profiles),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
