// SPDX-License-Identifier: MIT OR Apache-2.0
//! Plain configuration records handed to the resolver by host adapters.

use std::path::PathBuf;

/// The project's Java SDK.
///
/// Adapters only hand one out for Java-like SDK types; the resolver still
/// checks that the home directory exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaSdkInfo {
    /// SDK installation directory.
    pub home: PathBuf,
}

impl JavaSdkInfo {
    /// Record for the SDK installed at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

/// How the Maven installation is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MavenHomeType {
    /// Use the project's `mvnw` wrapper script.
    Wrapper,
    /// A fixed installation, given as a path or a symbolic identifier such
    /// as `bundled`. Turning it into a directory is the host's job.
    StaticResolved(String),
}

/// Snapshot of the root Maven project's settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenConfig {
    /// Force the wrapper policy regardless of [`MavenConfig::home_type`].
    pub use_wrapper: bool,
    /// Root project directory; the wrapper script is looked up here.
    pub project_dir: PathBuf,
    /// Where the Maven installation comes from.
    pub home_type: MavenHomeType,
    /// Replacement for `~/.m2/repository`.
    pub local_repository: Option<PathBuf>,
    /// Alternative `settings.xml`.
    pub user_settings_file: Option<PathBuf>,
    /// `-o`
    pub work_offline: bool,
    /// Thread count argument, e.g. `4` or `1C`.
    pub threads: Option<String>,
    /// Rendered failure-mode flag (`-ff`, `-fae`, `-fn`).
    pub failure_mode_flag: Option<String>,
    /// Rendered checksum-policy flag (`-C`, `-c`).
    pub checksum_policy_flag: Option<String>,
    /// `-U`
    pub always_update_snapshots: bool,
    /// `-e`
    pub print_stack_traces: bool,
    /// `-N`
    pub non_recursive: bool,
    /// Explicitly enabled profiles, in the order they were given.
    pub enabled_profiles: Vec<String>,
    /// Explicitly disabled profiles, in the order they were given.
    pub disabled_profiles: Vec<String>,
}

impl MavenConfig {
    /// Settings for the project rooted at `project_dir` with every option
    /// off.
    pub fn new(project_dir: impl Into<PathBuf>, home_type: MavenHomeType) -> Self {
        Self {
            use_wrapper: false,
            project_dir: project_dir.into(),
            home_type,
            local_repository: None,
            user_settings_file: None,
            work_offline: false,
            threads: None,
            failure_mode_flag: None,
            checksum_policy_flag: None,
            always_update_snapshots: false,
            print_stack_traces: false,
            non_recursive: false,
            enabled_profiles: Vec::new(),
            disabled_profiles: Vec::new(),
        }
    }

    /// Whether the wrapper policy applies.
    pub fn uses_wrapper(&self) -> bool {
        self.use_wrapper || self.home_type == MavenHomeType::Wrapper
    }
}
