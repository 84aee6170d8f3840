// SPDX-License-Identifier: MIT OR Apache-2.0
//! The environment resolver.

use std::path::Path;

use tracing::debug;

use crate::args::{absolute, local_repository_opt, maven_args};
use crate::env::{
    ARG_SEPARATOR, EnvironmentMap, HostEnvironment, JAVA_HOME, MAVEN_ARGS, MAVEN_HOME,
    MAVEN_OPTS, PATH, PATH_SEPARATOR, ProcessEnvironment,
};
use crate::model::{JavaSdkInfo, MavenConfig, MavenHomeType};
use crate::provider::{MavenHomeResolver, MavenSettingsProvider, SdkProvider};

/// Name of the project-local Maven wrapper launcher.
pub const WRAPPER_LAUNCHER: &str = "mvnw";

/// Name of the Maven launcher inside an installation's `bin` directory.
pub const MAVEN_LAUNCHER: &str = "mvn";

/// Writes `JAVA_HOME`, `PATH`, `MAVEN_HOME`, `MAVEN_OPTS` and `MAVEN_ARGS`
/// into an [`EnvironmentMap`].
///
/// Every step that lacks a usable input is skipped; nothing here fails.
/// Running the resolver twice over its own output prepends `PATH` entries a
/// second time.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentResolver<H = ProcessEnvironment> {
    host: H,
}

impl EnvironmentResolver<ProcessEnvironment> {
    /// A resolver that reads through to the real process environment.
    pub fn new() -> Self {
        Self {
            host: ProcessEnvironment,
        }
    }
}

impl<H: HostEnvironment> EnvironmentResolver<H> {
    /// A resolver that reads through to `host` instead of the process
    /// environment.
    pub fn with_host(host: H) -> Self {
        Self { host }
    }

    /// Apply both the Java and the Maven steps using the given providers.
    ///
    /// The Maven step is skipped when `maven` reports no root project.
    pub fn customize<S, M>(&self, sdk: &S, maven: &M, env: &mut EnvironmentMap)
    where
        S: SdkProvider + ?Sized,
        M: MavenSettingsProvider,
    {
        self.resolve_java_environment(sdk.java_sdk().as_ref(), env);

        match maven.root_config() {
            Some(config) => self.resolve_maven_environment(&config, maven, env),
            None => debug!(target: "mte.maven", "no root maven project, skipping"),
        }
    }

    /// Set `JAVA_HOME` and put the SDK's `bin` in front of `PATH`.
    pub fn resolve_java_environment(&self, sdk: Option<&JavaSdkInfo>, env: &mut EnvironmentMap) {
        let Some(sdk) = sdk else {
            debug!(target: "mte.java", "no project sdk");
            return;
        };
        if !sdk.home.is_dir() {
            debug!(target: "mte.java", home = %sdk.home.display(), "sdk home is not a directory");
            return;
        }

        let home = absolute(&sdk.home);
        env.insert(JAVA_HOME, home.display().to_string());
        debug!(target: "mte.java", var = JAVA_HOME, value = %home.display(), "set");

        let bin = home.join("bin");
        if !bin.is_dir() {
            debug!(target: "mte.java", bin = %bin.display(), "sdk has no bin directory");
            return;
        }
        self.prepend_path(&bin, env);
    }

    /// Apply the Maven settings of the root project.
    ///
    /// `homes` resolves the identifier of a statically configured
    /// installation.
    pub fn resolve_maven_environment(
        &self,
        config: &MavenConfig,
        homes: &dyn MavenHomeResolver,
        env: &mut EnvironmentMap,
    ) {
        self.resolve_maven_home_and_path(config, homes, env);

        if let Some(opt) = local_repository_opt(config) {
            env.append_value(MAVEN_OPTS, &opt, ARG_SEPARATOR, &self.host);
            debug!(target: "mte.maven", var = MAVEN_OPTS, value = %opt, "appended");
        }

        for arg in maven_args(config) {
            env.append_value(MAVEN_ARGS, &arg, ARG_SEPARATOR, &self.host);
            debug!(target: "mte.maven", var = MAVEN_ARGS, value = %arg, "appended");
        }
    }

    fn resolve_maven_home_and_path(
        &self,
        config: &MavenConfig,
        homes: &dyn MavenHomeResolver,
        env: &mut EnvironmentMap,
    ) {
        if config.uses_wrapper() {
            let dir = &config.project_dir;
            if !dir.is_dir() {
                debug!(target: "mte.maven", dir = %dir.display(), "project directory missing");
                return;
            }
            if !mte_which::launcher_ready(dir, WRAPPER_LAUNCHER) {
                debug!(target: "mte.maven", dir = %dir.display(), "no usable maven wrapper");
                return;
            }
            self.prepend_path(dir, env);
            return;
        }

        let MavenHomeType::StaticResolved(identifier) = &config.home_type else {
            return;
        };
        let Some(home) = homes.resolve_home(identifier) else {
            debug!(target: "mte.maven", identifier = %identifier, "maven home not resolvable");
            return;
        };
        if !home.is_dir() {
            debug!(target: "mte.maven", home = %home.display(), "maven home is not a directory");
            return;
        }

        let home = absolute(&home);
        env.insert(MAVEN_HOME, home.display().to_string());
        debug!(target: "mte.maven", var = MAVEN_HOME, value = %home.display(), "set");

        let bin = home.join("bin");
        if !bin.is_dir() || !mte_which::launcher_ready(&bin, MAVEN_LAUNCHER) {
            debug!(target: "mte.maven", bin = %bin.display(), "no usable mvn launcher");
            return;
        }
        self.prepend_path(&bin, env);
    }

    fn prepend_path(&self, dir: &Path, env: &mut EnvironmentMap) {
        let dir = absolute(dir);
        let entry = dir.display().to_string();
        env.prepend_value(PATH, &entry, PATH_SEPARATOR, &self.host);
        debug!(target: "mte.path", entry = %entry, "prepended to PATH");
    }
}
