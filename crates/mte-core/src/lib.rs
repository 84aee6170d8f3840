// SPDX-License-Identifier: MIT OR Apache-2.0
//! mte-core
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Derives the environment a terminal session needs to run Java and Maven
//! the way a project is configured.
//!
//! The resolver takes plain records ([`JavaSdkInfo`], [`MavenConfig`]) from
//! host adapters implementing [`SdkProvider`] and [`MavenSettingsProvider`],
//! and layers `JAVA_HOME`, `PATH`, `MAVEN_HOME`, `MAVEN_OPTS` and
//! `MAVEN_ARGS` onto an [`EnvironmentMap`]. Variables missing from the map
//! are read through a [`HostEnvironment`], normally the process environment.
//!
//! ```no_run
//! use mte_core::{EnvironmentMap, EnvironmentResolver, JavaSdkInfo};
//!
//! let mut env = EnvironmentMap::from_process();
//! let sdk = JavaSdkInfo::new("/opt/jdk17");
//! EnvironmentResolver::new().resolve_java_environment(Some(&sdk), &mut env);
//! ```

pub mod args;
pub mod env;
pub mod model;
pub mod provider;
pub mod resolver;

pub use env::{
    ARG_SEPARATOR, EnvironmentMap, HostEnvironment, JAVA_HOME, MANAGED_VARIABLES, MAVEN_ARGS,
    MAVEN_HOME, MAVEN_OPTS, MapEnvironment, PATH, PATH_SEPARATOR, ProcessEnvironment, append,
    prepend,
};
pub use model::{JavaSdkInfo, MavenConfig, MavenHomeType};
pub use provider::{MavenHomeResolver, MavenSettingsProvider, PathHomeResolver, SdkProvider};
pub use resolver::{EnvironmentResolver, MAVEN_LAUNCHER, WRAPPER_LAUNCHER};
