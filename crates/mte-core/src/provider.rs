// SPDX-License-Identifier: MIT OR Apache-2.0
//! Seams between the resolver and whatever host knows the project settings.

use std::path::PathBuf;

use crate::model::{JavaSdkInfo, MavenConfig};

/// Supplies the project's Java SDK.
pub trait SdkProvider {
    /// The configured SDK, or `None` when there is none or it is not
    /// Java-like.
    fn java_sdk(&self) -> Option<JavaSdkInfo>;
}

/// Turns a static Maven-home identifier into an installation directory.
pub trait MavenHomeResolver {
    /// Directory for `identifier`, or `None` when it cannot be resolved.
    /// The resolver checks existence itself.
    fn resolve_home(&self, identifier: &str) -> Option<PathBuf>;
}

/// Supplies the root Maven project's settings.
pub trait MavenSettingsProvider: MavenHomeResolver {
    /// Settings of the first root project, or `None` when the project has
    /// no Maven root.
    fn root_config(&self) -> Option<MavenConfig>;
}

impl SdkProvider for Option<JavaSdkInfo> {
    fn java_sdk(&self) -> Option<JavaSdkInfo> {
        self.clone()
    }
}

/// Treats every identifier as a filesystem path.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathHomeResolver;

impl MavenHomeResolver for PathHomeResolver {
    fn resolve_home(&self, identifier: &str) -> Option<PathBuf> {
        let identifier = identifier.trim();
        (!identifier.is_empty()).then(|| PathBuf::from(identifier))
    }
}
