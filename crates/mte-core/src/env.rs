// SPDX-License-Identifier: MIT OR Apache-2.0
//! Environment maps, the host environment seam, and the prepend/append helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `JAVA_HOME`
pub const JAVA_HOME: &str = "JAVA_HOME";
/// `PATH`
pub const PATH: &str = "PATH";
/// `MAVEN_HOME`
pub const MAVEN_HOME: &str = "MAVEN_HOME";
/// `MAVEN_OPTS`
pub const MAVEN_OPTS: &str = "MAVEN_OPTS";
/// `MAVEN_ARGS`
pub const MAVEN_ARGS: &str = "MAVEN_ARGS";

/// Every variable the resolver may write, in a stable order.
pub const MANAGED_VARIABLES: [&str; 5] = [JAVA_HOME, PATH, MAVEN_HOME, MAVEN_OPTS, MAVEN_ARGS];

/// Separator between entries of a path list such as `PATH`.
pub const PATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Separator between entries of `MAVEN_OPTS` and `MAVEN_ARGS`.
pub const ARG_SEPARATOR: &str = " ";

// ---------------------------------------------------------------------------
// Host environment
// ---------------------------------------------------------------------------

/// Read-only view of the environment the host process was started with.
///
/// The resolver reads through to it only for variables the
/// [`EnvironmentMap`] has no entry for.
pub trait HostEnvironment {
    /// Value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

impl<T: HostEnvironment + ?Sized> HostEnvironment for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl HostEnvironment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

/// A fixed, map-backed environment.
///
/// Stands in for the process environment in tests and for `--clean` runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: BTreeMap<String, String>,
}

impl MapEnvironment {
    /// An environment with no variables at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl HostEnvironment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Environment map
// ---------------------------------------------------------------------------

/// The environment handed to the spawned shell.
///
/// Keys are unique and iteration order is sorted, so rendering the same map
/// always yields the same output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentMap {
    vars: BTreeMap<String, String>,
}

impl EnvironmentMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    ///
    /// Non UTF-8 names or values are converted lossily.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    /// Value of `name`, if the map has an entry for it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether the map has an entry for `name` (even a blank one).
    pub fn contains_key(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Set `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(name.into(), value.into())
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// `true` when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A copy holding only the listed variables that are present.
    pub fn select(&self, names: &[&str]) -> Self {
        names
            .iter()
            .filter_map(|name| self.vars.get_key_value(*name))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Consume the map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.vars
    }

    /// Store `prepend(value, variable, separator, self, host)` under `variable`.
    pub fn prepend_value(
        &mut self,
        variable: &str,
        value: &str,
        separator: &str,
        host: &dyn HostEnvironment,
    ) {
        let combined = prepend(value, variable, separator, self, host);
        self.insert(variable, combined);
    }

    /// Store `append(value, variable, separator, self, host)` under `variable`.
    pub fn append_value(
        &mut self,
        variable: &str,
        value: &str,
        separator: &str,
        host: &dyn HostEnvironment,
    ) {
        let combined = append(value, variable, separator, self, host);
        self.insert(variable, combined);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for EnvironmentMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.vars
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for EnvironmentMap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `value` placed in front of the current value of `variable`.
///
/// Returns `value` alone when the variable is unset or blank. The host
/// environment is consulted only when `env` has no entry for `variable`.
pub fn prepend(
    value: &str,
    variable: &str,
    separator: &str,
    env: &EnvironmentMap,
    host: &dyn HostEnvironment,
) -> String {
    match existing(variable, env, host) {
        Some(existing) => format!("{value}{separator}{existing}"),
        None => value.to_string(),
    }
}

/// `value` placed after the current value of `variable`.
///
/// Same lookup rules as [`prepend`].
pub fn append(
    value: &str,
    variable: &str,
    separator: &str,
    env: &EnvironmentMap,
    host: &dyn HostEnvironment,
) -> String {
    match existing(variable, env, host) {
        Some(existing) => format!("{existing}{separator}{value}"),
        None => value.to_string(),
    }
}

fn existing(variable: &str, env: &EnvironmentMap, host: &dyn HostEnvironment) -> Option<String> {
    let current = match env.get(variable) {
        Some(v) => Some(v.to_string()),
        None => host.var(variable),
    };
    current.filter(|v| !v.trim().is_empty())
}
