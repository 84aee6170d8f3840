// SPDX-License-Identifier: MIT OR Apache-2.0
//! Microcrate for PATH lookup and launcher-script checks.
#![deny(unsafe_code)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Locate an executable by name in a PATH-style list, similarly to shell
/// `which`.
///
/// If `bin` contains path separators, it is treated as a direct path.
pub fn which_in(bin: &str, path: &OsStr) -> Option<PathBuf> {
    let candidate = Path::new(bin);
    if has_path(candidate) {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    std::env::split_paths(path).find_map(|dir| resolve_in_dir(&dir, bin))
}

/// File name of the launcher script for `name` on the current platform.
///
/// Windows launchers are batch files (`mvn.cmd`, `mvnw.cmd`); elsewhere the
/// bare name is used.
pub fn launcher_file_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.cmd")
    } else {
        name.to_string()
    }
}

/// Decide whether `dir` holds a launchable script called `name`.
///
/// On Windows only existence of `<name>.cmd` is checked. Elsewhere the file
/// must carry the owner execute bit; a missing bit is added on a best-effort
/// basis and a failed fix simply yields `false`.
pub fn launcher_ready(dir: &Path, name: &str) -> bool {
    let launcher = dir.join(launcher_file_name(name));
    if cfg!(windows) {
        return launcher.exists();
    }
    ensure_executable(&launcher)
}

fn has_path(candidate: &Path) -> bool {
    candidate.components().count() > 1
}

fn resolve_in_dir(dir: &Path, command: &str) -> Option<PathBuf> {
    let direct = dir.join(command);
    if direct.is_file() {
        return Some(direct);
    }

    if !cfg!(windows) {
        return None;
    }

    ["", ".exe", ".cmd", ".bat", ".com"]
        .into_iter()
        .map(|ext| dir.join(format!("{command}{ext}")))
        .find(|candidate| candidate.is_file())
}

#[cfg(unix)]
fn ensure_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let Ok(meta) = std::fs::metadata(path) else {
        debug!(target: "mte.launcher", path = %path.display(), "launcher not found");
        return false;
    };
    if !meta.is_file() {
        debug!(target: "mte.launcher", path = %path.display(), "launcher is not a regular file");
        return false;
    }

    // Only the owner bit counts. Ownership is not checked, so a file owned
    // by another user with `u+x` set still passes.
    let mut perms = meta.permissions();
    let mode = perms.mode();
    if mode & 0o100 != 0 {
        return true;
    }

    perms.set_mode(mode | 0o100);
    match std::fs::set_permissions(path, perms) {
        Ok(()) => {
            debug!(target: "mte.launcher", path = %path.display(), "marked launcher executable");
            true
        }
        Err(err) => {
            warn!(
                target: "mte.launcher",
                path = %path.display(),
                error = %err,
                "could not mark launcher executable"
            );
            false
        }
    }
}

#[cfg(not(unix))]
fn ensure_executable(path: &Path) -> bool {
    path.is_file()
}
