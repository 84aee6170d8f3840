// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rendering of `MAVEN_OPTS` and `MAVEN_ARGS` entries from [`MavenConfig`].

use std::path::{Path, PathBuf};

use crate::model::MavenConfig;

/// The `-Dmaven.repo.local=...` option, when a local repository override is
/// configured.
pub fn local_repository_opt(config: &MavenConfig) -> Option<String> {
    let repo = non_blank_path(config.local_repository.as_deref())?;
    Some(format!("-Dmaven.repo.local={}", absolute(repo).display()))
}

/// Every `MAVEN_ARGS` entry for `config`, in the order they are appended:
/// settings file, `-o`, `-T`, failure mode, checksum policy, `-U`, `-e`,
/// `-N`, and finally `-P`.
pub fn maven_args(config: &MavenConfig) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(settings) = non_blank_path(config.user_settings_file.as_deref()) {
        args.push(format!("-s{}", settings.display()));
    }
    if config.work_offline {
        args.push("-o".to_string());
    }
    if let Some(threads) = non_blank(config.threads.as_deref()) {
        args.push(format!("-T{threads}"));
    }
    if let Some(flag) = non_blank(config.failure_mode_flag.as_deref()) {
        args.push(flag.to_string());
    }
    if let Some(flag) = non_blank(config.checksum_policy_flag.as_deref()) {
        args.push(flag.to_string());
    }
    if config.always_update_snapshots {
        args.push("-U".to_string());
    }
    if config.print_stack_traces {
        args.push("-e".to_string());
    }
    if config.non_recursive {
        args.push("-N".to_string());
    }
    if let Some(profiles) = profiles_arg(&config.enabled_profiles, &config.disabled_profiles) {
        args.push(profiles);
    }

    args
}

/// `-P` argument listing enabled profiles, then disabled ones prefixed with
/// `!`. Blank names are dropped; `None` when nothing is left.
pub fn profiles_arg(enabled: &[String], disabled: &[String]) -> Option<String> {
    let list = enabled
        .iter()
        .filter_map(|p| non_blank(Some(p.as_str())))
        .map(str::to_string)
        .chain(
            disabled
                .iter()
                .filter_map(|p| non_blank(Some(p.as_str())))
                .map(|p| format!("!{p}")),
        )
        .collect::<Vec<_>>();

    if list.is_empty() {
        None
    } else {
        Some(format!("-P{}", list.join(",")))
    }
}

/// `path` made absolute against the current directory, without resolving
/// symlinks. Falls back to `path` itself if the current directory is gone.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn non_blank_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MavenHomeType;

    fn config() -> MavenConfig {
        MavenConfig::new("/repo", MavenHomeType::Wrapper)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_config_renders_nothing() {
        assert!(maven_args(&config()).is_empty());
        assert_eq!(local_repository_opt(&config()), None);
    }

    #[test]
    fn all_flags_render_in_fixed_order() {
        let mut cfg = config();
        cfg.user_settings_file = Some("/home/u/settings.xml".into());
        cfg.work_offline = true;
        cfg.threads = Some("1C".into());
        cfg.failure_mode_flag = Some("-fae".into());
        cfg.checksum_policy_flag = Some("-C".into());
        cfg.always_update_snapshots = true;
        cfg.print_stack_traces = true;
        cfg.non_recursive = true;
        cfg.enabled_profiles = strings(&["it"]);

        assert_eq!(
            maven_args(&cfg),
            strings(&[
                "-s/home/u/settings.xml",
                "-o",
                "-T1C",
                "-fae",
                "-C",
                "-U",
                "-e",
                "-N",
                "-Pit",
            ])
        );
    }

    #[test]
    fn blank_values_are_skipped() {
        let mut cfg = config();
        cfg.user_settings_file = Some(" ".into());
        cfg.threads = Some("".into());
        cfg.failure_mode_flag = Some("  ".into());
        cfg.checksum_policy_flag = Some(String::new());
        cfg.local_repository = Some("".into());
        assert!(maven_args(&cfg).is_empty());
        assert_eq!(local_repository_opt(&cfg), None);
    }

    #[test]
    fn profiles_enabled_then_disabled() {
        let arg = profiles_arg(&strings(&["prod", "fast"]), &strings(&["debug"]));
        assert_eq!(arg.as_deref(), Some("-Pprod,fast,!debug"));
    }

    #[test]
    fn only_disabled_profiles() {
        let arg = profiles_arg(&[], &strings(&["a", "b"]));
        assert_eq!(arg.as_deref(), Some("-P!a,!b"));
    }

    #[test]
    fn no_profiles_gives_none() {
        assert_eq!(profiles_arg(&[], &[]), None);
        assert_eq!(profiles_arg(&strings(&[" "]), &strings(&[""])), None);
    }

    #[test]
    fn local_repository_is_absolute() {
        let mut cfg = config();
        cfg.local_repository = Some("relative/repo".into());
        let opt = local_repository_opt(&cfg).unwrap();
        let path = opt.strip_prefix("-Dmaven.repo.local=").unwrap();
        assert!(Path::new(path).is_absolute());
        assert!(path.ends_with("repo"));
    }
}
