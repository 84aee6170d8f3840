// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tests for `ProjectSnapshot` as a provider to the resolver.

use std::fs;
use std::path::{Path, PathBuf};

use mte_config::{
    ChecksumPolicy, FailureBehavior, MavenSection, ProjectSnapshot, SdkKind, SdkSection,
    TermEnvConfig, parse_toml,
};
use mte_core::{
    EnvironmentMap, EnvironmentResolver, JAVA_HOME, MAVEN_ARGS, MAVEN_HOME, MAVEN_OPTS,
    MapEnvironment, MavenHomeResolver, MavenHomeType, MavenSettingsProvider, PATH, SdkProvider,
};
use mte_which::launcher_file_name;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────

fn snapshot(config: TermEnvConfig, base: &Path) -> ProjectSnapshot<MapEnvironment> {
    ProjectSnapshot::with_host(config, base, MapEnvironment::new())
}

fn maven_only(section: MavenSection) -> TermEnvConfig {
    TermEnvConfig {
        maven: Some(section),
        ..Default::default()
    }
}

fn maven_install(root: &Path, name: &str) -> PathBuf {
    let home = root.join(name);
    let bin = home.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let launcher = bin.join(launcher_file_name("mvn"));
    fs::write(&launcher, "#!/bin/sh\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&launcher, fs::Permissions::from_mode(0o755)).unwrap();
    }
    home
}

// ── sdk ──────────────────────────────────────────────────────────────

#[test]
fn java_sdk_is_reported() {
    let cfg = TermEnvConfig {
        sdk: Some(SdkSection {
            home: "/opt/jdk17".into(),
            kind: SdkKind::Java,
        }),
        ..Default::default()
    };
    let sdk = snapshot(cfg, Path::new("/work")).java_sdk().unwrap();
    assert_eq!(sdk.home, PathBuf::from("/opt/jdk17"));
}

#[test]
fn relative_sdk_home_is_anchored_at_base_dir() {
    let cfg = parse_toml("[sdk]\nhome = \"tools/jdk\"\nkind = \"jbr\"").unwrap();
    let sdk = snapshot(cfg, Path::new("/work")).java_sdk().unwrap();
    assert_eq!(sdk.home, Path::new("/work").join("tools/jdk"));
}

#[test]
fn non_java_sdk_is_not_reported() {
    let cfg = parse_toml("[sdk]\nhome = \"/opt/py\"\nkind = \"other\"").unwrap();
    assert!(snapshot(cfg, Path::new("/work")).java_sdk().is_none());
}

#[test]
fn blank_sdk_home_is_not_reported() {
    let cfg = parse_toml("[sdk]\nhome = \"  \"").unwrap();
    assert!(snapshot(cfg, Path::new("/work")).java_sdk().is_none());
}

// ── root config ──────────────────────────────────────────────────────

#[test]
fn no_maven_table_means_no_root_project() {
    assert!(
        snapshot(TermEnvConfig::default(), Path::new("/work"))
            .root_config()
            .is_none()
    );
}

#[test]
fn empty_maven_table_defaults_to_system_home_at_base_dir() {
    let config = snapshot(maven_only(MavenSection::default()), Path::new("/work"))
        .root_config()
        .unwrap();
    assert_eq!(config.project_dir, PathBuf::from("/work"));
    assert_eq!(
        config.home_type,
        MavenHomeType::StaticResolved("system".into())
    );
    assert!(!config.uses_wrapper());
    assert!(config.failure_mode_flag.is_none());
    assert!(config.checksum_policy_flag.is_none());
}

#[test]
fn wrapper_home_maps_to_wrapper_type() {
    let cfg = maven_only(MavenSection {
        home: Some("wrapper".into()),
        ..Default::default()
    });
    let config = snapshot(cfg, Path::new("/work")).root_config().unwrap();
    assert_eq!(config.home_type, MavenHomeType::Wrapper);
    assert!(config.uses_wrapper());
}

#[test]
fn every_field_is_carried_over() {
    let cfg = maven_only(MavenSection {
        project_dir: Some("app".into()),
        use_wrapper: Some(true),
        home: Some("/opt/maven".into()),
        local_repository: Some("m2".into()),
        user_settings_file: Some("/etc/m2/settings.xml".into()),
        work_offline: Some(true),
        threads: Some("1C".into()),
        failure_behavior: Some(FailureBehavior::Fast),
        checksum_policy: Some(ChecksumPolicy::Fail),
        always_update_snapshots: Some(true),
        print_stack_traces: Some(true),
        non_recursive: Some(true),
        enabled_profiles: vec!["prod".into()],
        disabled_profiles: vec!["debug".into()],
        ..Default::default()
    });
    let config = snapshot(cfg, Path::new("/work")).root_config().unwrap();

    assert_eq!(config.project_dir, Path::new("/work").join("app"));
    assert!(config.use_wrapper);
    assert_eq!(
        config.home_type,
        MavenHomeType::StaticResolved("/opt/maven".into())
    );
    assert_eq!(config.local_repository, Some(Path::new("/work").join("m2")));
    assert_eq!(
        config.user_settings_file,
        Some(PathBuf::from("/etc/m2/settings.xml"))
    );
    assert!(config.work_offline);
    assert_eq!(config.threads.as_deref(), Some("1C"));
    assert_eq!(config.failure_mode_flag.as_deref(), Some("-ff"));
    assert_eq!(config.checksum_policy_flag.as_deref(), Some("-C"));
    assert!(config.always_update_snapshots);
    assert!(config.print_stack_traces);
    assert!(config.non_recursive);
    assert_eq!(config.enabled_profiles, ["prod"]);
    assert_eq!(config.disabled_profiles, ["debug"]);
}

// ── home identifiers ─────────────────────────────────────────────────

#[test]
fn wrapper_identifier_does_not_resolve() {
    let snap = snapshot(maven_only(MavenSection::default()), Path::new("/work"));
    assert!(snap.resolve_home("wrapper").is_none());
}

#[test]
fn bundled_identifier_uses_bundled_home() {
    let cfg = maven_only(MavenSection {
        bundled_home: Some("/opt/ide/maven3".into()),
        ..Default::default()
    });
    let snap = snapshot(cfg, Path::new("/work"));
    assert_eq!(
        snap.resolve_home("bundled"),
        Some(PathBuf::from("/opt/ide/maven3"))
    );
}

#[test]
fn bundled_identifier_without_bundled_home_does_not_resolve() {
    let snap = snapshot(maven_only(MavenSection::default()), Path::new("/work"));
    assert!(snap.resolve_home("bundled").is_none());
}

#[test]
fn literal_identifier_is_a_path() {
    let snap = snapshot(TermEnvConfig::default(), Path::new("/work"));
    assert_eq!(
        snap.resolve_home("/opt/maven"),
        Some(PathBuf::from("/opt/maven"))
    );
    assert_eq!(snap.resolve_home("mvn3"), Some(Path::new("/work").join("mvn3")));
    assert!(snap.resolve_home("   ").is_none());
}

#[test]
fn system_identifier_follows_host_path() {
    let tmp = TempDir::new().unwrap();
    let home = maven_install(tmp.path(), "apache-maven");
    let path = std::env::join_paths([tmp.path().join("empty"), home.join("bin")]).unwrap();
    let host = MapEnvironment::new().with(PATH, path.to_string_lossy());
    let snap = ProjectSnapshot::with_host(TermEnvConfig::default(), tmp.path(), host);

    let resolved = snap.resolve_home("system").unwrap();
    assert_eq!(
        fs::canonicalize(resolved).unwrap(),
        fs::canonicalize(&home).unwrap()
    );
}

#[test]
fn system_identifier_without_mvn_on_path_does_not_resolve() {
    let tmp = TempDir::new().unwrap();
    let host = MapEnvironment::new().with(PATH, tmp.path().to_string_lossy());
    let snap = ProjectSnapshot::with_host(TermEnvConfig::default(), tmp.path(), host);
    assert!(snap.resolve_home("system").is_none());

    let snap = snapshot(TermEnvConfig::default(), tmp.path());
    assert!(snap.resolve_home("system").is_none());
}

// ── end to end ───────────────────────────────────────────────────────

#[test]
fn snapshot_drives_the_resolver() {
    let tmp = TempDir::new().unwrap();
    let jdk = tmp.path().join("jdk");
    fs::create_dir_all(jdk.join("bin")).unwrap();
    let maven = maven_install(tmp.path(), "maven");
    fs::create_dir_all(tmp.path().join("repo")).unwrap();

    let toml = r#"
        [sdk]
        home = "jdk"

        [maven]
        project_dir = "repo"
        home = "maven"
        local_repository = "m2"
        work_offline = true
        threads = "4"
        enabled_profiles = ["ci"]
    "#;
    let snap = snapshot(parse_toml(toml).unwrap(), tmp.path());

    let mut env: EnvironmentMap = [(PATH, "/usr/bin")].into_iter().collect();
    EnvironmentResolver::with_host(MapEnvironment::new()).customize(&snap, &snap, &mut env);

    let jdk = std::path::absolute(&jdk).unwrap();
    let maven = std::path::absolute(&maven).unwrap();
    let m2 = std::path::absolute(tmp.path().join("m2")).unwrap();
    assert_eq!(env.get(JAVA_HOME), Some(jdk.display().to_string().as_str()));
    assert_eq!(env.get(MAVEN_HOME), Some(maven.display().to_string().as_str()));
    let path = env.get(PATH).unwrap();
    let entries: Vec<PathBuf> = std::env::split_paths(path).collect();
    assert_eq!(
        entries,
        [maven.join("bin"), jdk.join("bin"), PathBuf::from("/usr/bin")]
    );
    assert_eq!(
        env.get(MAVEN_OPTS),
        Some(format!("-Dmaven.repo.local={}", m2.display()).as_str())
    );
    assert_eq!(env.get(MAVEN_ARGS), Some("-o -T4 -Pci"));
}
