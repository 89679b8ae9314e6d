use super::*;

#[test]
fn defaults_are_sane() {
    let config = Config::default();
    assert_eq!(config.std, "c++14");
    assert_eq!(config.line_width, DEFAULT_LINE_WIDTH);
    assert!(config.include_dirs.is_empty());
    assert_eq!(config.sysroot, std::path::PathBuf::from("/"));
}

#[test]
fn patch_overrides_only_given_fields() {
    let patch: ConfigPatch =
        toml::from_str("std = \"c++17\"\ninclude-dirs = [\"/tmp\"]").expect("valid patch");
    let mut config = Config::default();
    config.apply_patch(patch);
    config.normalize();
    assert_eq!(config.std, "c++17");
    assert_eq!(config.include_dirs, vec![std::path::PathBuf::from("/tmp")]);
    // Untouched fields keep their defaults.
    assert_eq!(config.line_width, DEFAULT_LINE_WIDTH);
}

#[test]
fn normalize_restores_empty_std() {
    let mut config = Config::default();
    config.std = "  ".to_string();
    config.line_width = 0;
    config.normalize();
    assert_eq!(config.std, "c++14");
    assert_eq!(config.line_width, 1);
}

#[test]
fn validate_accepts_existing_dirs() {
    let mut config = Config::default();
    config.include_dirs = vec![std::env::temp_dir()];
    assert!(config.validate().is_ok());
}

#[test]
fn validate_reports_all_missing_dirs() {
    let mut config = Config::default();
    config.system_include_dirs = vec!["/nonexistent/sys".into()];
    config.include_dirs = vec!["/nonexistent/user".into()];
    let error = config.validate().expect_err("missing dirs must fail");
    match &error {
        ConfigError::IncludeDirsNotFound(missing) => {
            assert_eq!(missing.len(), 2);
            assert!(!missing[0].user_provided);
            assert!(missing[1].user_provided);
        }
        other => panic!("unexpected error: {other}"),
    }
    let rendered = error.to_string();
    assert!(rendered.contains("(user provided)"));
    assert!(rendered.contains("(system)"));
}

#[test]
fn clang_args_carry_standard_and_includes() {
    let mut config = Config::default();
    config.include_dirs = vec!["/opt/inc".into()];
    let args = config.clang_args();
    assert!(args.contains(&"--std=c++14".to_string()));
    assert!(args.contains(&"-I/opt/inc".to_string()));
    assert_eq!(args[0], "-x");
    assert_eq!(args[1], "c++");
}
