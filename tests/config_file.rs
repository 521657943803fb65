// tests/config_file.rs

mod common;
use crate::common::builders::ConfigBuilder;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use changed_paths::config::{load_and_validate, load_from_path, RawConfig};
use changed_paths::errors::ChangedPathsError;

type TestResult = Result<(), Box<dyn Error>>;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn demo_config_loads_in_declaration_order() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(Some(demo("clusters.toml").as_path()), RawConfig::default())?;

    assert_eq!(cfg.paths().len(), 1);
    assert!(cfg.paths_fallback().is_match(".github/workflows/ci.yaml"));
    let names: Vec<_> = cfg.outputs().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["kustomization", "cluster"]);
    Ok(())
}

#[test]
fn cli_inputs_override_file_lists() -> TestResult {
    init_tracing();

    let inputs = ConfigBuilder::new()
        .with_output("only", "clusters/:cluster/only.yaml")
        .raw();
    let cfg = load_and_validate(Some(demo("clusters.toml").as_path()), inputs)?;

    // paths come from the file, outputs from the CLI.
    assert!(cfg.paths().is_match("clusters/a/b/c.yaml"));
    assert_eq!(cfg.outputs().len(), 1);
    assert_eq!(cfg.outputs()[0].name, "only");
    Ok(())
}

#[test]
fn inputs_alone_are_enough() -> TestResult {
    let inputs = ConfigBuilder::new()
        .with_path("apps/:app/**")
        .with_output("app", "apps/:app")
        .raw();
    let cfg = load_and_validate(None, inputs)?;
    assert!(cfg.paths_fallback().is_empty());
    Ok(())
}

#[test]
fn malformed_output_line_is_config_error() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
paths = ["clusters/:cluster/**"]
outputs = ["missing-separator"]
"#
    )?;

    match load_and_validate(Some(file.path()), RawConfig::default()) {
        Err(ChangedPathsError::ConfigError(msg)) => {
            assert!(msg.contains("NAME=PATTERN"));
            assert!(msg.contains("missing-separator"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    Ok(())
}

#[test]
fn unknown_key_is_toml_error() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "paths = [\"a\"]\npath = [\"b\"]\n")?;

    assert!(matches!(
        load_from_path(file.path()),
        Err(ChangedPathsError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        load_from_path("/definitely/not/here.toml"),
        Err(ChangedPathsError::IoError(_))
    ));
}
