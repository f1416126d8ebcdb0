//! Fixture tests: each `code/<name>.js` must serialize to exactly
//! `blocks/<name>.blocks`, and the generated code must decompile back to the
//! same workspace.
use bunkai::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn check_fixture(name: &str) {
    let code_path = fixture_dir().join("code").join(format!("{name}.js"));
    let blocks_path = fixture_dir().join("blocks").join(format!("{name}.blocks"));
    let code = fs::read_to_string(&code_path).unwrap();
    let expected = fs::read_to_string(&blocks_path).unwrap();

    let mut workspace = Workspace::new();
    decompile(&mut workspace, &code).unwrap();
    let xml = workspace_to_xml(&workspace);
    assert_eq!(xml, expected, "fixture '{name}' serialized differently");

    let generated = workspace_to_code(&workspace);
    let mut second = Workspace::new();
    decompile(&mut second, &generated).unwrap();
    assert_eq!(
        workspace_to_xml(&second),
        xml,
        "fixture '{name}' diverged through generated code"
    );
}

#[test]
fn test_fixture_simple() {
    check_fixture("simple");
}

#[test]
fn test_fixture_while() {
    check_fixture("while");
}

#[test]
fn test_fixture_forloop() {
    check_fixture("forloop");
}

#[test]
fn test_fixture_ifelse() {
    check_fixture("ifelse");
}

#[test]
fn test_fixture_math() {
    check_fixture("math");
}

#[test]
fn test_fixture_print() {
    check_fixture("print");
}

#[test]
fn test_every_code_fixture_has_blocks() {
    for entry in fs::read_dir(fixture_dir().join("code")).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let blocks = fixture_dir().join("blocks").join(format!("{name}.blocks"));
        assert!(blocks.exists(), "no expected blocks for fixture '{name}'");
    }
}
