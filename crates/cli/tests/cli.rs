//! CLI integration tests for the `luastub` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A temp project with a couple of Lua files under `src/`.
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    fs::create_dir_all(src.join("ui")).unwrap();

    fs::write(
        src.join("core.lua"),
        r#"-- Core helpers
function Greet(name)
  print("hi " .. name)
end

local function secret() end

Util = Util or {}
function Util.Clamp(v, lo, hi) end
"#,
    )
    .unwrap();

    fs::write(
        src.join("ui/button.lua"),
        r#"--[[ function Button.Old() end ]]
function Button:Click() end
Button.New = function(label) end
"#,
    )
    .unwrap();

    temp_dir
}

fn luastub() -> Command {
    Command::cargo_bin("luastub").unwrap()
}

#[test]
fn test_writes_stub_file_and_summary() {
    let project = create_test_project();
    let out = project.path().join("out/stubs/api.lua");

    luastub()
        .current_dir(project.path())
        .arg("src")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("with 1 globals, 2 dot-methods, 1 colon-methods."));

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "---@meta\n\
         ---@class Button\nButton = Button\n\
         ---@class Util\nUtil = Util\n\
         function Greet(name) end\n\
         function Button.New(label) end\n\
         function Util.Clamp(v, lo, hi) end\n\
         function Button:Click(...) end\n"
    );
}

#[test]
fn test_missing_out_is_a_usage_error() {
    let project = create_test_project();
    luastub()
        .current_dir(project.path())
        .arg("src")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--out"));
}

#[test]
fn test_missing_inputs_is_a_usage_error() {
    let project = create_test_project();
    luastub()
        .current_dir(project.path())
        .args(["--out", "stubs.lua"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_json_summary() {
    let project = create_test_project();
    let output = luastub()
        .current_dir(project.path())
        .args(["src", "--out", "stubs.lua", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["globals"].as_u64(), Some(1));
    assert_eq!(json["dot_methods"].as_u64(), Some(2));
    assert_eq!(json["colon_methods"].as_u64(), Some(1));
    assert_eq!(json["namespaces"].as_u64(), Some(2));
    assert_eq!(json["files_scanned"].as_u64(), Some(2));
}

#[test]
fn test_single_file_input() {
    let project = create_test_project();
    luastub()
        .current_dir(project.path())
        .args(["src/ui/button.lua", "-o", "button.lua"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with 0 globals, 1 dot-methods, 1 colon-methods."));
}

#[test]
fn test_unwritable_output_fails() {
    let project = create_test_project();
    fs::write(project.path().join("blocker"), "file").unwrap();
    luastub()
        .current_dir(project.path())
        .args(["src", "-o", "blocker/stubs.lua"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not create directory"));
}

#[test]
fn test_explicit_config_is_applied() {
    let project = create_test_project();
    fs::write(project.path().join("luastub.toml"), "skip_dirs = [\"ui\"]\n").unwrap();
    luastub()
        .current_dir(project.path())
        .args(["src", "-o", "stubs.lua", "--config", "luastub.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with 1 globals, 1 dot-methods, 0 colon-methods."));
}

#[test]
fn test_missing_explicit_config_fails() {
    let project = create_test_project();
    luastub()
        .current_dir(project.path())
        .args(["src", "-o", "stubs.lua", "--config", "nope.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_implicit_config_from_working_directory() {
    let project = create_test_project();
    fs::write(project.path().join(".luastub.toml"), "skip_dirs = [\"ui\"]\n").unwrap();
    luastub()
        .current_dir(project.path())
        .args(["src", "-o", "stubs.lua"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 colon-methods."));
}
