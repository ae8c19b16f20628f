//! Integration tests for `embra clean`
//!
//! Hard clean removes working directories unconditionally; soft clean on
//! targets that were never built succeeds trivially. Neither needs the
//! external build tool installed.

mod common;

use common::{run_embra, stderr_of, TestProject, SAMPLE_MANIFEST};

#[test]
fn test_hard_clean_removes_default_target_dir() {
    let project = TestProject::new();
    project.create_file("embra.toml", SAMPLE_MANIFEST);
    project.create_file(".embra/build/main/bin/CMakeCache.txt", "cache");
    project.create_file(".embra/build/main/CMakeLists.txt", "directives");

    let output = run_embra(&project, &["clean", "--hard"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(!project.exists(".embra/build/main"));
}

#[test]
fn test_hard_clean_missing_dir_succeeds() {
    let project = TestProject::new();
    project.create_file("embra.toml", SAMPLE_MANIFEST);

    let output = run_embra(&project, &["clean", "--hard"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
}

#[test]
fn test_soft_clean_unbuilt_target_succeeds() {
    let project = TestProject::new();
    project.create_file("embra.toml", SAMPLE_MANIFEST);

    let output = run_embra(&project, &["clean"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
}

#[test]
fn test_hard_clean_all_removes_every_target_dir() {
    let project = TestProject::new();
    project.create_file("embra.toml", SAMPLE_MANIFEST);
    project.create_file(".embra/build/main/bin/state", "x");
    project.create_file(".embra/build/host/bin/state", "x");

    let output = run_embra(&project, &["clean", "--all", "--hard"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(!project.exists(".embra/build/main"));
    assert!(!project.exists(".embra/build/host"));
}

#[test]
fn test_hard_clean_only_touches_selected_target() {
    let project = TestProject::new();
    project.create_file("embra.toml", SAMPLE_MANIFEST);
    project.create_file(".embra/build/main/bin/state", "x");
    project.create_file(".embra/build/host/bin/state", "x");

    let output = run_embra(&project, &["clean", "host", "--hard"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(project.exists(".embra/build/main"));
    assert!(!project.exists(".embra/build/host"));
}
