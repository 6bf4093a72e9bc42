//! Integration tests exercising the `relprep` binary end to end.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn relprep() -> Command {
  Command::cargo_bin("relprep").unwrap()
}

fn seed_minimal_tree(root: &Path) {
  fs::create_dir_all(root.join("cpp")).unwrap();
  fs::create_dir_all(root.join("proto")).unwrap();
  fs::write(
    root.join("cpp/widget.cc"),
    "#include \"location/nearby/cpp/widget.h\"\nint widget;\n",
  )
  .unwrap();
  fs::write(root.join("proto/widget.proto"), "option java_package = \"com.example\";\n").unwrap();
  fs::write(root.join("cpp/METADATA"), "owner: someone\n").unwrap();
}

#[test]
fn test_missing_destination_fails() {
  relprep()
    .assert()
    .failure()
    .stderr(predicate::str::contains("Missing required argument: <DEST>"));
}

#[test]
fn test_source_with_multiple_destinations_fails() {
  let temp = TempDir::new().unwrap();
  relprep()
    .arg("--source")
    .arg(temp.path())
    .arg("a")
    .arg("b")
    .assert()
    .failure()
    .stderr(predicate::str::contains("single destination"));
}

#[test]
fn test_skip_copy_transforms_in_place() {
  let temp = TempDir::new().unwrap();
  seed_minimal_tree(temp.path());

  relprep()
    .arg("--skip-copy")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Preparing release tree:"))
    .stdout(predicate::str::contains("2 files modified"));

  let cc = fs::read_to_string(temp.path().join("cpp/widget.cc")).unwrap();
  assert!(cc.starts_with("// Copyright 2020 Google LLC\n"));
  assert!(cc.contains("#include \"widget.h\"\n"));

  let proto = fs::read_to_string(temp.path().join("proto/widget.proto")).unwrap();
  assert!(proto.contains("option optimize_for = LITE_RUNTIME;\n"));

  assert!(!temp.path().join("cpp/METADATA").exists());
}

#[test]
fn test_copy_step_replaces_destination_subtrees() {
  let source = TempDir::new().unwrap();
  seed_minimal_tree(source.path());

  let dest = TempDir::new().unwrap();
  // A stale file from a previous release must not survive the copy.
  fs::create_dir_all(dest.path().join("cpp")).unwrap();
  fs::write(dest.path().join("cpp/stale.cc"), "int stale;\n").unwrap();

  relprep()
    .arg("--source")
    .arg(source.path())
    .arg(dest.path())
    .assert()
    .success();

  assert!(!dest.path().join("cpp/stale.cc").exists());
  assert!(dest.path().join("cpp/widget.cc").exists());
  assert!(dest.path().join("proto/widget.proto").exists());

  // The source tree is read-only input; it keeps its internal form.
  let source_cc = fs::read_to_string(source.path().join("cpp/widget.cc")).unwrap();
  assert!(source_cc.contains("location/nearby"));
  assert!(source.path().join("cpp/METADATA").exists());
}

#[test]
fn test_quiet_prints_bare_count() {
  let temp = TempDir::new().unwrap();
  seed_minimal_tree(temp.path());

  relprep()
    .arg("--skip-copy")
    .arg("--quiet")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::eq("2\n"));
}

#[test]
fn test_no_headers_skips_stamping() {
  let temp = TempDir::new().unwrap();
  seed_minimal_tree(temp.path());

  relprep()
    .arg("--skip-copy")
    .arg("--no-headers")
    .arg(temp.path())
    .assert()
    .success();

  let cc = fs::read_to_string(temp.path().join("cpp/widget.cc")).unwrap();
  assert!(!cc.contains("Copyright"));
  assert!(cc.contains("#include \"widget.h\"\n"));
}

#[test]
fn test_all_subtrees_reaches_unlisted_directories() {
  let temp = TempDir::new().unwrap();
  fs::create_dir_all(temp.path().join("extras")).unwrap();
  fs::write(temp.path().join("extras/helper.cc"), "int helper;\n").unwrap();

  relprep()
    .arg("--skip-copy")
    .arg("--all-subtrees")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("1 file modified"));

  let helper = fs::read_to_string(temp.path().join("extras/helper.cc")).unwrap();
  assert!(helper.starts_with("// Copyright 2020 Google LLC\n"));
}

#[test]
fn test_no_recurse_stays_at_top_level() {
  let temp = TempDir::new().unwrap();
  fs::create_dir_all(temp.path().join("cpp/deep")).unwrap();
  fs::write(temp.path().join("cpp/deep/nested.cc"), "int nested;\n").unwrap();
  fs::write(temp.path().join("root.cc"), "int root;\n").unwrap();

  relprep()
    .arg("--skip-copy")
    .arg("--no-recurse")
    .arg(temp.path())
    .assert()
    .success();

  assert!(fs::read_to_string(temp.path().join("root.cc")).unwrap().contains("Copyright"));
  assert!(!fs::read_to_string(temp.path().join("cpp/deep/nested.cc")).unwrap().contains("Copyright"));
}

#[test]
fn test_multiple_destinations_sum_modified_counts() {
  let first = TempDir::new().unwrap();
  let second = TempDir::new().unwrap();
  seed_minimal_tree(first.path());
  seed_minimal_tree(second.path());

  relprep()
    .arg("--skip-copy")
    .arg("--quiet")
    .arg(first.path())
    .arg(second.path())
    .assert()
    .success()
    .stdout(predicate::eq("4\n"));
}

#[test]
fn test_config_file_overrides_rules() {
  let temp = TempDir::new().unwrap();
  seed_minimal_tree(temp.path());
  let config_dir = TempDir::new().unwrap();
  let config_path = config_dir.path().join("release.toml");
  fs::write(
    &config_path,
    concat!(
      "[[rules]]\n",
      "search = \"widget\"\n",
      "replace = \"gadget\"\n",
    ),
  )
  .unwrap();

  relprep()
    .arg("--skip-copy")
    .arg("--no-headers")
    .arg("--no-lite-runtime")
    .arg("--config")
    .arg(&config_path)
    .arg(temp.path())
    .assert()
    .success();

  let cc = fs::read_to_string(temp.path().join("cpp/widget.cc")).unwrap();
  assert!(cc.contains("#include \"location/nearby/cpp/gadget.h\"\n"));
  assert!(cc.contains("int gadget;\n"));
}

#[test]
fn test_invalid_config_fails_before_any_mutation() {
  let temp = TempDir::new().unwrap();
  seed_minimal_tree(temp.path());
  fs::write(temp.path().join(".relprep.toml"), "rules = \"not a table\"\n").unwrap();

  relprep().arg("--skip-copy").arg(temp.path()).assert().failure();

  // Nothing was touched.
  let cc = fs::read_to_string(temp.path().join("cpp/widget.cc")).unwrap();
  assert!(cc.contains("location/nearby"));
  assert!(temp.path().join("cpp/METADATA").exists());
}

#[test]
fn test_no_config_ignores_config_file() {
  let temp = TempDir::new().unwrap();
  seed_minimal_tree(temp.path());
  fs::write(temp.path().join(".relprep.toml"), "rules = \"not a table\"\n").unwrap();

  relprep()
    .arg("--skip-copy")
    .arg("--no-config")
    .arg(temp.path())
    .assert()
    .success();
}

#[test]
fn test_version_flag() {
  relprep()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("relprep"));
}
