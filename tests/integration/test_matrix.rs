//! Integration tests for matrix generation

use crate::helpers::{TestRepo, projects, run_matrix, run_matrix_raw};
use anyhow::Result;
use serde_json::json;

#[test]
fn test_empty_input_is_root_only() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;

  let matrix = run_matrix(&repo.path, &[], &[], "")?;
  assert_eq!(matrix, json!({"include": [{"project": "."}]}));

  let matrix = run_matrix(&repo.path, &[], &[], "\n  \n")?;
  assert_eq!(matrix, json!({"include": [{"project": "."}]}));

  Ok(())
}

#[test]
fn test_exact_output_line() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_matrix_raw(&repo.path, &[], &[], "")?;
  assert!(output.status.success());
  assert_eq!(String::from_utf8(output.stdout)?, "{\"include\":[{\"project\":\".\"}]}\n");

  Ok(())
}

#[test]
fn test_direct_projects() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;
  repo.add_project("p2")?;
  repo.add_project("p3")?;

  let matrix = run_matrix(&repo.path, &[], &[], "project/p1/f.js\nproject/p2/f.js\nproject/p1/g.js\n")?;
  assert_eq!(projects(&matrix), vec![".", "p1", "p2"]);

  Ok(())
}

#[test]
fn test_dependency_triggered_project() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;
  repo.add_project("shared")?;
  repo.depends("project/p1", &["project/shared/**"])?;

  let matrix = run_matrix(&repo.path, &[], &[], "project/shared/util.js\n")?;
  let ids = projects(&matrix);
  assert!(ids.contains(&"p1".to_string()), "p1 should be triggered: {:?}", ids);
  assert!(ids.contains(&"shared".to_string()));

  Ok(())
}

#[test]
fn test_ignore_list_env() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;
  repo.add_project("p2")?;

  let matrix = run_matrix(
    &repo.path,
    &[],
    &[("IGNORE_LIST", "p1")],
    "project/p1/f.js\nproject/p2/f.js\n",
  )?;
  assert_eq!(projects(&matrix), vec![".", "p2"]);

  Ok(())
}

#[test]
fn test_ignore_flag_overrides_env() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;
  repo.add_project("p2")?;

  let matrix = run_matrix(
    &repo.path,
    &["--ignore", "p2"],
    &[("IGNORE_LIST", "p1")],
    "project/p1/f.js\nproject/p2/f.js\n",
  )?;
  assert_eq!(projects(&matrix), vec![".", "p1"]);

  Ok(())
}

#[test]
fn test_deleted_project_is_dropped() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;

  let matrix = run_matrix(&repo.path, &[], &[], "project/gone/f.js\nproject/p1/f.js\n")?;
  assert_eq!(projects(&matrix), vec![".", "p1"]);

  Ok(())
}

#[test]
fn test_missing_project_root_is_root_only() -> Result<()> {
  let repo = TestRepo::new()?;

  let matrix = run_matrix(
    &repo.path,
    &[],
    &[("PROJECT_ROOT", "services")],
    "services/api/main.rs\n",
  )?;
  assert_eq!(matrix, json!({"include": [{"project": "."}]}));

  Ok(())
}

#[test]
fn test_projects_at_repo_root() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_dir("web")?;
  repo.add_dir("api")?;
  repo.add_dir(".github/workflows")?;

  let matrix = run_matrix(
    &repo.path,
    &[],
    &[("PROJECT_ROOT", ".")],
    ".github/workflows/ci.yml\nweb/index.ts\nREADME.md\napi/main.rs\n",
  )?;
  assert_eq!(projects(&matrix), vec![".", "api", "web"]);

  Ok(())
}

#[test]
fn test_custom_project_root_flag() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_dir("custom/project1")?;

  let matrix = run_matrix(
    &repo.path,
    &["--project-root", "custom"],
    &[("PROJECT_ROOT", "ignored-by-flag")],
    "custom/project1/file.js\n",
  )?;
  assert_eq!(projects(&matrix), vec![".", "project1"]);

  Ok(())
}

#[test]
fn test_no_root_flag() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;

  let matrix = run_matrix(&repo.path, &["--no-root"], &[], "project/p1/f.js\n")?;
  assert_eq!(matrix, json!({"include": [{"project": "p1"}]}));

  let matrix = run_matrix(&repo.path, &["--no-root"], &[], "")?;
  assert_eq!(matrix, json!({"include": []}));

  Ok(())
}

#[test]
fn test_runs_from_subdirectory() -> Result<()> {
  let repo = TestRepo::new()?;
  let p1 = repo.add_project("p1")?;

  let matrix = run_matrix(&p1, &[], &[], "project/p1/f.js\n")?;
  assert_eq!(projects(&matrix), vec![".", "p1"]);

  Ok(())
}

#[test]
fn test_odd_patterns_do_not_block_others() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;
  repo.add_project("p2")?;
  repo.depends("project/p1", &["", "docs/(weird[", "project/shared/**"])?;
  repo.depends("project/p2", &["project/shared/*.js"])?;

  let matrix = run_matrix(&repo.path, &[], &[], "project/shared/util.js\n")?;
  assert_eq!(projects(&matrix), vec![".", "p1", "p2"]);

  Ok(())
}

#[test]
fn test_pretty_output() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_project("p1")?;

  let output = run_matrix_raw(&repo.path, &["--pretty"], &[], "project/p1/f.js\n")?;
  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout)?;
  assert!(stdout.lines().count() > 1);

  let matrix: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(projects(&matrix), vec![".", "p1"]);

  Ok(())
}

#[test]
fn test_outside_git_fails_without_json() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_matrix_raw(dir.path(), &[], &[("GIT_CEILING_DIRECTORIES", "/")], "project/p1/f.js\n")?;
  if output.status.success() {
    // Tempdir lives inside some enclosing checkout; nothing to assert
    return Ok(());
  }

  assert!(output.stdout.is_empty(), "no partial JSON on failure");
  assert!(!output.stderr.is_empty());

  Ok(())
}

#[test]
fn test_repo_root_flag_skips_git() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  std::fs::create_dir_all(dir.path().join("project/p1"))?;

  let root = dir.path().to_string_lossy().to_string();
  let matrix = run_matrix(dir.path(), &["--repo-root", &root], &[], "project/p1/f.js\n")?;
  assert_eq!(projects(&matrix), vec![".", "p1"]);

  Ok(())
}
