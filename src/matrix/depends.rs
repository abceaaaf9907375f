//! Cross-project dependency declarations (`.depends` files)
//!
//! A project opts into being rebuilt for changes outside its own folder by
//! listing globs in `<project>/.depends`, one per line:
//!
//! ```text
//! project/shared/**
//! project/tooling/*.js
//! ```
//!
//! Declarations are flat: a triggered project does not in turn trigger the
//! projects that depend on it.

use super::glob::Glob;
use crate::core::config::ProjectRoot;
use crate::repo::RepoView;
use std::collections::BTreeSet;
use std::io;
use tracing::{debug, warn};

/// Declaration file name inside a project directory
pub const DEPENDS_FILE: &str = ".depends";

/// Patterns declared in a `.depends` file, blank lines dropped
pub fn parse_declaration(content: &str) -> Vec<&str> {
  content.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

/// Projects under `root` that carry a `.depends` file
///
/// A missing or unlistable project root means "no declarations".
pub fn discover(repo: &dyn RepoView, root: &ProjectRoot) -> BTreeSet<String> {
  let entries = match repo.list_dir(root.as_path()) {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(root = root.as_path(), "project root missing, no declarations");
      return BTreeSet::new();
    }
    Err(e) => {
      warn!(root = root.as_path(), error = %e, "could not list project root, ignoring .depends files");
      return BTreeSet::new();
    }
  };

  entries
    .into_iter()
    .filter(|name| repo.is_file(&depends_path(root, name)))
    .collect()
}

/// Declaring projects with at least one pattern matching a changed file
///
/// A declaration that cannot be read is skipped for this run.
pub fn evaluate(
  repo: &dyn RepoView,
  root: &ProjectRoot,
  changed_files: &[String],
  declaring: &BTreeSet<String>,
) -> BTreeSet<String> {
  let mut triggered = BTreeSet::new();

  for project in declaring {
    let path = depends_path(root, project);
    let content = match repo.read_to_string(&path) {
      Ok(content) => content,
      Err(e) => {
        warn!(project = %project, path = %path, error = %e, "skipping unreadable .depends file");
        continue;
      }
    };

    let globs: Vec<Glob> = parse_declaration(&content)
      .into_iter()
      .map(Glob::compile)
      .filter(Glob::is_valid)
      .collect();

    let hit = changed_files
      .iter()
      .find_map(|file| globs.iter().find(|glob| glob.is_match(file)).map(|glob| (file, glob)));

    if let Some((file, glob)) = hit {
      debug!(project = %project, file = %file, pattern = glob.as_str(), "triggered by dependency");
      triggered.insert(project.clone());
    }
  }

  triggered
}

fn depends_path(root: &ProjectRoot, project: &str) -> String {
  format!("{}/{}", root.qualify(project), DEPENDS_FILE)
}
