//! Project selection
//!
//! Reconciles the two ways a project becomes affected:
//!
//! 1. **Direct**: a changed file lives inside the project folder
//! 2. **Dependency**: a changed file matches one of the project's `.depends` globs
//!
//! Direct candidates are only kept when the folder still exists (deleting a
//! project shows up as changed files under a folder that is gone). Dependency
//! candidates come from a `.depends` file that was just read from disk, so
//! they skip that check unless strict existence is configured. Ignored projects
//! are dropped last, whatever made them a candidate.

use super::depends;
use crate::core::config::MatrixConfig;
use crate::repo::RepoView;
use std::collections::BTreeMap;
use tracing::debug;

/// Why a project became a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
  Direct,
  Dependency,
}

/// Outcome of [`select`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  /// Bare project identifiers, sorted, no duplicates
  pub projects: Vec<String>,

  /// Candidates found through changed paths
  pub direct: usize,

  /// Candidates found through `.depends` globs
  pub dependency: usize,

  /// Candidates dropped because their folder does not exist
  pub missing: usize,

  /// Candidates dropped by the ignore set
  pub ignored: usize,
}

/// Affected projects for a set of changed files
pub fn select(repo: &dyn RepoView, changed_files: &[String], config: &MatrixConfig) -> Selection {
  let root = &config.project_root;
  let mut selection = Selection::default();

  // Keyed by repository-relative path
  let mut candidates: BTreeMap<String, Origin> = BTreeMap::new();

  for file in changed_files {
    if let Some(qualified) = root.direct_candidate(file) {
      candidates.entry(qualified).or_insert(Origin::Direct);
    }
  }
  selection.direct = candidates.len();

  let declaring = depends::discover(repo, root);
  let triggered = depends::evaluate(repo, root, changed_files, &declaring);
  selection.dependency = triggered.len();
  for project in triggered {
    candidates.insert(root.qualify(&project), Origin::Dependency);
  }

  let ignore = config.ignore_set();

  for (qualified, origin) in candidates {
    let must_exist = origin == Origin::Direct || config.strict_existence;
    if must_exist && !repo.is_dir(&qualified) {
      debug!(path = %qualified, ?origin, "dropping candidate without a directory");
      selection.missing += 1;
      continue;
    }

    let bare = root.strip(&qualified);
    if ignore.contains(bare) || ignore.contains(&qualified) {
      debug!(project = bare, "dropping ignored project");
      selection.ignored += 1;
      continue;
    }

    selection.projects.push(bare.to_string());
  }

  selection
}
