//! Changed files in, CI matrix out
//!
//! ```text
//! changed files ──► depends (.depends globs) ──► selector ──► emitter ──► JSON
//!            └──────────── direct path match ──────┘
//! ```

pub mod depends;
pub mod emitter;
pub mod glob;
pub mod selector;

pub use emitter::Matrix;
pub use selector::select;

use crate::core::config::MatrixConfig;
use crate::repo::RepoView;
use tracing::{debug, info};

/// Full pipeline for one run
///
/// Short-circuits to a root-only matrix when nothing changed or the project
/// root does not exist.
pub fn build_matrix(repo: &dyn RepoView, changed_files: &[String], config: &MatrixConfig) -> Matrix {
  if changed_files.is_empty() {
    debug!("no changed files");
    return Matrix::root_only(config.include_root);
  }

  if !repo.is_dir(config.project_root.as_path()) {
    info!(project_root = config.project_root.as_path(), "project root does not exist");
    return Matrix::root_only(config.include_root);
  }

  let selection = select(repo, changed_files, config);
  info!(
    files = changed_files.len(),
    direct = selection.direct,
    dependency = selection.dependency,
    missing = selection.missing,
    ignored = selection.ignored,
    selected = selection.projects.len(),
    "selected projects"
  );

  emitter::emit(&selection.projects, config.include_root)
}
