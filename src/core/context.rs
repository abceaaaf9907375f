//! Run context - build once, pass everywhere
//!
//! Resolves the repository root (git, or `--repo-root`) and the layered
//! configuration a single time in main.rs. Commands take `&RunContext` and
//! never read the environment themselves.

use crate::core::config::{ConfigOverrides, FileConfig, MatrixConfig};
use crate::core::error::{MatrixError, MatrixResult, ResultExt};
use crate::core::vcs::SystemGit;
use crate::repo::FsRepo;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where to look and how to select, for one invocation
#[derive(Debug, Clone)]
pub struct RunContext {
  /// Repository root (absolute path)
  pub root: PathBuf,

  /// Resolved configuration
  pub config: MatrixConfig,
}

impl RunContext {
  /// Build the context from the current directory
  ///
  /// `repo_root` skips git discovery; `config_path` skips config discovery.
  pub fn build(
    cwd: &Path,
    repo_root: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
  ) -> MatrixResult<Self> {
    let root = match repo_root {
      Some(path) => explicit_root(cwd, path)?,
      None => SystemGit::open(cwd)?.work_tree().to_path_buf(),
    };

    let file = match config_path {
      Some(path) => Some(FileConfig::load(&cwd.join(path))?),
      None => FileConfig::discover(&root)?,
    };

    let config = MatrixConfig::resolve(file, overrides)?;
    debug!(root = %root.display(), ?config, "run context ready");

    Ok(Self { root, config })
  }

  /// Filesystem view of the repository
  pub fn repo(&self) -> FsRepo {
    FsRepo::new(&self.root)
  }
}

fn explicit_root(cwd: &Path, path: &Path) -> MatrixResult<PathBuf> {
  let joined = cwd.join(path);
  if !joined.is_dir() {
    return Err(MatrixError::with_help(
      format!("Repository root is not a directory: {}", joined.display()),
      "Pass an existing checkout to --repo-root, or omit it to ask git.",
    ));
  }
  joined
    .canonicalize()
    .with_context(|| format!("Failed to resolve repository root {}", joined.display()))
}
