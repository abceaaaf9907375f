//! System git backend
//!
//! Shells out to the `git` binary on PATH. One subprocess call per run.

use crate::core::error::{GitError, MatrixError, MatrixResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Handle on a git working tree
#[derive(Debug, Clone)]
pub struct SystemGit {
  /// Working tree root (`git rev-parse --show-toplevel`)
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> MatrixResult<Self> {
    Self::resolve(toplevel_command(path), path)
  }

  fn resolve(mut command: Command, path: &Path) -> MatrixResult<Self> {
    let output = command.output().context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(MatrixError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(MatrixError::Git(GitError::CommandFailed {
        command: "git rev-parse --show-toplevel".to_string(),
        stderr: stderr.trim().to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();
    if work_tree.is_empty() {
      // Bare repositories have no working tree to scan
      return Err(MatrixError::Git(GitError::RepoNotFound {
        path: path.to_path_buf(),
      }));
    }

    debug!(work_tree, "resolved git working tree");

    Ok(Self {
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Root of the working tree
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }
}

fn toplevel_command(path: &Path) -> Command {
  let mut command = Command::new("git");
  command.arg("-C").arg(path).args(["rev-parse", "--show-toplevel"]);
  command
}
