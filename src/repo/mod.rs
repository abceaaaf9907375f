//! Read-only view of the repository working tree
//!
//! Selection logic only ever touches the filesystem through [`RepoView`], so
//! it can run against [`FsRepo`] in production and an in-memory tree in tests.
//! All paths are repository-relative and `/`-separated; `.` is the root.

#[cfg(test)]
pub mod memory;

use std::io;
use std::path::{Path, PathBuf};

pub trait RepoView {
  /// Absolute root of the working tree
  fn root(&self) -> &Path;

  /// Names of the immediate children of a directory
  fn list_dir(&self, rel: &str) -> io::Result<Vec<String>>;

  fn read_to_string(&self, rel: &str) -> io::Result<String>;

  fn is_dir(&self, rel: &str) -> bool;

  fn is_file(&self, rel: &str) -> bool;
}

/// Filesystem-backed [`RepoView`]
#[derive(Debug, Clone)]
pub struct FsRepo {
  root: PathBuf,
}

impl FsRepo {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn abs(&self, rel: &str) -> PathBuf {
    match rel {
      "" | "." => self.root.clone(),
      _ => self.root.join(rel),
    }
  }
}

impl RepoView for FsRepo {
  fn root(&self) -> &Path {
    &self.root
  }

  fn list_dir(&self, rel: &str) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(self.abs(rel))? {
      let entry = entry?;
      names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
  }

  fn read_to_string(&self, rel: &str) -> io::Result<String> {
    std::fs::read_to_string(self.abs(rel))
  }

  fn is_dir(&self, rel: &str) -> bool {
    self.abs(rel).is_dir()
  }

  fn is_file(&self, rel: &str) -> bool {
    self.abs(rel).is_file()
  }
}
