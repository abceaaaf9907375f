//! In-memory [`RepoView`] for unit tests

use super::RepoView;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::Path;

#[derive(Debug, Default)]
pub struct MemoryRepo {
  files: BTreeMap<String, String>,
  dirs: BTreeSet<String>,
  unreadable: BTreeSet<String>,
}

impl MemoryRepo {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a file, creating its parent directories
  pub fn file(mut self, path: &str, content: &str) -> Self {
    self.add_parents(path);
    self.files.insert(path.to_string(), content.to_string());
    self
  }

  /// Add an (empty) directory and its parents
  pub fn dir(mut self, path: &str) -> Self {
    self.add_parents(path);
    self.dirs.insert(path.to_string());
    self
  }

  /// Make reads and listings of `path` fail with `PermissionDenied`
  pub fn unreadable(mut self, path: &str) -> Self {
    self.unreadable.insert(path.to_string());
    self
  }

  fn add_parents(&mut self, path: &str) {
    let mut current = String::new();
    let segments: Vec<&str> = path.split('/').collect();
    for segment in &segments[..segments.len().saturating_sub(1)] {
      if !current.is_empty() {
        current.push('/');
      }
      current.push_str(segment);
      self.dirs.insert(current.clone());
    }
  }

  fn normalize(rel: &str) -> &str {
    match rel {
      "." => "",
      _ => rel,
    }
  }

  fn denied(&self, rel: &str) -> io::Result<()> {
    if self.unreadable.contains(rel) {
      return Err(io::Error::new(io::ErrorKind::PermissionDenied, format!("{}: permission denied", rel)));
    }
    Ok(())
  }
}

impl RepoView for MemoryRepo {
  fn root(&self) -> &Path {
    Path::new("/mock/repo")
  }

  fn list_dir(&self, rel: &str) -> io::Result<Vec<String>> {
    self.denied(rel)?;
    if !self.is_dir(rel) {
      return Err(io::Error::new(io::ErrorKind::NotFound, format!("{}: no such directory", rel)));
    }

    let rel = Self::normalize(rel);
    let prefix = if rel.is_empty() { String::new() } else { format!("{}/", rel) };
    let children: BTreeSet<String> = self
      .dirs
      .iter()
      .chain(self.files.keys())
      .filter_map(|path| path.strip_prefix(prefix.as_str()))
      .filter_map(|rest| rest.split('/').next())
      .filter(|name| !name.is_empty())
      .map(str::to_string)
      .collect();
    Ok(children.into_iter().collect())
  }

  fn read_to_string(&self, rel: &str) -> io::Result<String> {
    self.denied(rel)?;
    self
      .files
      .get(rel)
      .cloned()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}: no such file", rel)))
  }

  fn is_dir(&self, rel: &str) -> bool {
    let rel = Self::normalize(rel);
    rel.is_empty() || self.dirs.contains(rel)
  }

  fn is_file(&self, rel: &str) -> bool {
    self.files.contains_key(rel)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_listing_derives_parents() {
    let repo = MemoryRepo::new().file("project/p1/.depends", "x").dir("project/p2");
    assert!(repo.is_dir("project"));
    assert!(repo.is_dir("project/p1"));
    assert_eq!(repo.list_dir("project").unwrap(), vec!["p1", "p2"]);
    assert_eq!(repo.list_dir(".").unwrap(), vec!["project"]);
    assert_eq!(repo.list_dir("project/p1").unwrap(), vec![".depends"]);
  }

  #[test]
  fn test_unreadable_paths() {
    let repo = MemoryRepo::new().file("project/p1/.depends", "x").unreadable("project/p1/.depends");
    assert!(repo.is_file("project/p1/.depends"));
    assert_eq!(
      repo.read_to_string("project/p1/.depends").unwrap_err().kind(),
      io::ErrorKind::PermissionDenied
    );
  }
}
