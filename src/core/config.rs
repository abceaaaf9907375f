//! Run configuration
//!
//! Settings are layered, highest precedence first:
//!
//! 1. CLI flags
//! 2. Environment (`PROJECT_ROOT`, `IGNORE_LIST`), resolved by clap
//! 3. Config file (`matrix.toml`, `.matrix.toml` or `.github/matrix.toml`)
//! 4. Built-in defaults
//!
//! Ignore lists are additive across layers. Everything else is replaced by the
//! higher layer.

use crate::core::error::{ConfigError, MatrixError, MatrixResult};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file names searched in the repository root, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["matrix.toml", ".matrix.toml", ".github/matrix.toml"];

/// Default directory holding projects
pub const DEFAULT_PROJECT_ROOT: &str = "project";

/// Folder always ignored when projects live at the repository root
pub const META_FOLDER: &str = ".github";

/// Where projects live, relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRoot {
  /// Projects are top-level folders of the repository (`PROJECT_ROOT=.`)
  RepoRoot,
  /// Projects are children of this directory (no leading `./`, no trailing `/`)
  Dir(String),
}

impl ProjectRoot {
  /// Parse and normalise a user-supplied project root
  pub fn parse(value: &str) -> MatrixResult<Self> {
    let trimmed = value.trim();
    let invalid = |reason: &str| {
      MatrixError::Config(ConfigError::InvalidProjectRoot {
        value: value.to_string(),
        reason: reason.to_string(),
      })
    };

    if trimmed.starts_with('/') || Path::new(trimmed).is_absolute() {
      return Err(invalid("must be relative to the repository root"));
    }

    let mut normalized = trimmed.trim_end_matches('/');
    while let Some(rest) = normalized.strip_prefix("./") {
      normalized = rest;
    }

    if normalized.is_empty() || normalized == "." {
      return Ok(ProjectRoot::RepoRoot);
    }

    if normalized.split('/').any(|segment| segment == "..") {
      return Err(invalid("must not leave the repository"));
    }
    if normalized.split('/').any(|segment| segment.is_empty()) {
      return Err(invalid("contains an empty path segment"));
    }

    Ok(ProjectRoot::Dir(normalized.to_string()))
  }

  /// Repository-relative path of the project root (`.` for the repo root)
  pub fn as_path(&self) -> &str {
    match self {
      ProjectRoot::RepoRoot => ".",
      ProjectRoot::Dir(dir) => dir,
    }
  }

  pub fn is_repo_root(&self) -> bool {
    matches!(self, ProjectRoot::RepoRoot)
  }

  /// Repository-relative path of a project
  pub fn qualify(&self, project: &str) -> String {
    match self {
      ProjectRoot::RepoRoot => project.to_string(),
      ProjectRoot::Dir(dir) => format!("{}/{}", dir, project),
    }
  }

  /// Inverse of [`ProjectRoot::qualify`]. Paths outside the root pass through.
  pub fn strip<'a>(&self, qualified: &'a str) -> &'a str {
    match self {
      ProjectRoot::RepoRoot => qualified,
      ProjectRoot::Dir(dir) => qualified
        .strip_prefix(dir.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(qualified),
    }
  }

  /// Qualified project path a changed file lives in, if any
  ///
  /// `project/p1/src/lib.rs` -> `project/p1` for the default root;
  /// `p1/src/lib.rs` -> `p1` when projects live at the repository root.
  /// `.` and `..` never name a project.
  pub fn direct_candidate(&self, file: &str) -> Option<String> {
    let rest = match self {
      ProjectRoot::RepoRoot => file,
      ProjectRoot::Dir(dir) => file.strip_prefix(dir.as_str())?.strip_prefix('/')?,
    };

    let segment = rest
      .split('/')
      .next()
      .filter(|s| !matches!(*s, "" | "." | ".."))?;
    Some(self.qualify(segment))
  }
}

impl Default for ProjectRoot {
  fn default() -> Self {
    ProjectRoot::Dir(DEFAULT_PROJECT_ROOT.to_string())
  }
}

/// `[matrix]` table of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixSection {
  /// Directory holding projects (`.` for the repository root)
  pub project_root: Option<String>,

  /// Project names never emitted
  pub ignore: Vec<String>,

  /// Emit the `{"project": "."}` root item (default: true)
  pub include_root: Option<bool>,

  /// Existence-check dependency-triggered projects too (default: false)
  pub strict_existence: Option<bool>,
}

/// On-disk config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
  pub matrix: MatrixSection,
}

impl FileConfig {
  /// Find a config file in the repository root
  pub fn find_config_path(repo_root: &Path) -> Option<PathBuf> {
    for name in CONFIG_FILE_NAMES {
      let path = repo_root.join(name);
      if path.is_file() {
        debug!(path = %path.display(), "found config file");
        return Some(path);
      }
    }
    debug!(root = %repo_root.display(), "no config file found");
    None
  }

  /// Load a config file from an explicit path
  pub fn load(path: &Path) -> MatrixResult<Self> {
    if !path.is_file() {
      return Err(MatrixError::Config(ConfigError::NotFound {
        path: path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(path).map_err(|e| {
      MatrixError::Config(ConfigError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })?;

    Self::parse(&content).map_err(|e| {
      MatrixError::Config(ConfigError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })
  }

  /// Parse config file contents
  pub fn parse(content: &str) -> MatrixResult<Self> {
    Ok(toml_edit::de::from_str(content)?)
  }

  /// Discover and load, or `None` when the repository has no config file
  pub fn discover(repo_root: &Path) -> MatrixResult<Option<Self>> {
    Self::find_config_path(repo_root).map(|p| Self::load(&p)).transpose()
  }
}

/// Values coming from the command line (and env, via clap)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub project_root: Option<String>,
  pub ignore: Vec<String>,
  pub no_root: bool,
  pub strict_existence: bool,
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfig {
  pub project_root: ProjectRoot,
  pub ignore: BTreeSet<String>,
  pub include_root: bool,
  pub strict_existence: bool,
}

impl Default for MatrixConfig {
  fn default() -> Self {
    Self {
      project_root: ProjectRoot::default(),
      ignore: BTreeSet::new(),
      include_root: true,
      strict_existence: false,
    }
  }
}

impl MatrixConfig {
  /// Merge CLI/env overrides over an optional config file
  pub fn resolve(file: Option<FileConfig>, overrides: &ConfigOverrides) -> MatrixResult<Self> {
    let section = file.map(|f| f.matrix).unwrap_or_default();

    let raw_root = overrides
      .project_root
      .as_deref()
      .filter(|s| !s.trim().is_empty())
      .or(section.project_root.as_deref().filter(|s| !s.trim().is_empty()))
      .unwrap_or(DEFAULT_PROJECT_ROOT);
    let project_root = ProjectRoot::parse(raw_root)?;

    let ignore = section
      .ignore
      .iter()
      .chain(overrides.ignore.iter())
      .flat_map(|entry| entry.split_whitespace())
      .map(str::to_string)
      .collect();

    Ok(Self {
      project_root,
      ignore,
      include_root: !overrides.no_root && section.include_root.unwrap_or(true),
      strict_existence: overrides.strict_existence || section.strict_existence.unwrap_or(false),
    })
  }

  /// Ignore set in effect, including the implicit meta folder
  pub fn ignore_set(&self) -> BTreeSet<String> {
    let mut set = self.ignore.clone();
    if self.project_root.is_repo_root() {
      set.insert(META_FOLDER.to_string());
    }
    set
  }
}
