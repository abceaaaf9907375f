//! Work-item matrix in the shape GitHub Actions' `strategy.matrix` expects
//!
//! ```json
//! {"include":[{"project":"."},{"project":"web"}]}
//! ```

use crate::core::error::MatrixResult;
use serde::Serialize;

/// Identifier of the root work item (the repository-wide job)
pub const ROOT_PROJECT: &str = ".";

/// One matrix entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItem {
  pub project: String,
}

impl WorkItem {
  pub fn root() -> Self {
    Self {
      project: ROOT_PROJECT.to_string(),
    }
  }

  pub fn is_root(&self) -> bool {
    self.project == ROOT_PROJECT
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Matrix {
  pub include: Vec<WorkItem>,
}

impl Matrix {
  /// Matrix with no projects, just the root item when requested
  pub fn root_only(include_root: bool) -> Self {
    emit(&[], include_root)
  }

  /// Number of project items, root excluded
  pub fn project_count(&self) -> usize {
    self.include.iter().filter(|item| !item.is_root()).count()
  }

  /// Single-line JSON, or indented when `pretty`
  pub fn to_json(&self, pretty: bool) -> MatrixResult<String> {
    let json = if pretty {
      serde_json::to_string_pretty(self)?
    } else {
      serde_json::to_string(self)?
    };
    Ok(json)
  }
}

/// Build the matrix, root item first, projects in the order given
pub fn emit(projects: &[String], include_root: bool) -> Matrix {
  let mut include = Vec::with_capacity(projects.len() + usize::from(include_root));
  if include_root {
    include.push(WorkItem::root());
  }
  include.extend(projects.iter().map(|project| WorkItem {
    project: project.clone(),
  }));
  Matrix { include }
}
