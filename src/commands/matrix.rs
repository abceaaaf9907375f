//! `change-matrix` - print the CI matrix for a list of changed files
//!
//! ```text
//! git diff --name-only origin/main... | change-matrix
//! {"include":[{"project":"."},{"project":"web"}]}
//! ```

use crate::core::context::RunContext;
use crate::core::error::{MatrixResult, ResultExt};
use crate::matrix::{self, Matrix};
use crate::repo::RepoView;
use crate::utils::parse_changed_files;
use std::io::Read;
use tracing::debug;

/// Read stdin, print the matrix to stdout
pub fn run_matrix(ctx: &RunContext, pretty: bool) -> MatrixResult<()> {
  let mut input = String::new();
  std::io::stdin()
    .read_to_string(&mut input)
    .context("Failed to read changed files from stdin")?;

  let matrix = matrix_for_input(ctx, &input);
  let json = matrix.to_json(pretty)?;

  // Serialised fully before printing so a failure never leaves partial JSON
  println!("{}", json);
  Ok(())
}

/// Matrix for newline-separated changed paths
pub fn matrix_for_input(ctx: &RunContext, input: &str) -> Matrix {
  let changed_files = parse_changed_files(input);
  let repo = ctx.repo();
  debug!(
    root = %repo.root().display(),
    files = changed_files.len(),
    "computing matrix"
  );

  let matrix = matrix::build_matrix(&repo, &changed_files, &ctx.config);
  debug!(projects = matrix.project_count(), "matrix ready");
  matrix
}
