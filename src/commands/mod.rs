//! CLI commands for change-matrix
//!
//! - **matrix**: read changed files from stdin, print the job matrix
//!
//! Commands accept `&RunContext` to avoid re-resolving the repository.

pub mod matrix;

pub use matrix::run_matrix;
