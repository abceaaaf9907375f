//! Core plumbing shared by every run
//!
//! - **config**: layered configuration (CLI, env, `matrix.toml`, defaults)
//! - **context**: repository root plus resolved config, built once in main.rs
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: git working-tree discovery

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
