//! Version control plumbing
//!
//! change-matrix never computes diffs itself; git is only asked where the
//! working tree starts so project paths can be resolved against it.

pub mod system_git;

pub use system_git::SystemGit;
