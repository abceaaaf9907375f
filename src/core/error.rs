//! Error types for change-matrix with contextual messages and exit codes
//!
//! Only failures that make it impossible to produce any matrix at all surface
//! as a `MatrixError`. Per-project problems (an unreadable `.depends`, a bad
//! glob) are logged where they happen and never reach this type.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for change-matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args)
  User = 1,
  /// System error (git, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for change-matrix
#[derive(Debug)]
pub enum MatrixError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl MatrixError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    MatrixError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    MatrixError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      MatrixError::Message { message, context, help } => MatrixError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      MatrixError::Io(e) => MatrixError::Message {
        message: format!("I/O error: {}", e),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      MatrixError::Config(_) => ExitCode::User,
      MatrixError::Git(_) => ExitCode::System,
      MatrixError::Io(_) => ExitCode::System,
      MatrixError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      MatrixError::Config(e) => e.help_message(),
      MatrixError::Git(e) => e.help_message(),
      MatrixError::Message { help, .. } => help.clone(),
      MatrixError::Io(_) => None,
    }
  }
}

impl fmt::Display for MatrixError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MatrixError::Config(e) => write!(f, "{}", e),
      MatrixError::Git(e) => write!(f, "{}", e),
      MatrixError::Io(e) => write!(f, "I/O error: {}", e),
      MatrixError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for MatrixError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      MatrixError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for MatrixError {
  fn from(err: io::Error) -> Self {
    MatrixError::Io(err)
  }
}

impl From<toml_edit::de::Error> for MatrixError {
  fn from(err: toml_edit::de::Error) -> Self {
    MatrixError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for MatrixError {
  fn from(err: serde_json::Error) -> Self {
    MatrixError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit `--config` path does not exist
  NotFound { path: PathBuf },

  /// Config file exists but could not be parsed
  Invalid { path: PathBuf, reason: String },

  /// Project root is absolute or escapes the repository
  InvalidProjectRoot { value: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Drop --config to fall back to matrix.toml discovery in the repository root.".to_string())
      }
      ConfigError::Invalid { .. } => Some("Expected a [matrix] table, e.g.\n\n  [matrix]\n  project_root = \"project\"\n  ignore = [\"docs\"]".to_string()),
      ConfigError::InvalidProjectRoot { .. } => Some(
        "PROJECT_ROOT must be a path relative to the repository root, or \".\" for the root itself.".to_string(),
      ),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid config file {}: {}", path.display(), reason)
      }
      ConfigError::InvalidProjectRoot { value, reason } => {
        write!(f, "Invalid project root '{}': {}", value, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run inside a git checkout or pass --repo-root explicitly (looked in {}).",
        path.display()
      )),
      GitError::CommandFailed { .. } => Some("Check that `git` is installed and on PATH.".to_string()),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Result type alias for change-matrix
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> MatrixResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> MatrixResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<MatrixError>,
{
  fn context(self, ctx: impl Into<String>) -> MatrixResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> MatrixResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error to stderr with its help text
pub fn print_error(error: &MatrixError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
