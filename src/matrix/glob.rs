//! Path globs for `.depends` declarations
//!
//! Patterns are `/`-separated paths with two wildcards:
//!
//! - `**` matches one or more characters, `/` included
//! - `*` matches one or more characters within a single path segment
//!
//! Everything else, `.` included, is literal. Patterns are anchored at both
//! ends, so a pattern without wildcards is an exact path match.
//!
//! ```text
//! project/shared/**   project/shared/a.js, project/shared/x/y/z.js
//! project/*.js        project/a.js          (not project/lib/a.js)
//! ```

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Compiled size cap for a single pattern
const SIZE_LIMIT: usize = 1 << 20;

/// A compiled `.depends` pattern
///
/// A pattern that fails to compile matches nothing.
#[derive(Debug, Clone)]
pub struct Glob {
  pattern: String,
  regex: Option<Regex>,
}

impl Glob {
  pub fn compile(pattern: &str) -> Self {
    build(pattern, SIZE_LIMIT)
  }

  pub fn is_match(&self, path: &str) -> bool {
    self.regex.as_ref().is_some_and(|re| re.is_match(path))
  }

  /// False when the pattern could not be compiled
  pub fn is_valid(&self) -> bool {
    self.regex.is_some()
  }

  pub fn as_str(&self) -> &str {
    &self.pattern
  }
}

fn build(pattern: &str, size_limit: usize) -> Glob {
  let source = to_regex_source(pattern);
  let regex = match RegexBuilder::new(&source).size_limit(size_limit).build() {
    Ok(re) => Some(re),
    Err(e) => {
      warn!(pattern, error = %e, "ignoring glob that failed to compile");
      None
    }
  };

  Glob {
    pattern: pattern.to_string(),
    regex,
  }
}

/// Translate a glob into an anchored regex
///
/// Star runs are tokenised before anything is emitted, so `**` can never be
/// read back as two single-segment stars.
fn to_regex_source(pattern: &str) -> String {
  let mut out = String::with_capacity(pattern.len() + 8);
  out.push('^');

  let mut literal = String::new();
  let mut chars = pattern.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '*' {
      literal.push(c);
      continue;
    }

    out.push_str(&regex::escape(&literal));
    literal.clear();

    if chars.peek() == Some(&'*') {
      while chars.peek() == Some(&'*') {
        chars.next();
      }
      out.push_str(".+");
    } else {
      out.push_str("[^/]+");
    }
  }

  out.push_str(&regex::escape(&literal));
  out.push('$');
  out
}
