//! Input helpers

/// Changed paths from newline-separated input
///
/// Surrounding whitespace (including `\r` from CRLF input) is trimmed and
/// blank lines are dropped.
pub fn parse_changed_files(input: &str) -> Vec<String> {
  input
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}
