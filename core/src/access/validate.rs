use once_cell::sync::Lazy;
use regex::Regex;

static AROUND_SEPARATORS: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\s*([.\[\]])\s*").expect("separator pattern"));

static VALID_SEGMENT: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\[[0-9]+\])*$").expect("segment pattern"));

/// Trim the string and drop whitespace touching `.`, `[` or `]`.
///
/// `sanitize(sanitize(s)) == sanitize(s)` for every input: the output never has leading or
/// trailing whitespace and never has whitespace next to a separator.
pub fn sanitize_access_string(path: &str) -> String {
  AROUND_SEPARATORS
    .replace_all(path.trim(), "$1")
    .into_owned()
}

/// Strict syntax check. Readers do not require it; writers do (after sanitizing).
pub fn is_valid_access_string(path: &str) -> bool {
  if path.is_empty() {
    return false;
  }
  if path.starts_with('.') || path.ends_with('.') || path.contains("..") {
    return false;
  }
  path.split('.').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
  if segment.is_empty() {
    return false;
  }

  let mut open = 0usize;
  let mut close = 0usize;
  for c in segment.chars() {
    match c {
      '[' => open += 1,
      ']' => {
        close += 1;
        if close > open {
          return false;
        }
      }
      _ => {}
    }
  }
  if open != close {
    return false;
  }

  VALID_SEGMENT.is_match(segment)
}
