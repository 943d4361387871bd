use regex::{Captures, Regex};

use crate::error::ResolveError;

fn placeholder_pattern() -> &'static Regex {
  use std::sync::OnceLock;

  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\[([A-Za-z0-9_]+)\]").expect("invalid placeholder regex"))
}

/// Expand an output filename pattern such as `js/[name].bundle.js` for one bundle.
///
/// Only the `[name]` placeholder is understood; hashes and other bundler-specific placeholders
/// would make the filenames in the build plan unpredictable, so they are rejected.
pub fn render_output_filename(pattern: &str, name: &str) -> Result<String, ResolveError> {
  if let Some(unknown) = placeholder_pattern()
    .captures_iter(pattern)
    .map(|caps| caps[1].to_string())
    .find(|placeholder| placeholder != "name")
  {
    return Err(ResolveError::UnknownPlaceholder {
      pattern: pattern.to_string(),
      placeholder: unknown,
    });
  }

  let normalised = pattern.replace('\\', "/");
  let trimmed = normalised.trim_start_matches("./");
  Ok(
    placeholder_pattern()
      .replace_all(trimmed, |_: &Captures<'_>| name)
      .into_owned(),
  )
}
