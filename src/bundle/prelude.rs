//! Loader prelude injection for page sources.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Prelude, PreludePosition};

impl Prelude {
  /// Return `source` with the prelude text inserted.
  ///
  /// Appended text always starts on its own line.
  pub fn apply(&self, source: &str) -> String {
    match self.position {
      PreludePosition::Prepend => format!("{}{}", self.text, source),
      PreludePosition::Append => {
        let separator = if source.is_empty() || source.ends_with('\n') {
          ""
        } else {
          "\n"
        };
        format!("{source}{separator}{}", self.text)
      }
    }
  }

  /// Read a page source from disk and apply the prelude to it.
  pub fn apply_to_file(&self, path: &Path) -> Result<String> {
    let source = fs::read_to_string(path)
      .with_context(|| format!("failed to read page source {}", path.display()))?;
    Ok(self.apply(&source))
  }
}
