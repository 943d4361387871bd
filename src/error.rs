//! Errors raised while resolving page assets.

use std::path::PathBuf;

/// Fatal resolver failures. Missing per-page assets are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
  /// A configured pages directory is missing or unreadable.
  #[error("failed to read directory {}: {source}", .path.display())]
  ReadDir {
    /// Directory that could not be listed.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// An output filename pattern uses a placeholder other than `[name]`.
  #[error("unknown placeholder [{placeholder}] in output pattern '{pattern}'")]
  UnknownPlaceholder {
    /// Offending pattern.
    pattern: String,
    /// Placeholder name without brackets.
    placeholder: String,
  },
}
