//! Project layout and build context shared by the resolver, builder and CLI.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{CopyTarget, DevServerOptions, LoaderPreludes};

/// Owned description of where pages live and how their outputs are named.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
  /// Source context directory, relative to the project root.
  pub source_dir: String,
  /// Output directory, relative to the project root.
  pub output_dir: String,
  /// Per-page scripts directory, relative to the source context.
  pub scripts_pages_dir: String,
  /// Per-page stylesheets directory, relative to the source context.
  pub styles_pages_dir: String,
  /// Page templates directory, relative to the source context.
  pub templates_pages_dir: String,
  /// Extension recognized for page scripts.
  pub script_extension: String,
  /// Extensions recognized for page stylesheets, treated as equivalent alternatives.
  pub style_extensions: Vec<String>,
  /// Extension recognized for page templates.
  pub template_extension: String,
  /// Reserved bundle name used whenever a page has no script or stylesheet of its own.
  pub default_bundle: String,
  /// Shared application script backing the default bundle.
  pub default_entry: String,
  /// Output filename pattern for script bundles.
  pub script_filename: String,
  /// Output filename pattern for style bundles.
  pub style_filename: String,
  /// Output filename pattern for rendered pages.
  pub page_filename: String,
  /// Static files and directories copied into the output.
  pub copy: Vec<CopyTarget>,
  /// Whether the output directory is emptied before a build.
  pub clean_before_build: bool,
  /// Source snippets injected into page files by the bundler's loaders.
  pub preludes: LoaderPreludes,
  /// Development server options forwarded to the bundler.
  pub dev_server: DevServerOptions,
  /// File name of the serialized build plan inside the output directory.
  pub plan_file: String,
}

/// Build flavour selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  /// Development build with live reload.
  #[default]
  Development,
  /// Production build.
  Production,
}

impl BuildMode {
  /// Live reload is only wired up for development builds.
  pub fn live_reload(self) -> bool {
    matches!(self, Self::Development)
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Development => f.write_str("development"),
      Self::Production => f.write_str("production"),
    }
  }
}

/// Layout bound to a concrete project root for a single build invocation.
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
  /// Project root every layout path is resolved against.
  pub project_root: &'a Path,
  /// Layout describing the project.
  pub layout: &'a ProjectLayout,
  /// Selected build mode.
  pub mode: BuildMode,
}

impl<'a> BuildContext<'a> {
  /// Bind a layout to a project root.
  pub fn new(project_root: &'a Path, layout: &'a ProjectLayout, mode: BuildMode) -> Self {
    Self {
      project_root,
      layout,
      mode,
    }
  }

  /// Absolute source context directory.
  pub fn context_dir(&self) -> PathBuf {
    self.project_root.join(&self.layout.source_dir)
  }

  /// Absolute output directory.
  pub fn output_dir(&self) -> PathBuf {
    self.project_root.join(&self.layout.output_dir)
  }

  /// Absolute location the build plan is written to.
  pub fn plan_path(&self) -> PathBuf {
    self.output_dir().join(&self.layout.plan_file)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ProjectConfig;

  #[test]
  fn only_development_enables_live_reload() {
    assert!(BuildMode::Development.live_reload());
    assert!(!BuildMode::Production.live_reload());
  }

  #[test]
  fn resolves_directories_against_project_root() {
    let layout = ProjectConfig::default().into_layout();
    let context = BuildContext::new(Path::new("/site"), &layout, BuildMode::Production);

    assert_eq!(context.context_dir(), PathBuf::from("/site/src"));
    assert_eq!(context.output_dir(), PathBuf::from("/site/dist"));
    assert_eq!(
      context.plan_path(),
      PathBuf::from("/site/dist/build-plan.json")
    );
  }
}
