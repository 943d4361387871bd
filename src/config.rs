//! Project configuration loader describing page directories and output naming.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::{CopyTarget, DevServerOptions, LoaderPreludes};
use crate::project::ProjectLayout;

/// Configuration file names searched for in the project root, in order.
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
  ["pages.config.json", "pages.config.yaml", "pages.config.yml"];

/// Errors raised while reading a configuration file that exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The file could not be read.
  #[error("failed to read {}: {source}", .path.display())]
  Read {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The JSON document is malformed.
  #[error("failed to parse {}: {source}", .path.display())]
  Json {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// The YAML document is malformed.
  #[error("failed to parse {}: {source}", .path.display())]
  Yaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
}

/// Discoverable project configuration describing filesystem layout and output paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  /// Source context, relative to the project root. Every pages directory lives below it.
  pub source_dir: String,
  /// Output directory, relative to the project root.
  pub output_dir: String,
  /// Directory holding per-page scripts.
  pub scripts_pages_dir: String,
  /// Directory holding per-page stylesheets.
  pub styles_pages_dir: String,
  /// Directory holding page templates.
  pub templates_pages_dir: String,
  /// Script extension without the leading dot.
  pub script_extension: String,
  /// Stylesheet extensions without the leading dot.
  pub style_extensions: Vec<String>,
  /// Template extension without the leading dot.
  pub template_extension: String,
  /// Fallback bundle name.
  pub default_bundle: String,
  /// Shared script backing the fallback bundle.
  pub default_entry: String,
  /// Script bundle filename pattern.
  pub script_filename: String,
  /// Style bundle filename pattern.
  pub style_filename: String,
  /// Rendered page filename pattern.
  pub page_filename: String,
  /// Static assets copied into the output.
  pub copy: Vec<CopyTarget>,
  /// Empty the output directory before building.
  pub clean_before_build: bool,
  /// Loader preludes per page asset kind.
  pub preludes: LoaderPreludes,
  /// Development server options.
  pub dev_server: DevServerOptions,
  /// Build plan file name written into the output directory.
  pub plan_file: String,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      source_dir: "src".into(),
      output_dir: "dist".into(),
      scripts_pages_dir: "js/pages".into(),
      styles_pages_dir: "scss/pages".into(),
      templates_pages_dir: "pug/pages".into(),
      script_extension: "js".into(),
      style_extensions: vec!["scss".into(), "sass".into()],
      template_extension: "pug".into(),
      default_bundle: "app".into(),
      default_entry: "./js/app.js".into(),
      script_filename: "js/[name].bundle.js".into(),
      style_filename: "css/[name].bundle.css".into(),
      page_filename: "[name].html".into(),
      copy: vec![
        copy_target("fonts", "fonts"),
        copy_target("img", "img"),
        copy_target("favicon.ico", "favicon.ico"),
      ],
      clean_before_build: true,
      preludes: LoaderPreludes::default(),
      dev_server: DevServerOptions::default(),
      plan_file: "build-plan.json".into(),
    }
  }
}

fn copy_target(from: &str, to: &str) -> CopyTarget {
  CopyTarget {
    from: from.into(),
    to: to.into(),
    optional: true,
  }
}

impl ProjectConfig {
  /// Load the first configuration file found in the project root.
  ///
  /// A project without a configuration file uses the defaults. A file that exists but cannot be
  /// read or parsed is reported rather than silently replaced.
  pub fn discover(project_root: &Path) -> Result<Self, ConfigError> {
    for name in CONFIG_FILE_CANDIDATES {
      let candidate = project_root.join(name);
      if candidate.is_file() {
        return Self::from_path(&candidate);
      }
    }

    tracing::debug!(
      "no configuration file in {}, using defaults",
      project_root.display()
    );
    Ok(Self::default())
  }

  /// Read configuration from a specific JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let is_yaml = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let config = if is_yaml {
      serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
      })?
    } else {
      serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
      })?
    };

    tracing::info!("loaded configuration from {}", path.display());
    Ok(config)
  }

  /// Convert the configuration into an owned layout description.
  pub fn into_layout(self) -> ProjectLayout {
    ProjectLayout {
      source_dir: self.source_dir,
      output_dir: self.output_dir,
      scripts_pages_dir: self.scripts_pages_dir,
      styles_pages_dir: self.styles_pages_dir,
      templates_pages_dir: self.templates_pages_dir,
      script_extension: normalise_extension(self.script_extension),
      style_extensions: self
        .style_extensions
        .into_iter()
        .map(normalise_extension)
        .collect(),
      template_extension: normalise_extension(self.template_extension),
      default_bundle: self.default_bundle,
      default_entry: self.default_entry,
      script_filename: self.script_filename,
      style_filename: self.style_filename,
      page_filename: self.page_filename,
      copy: self.copy,
      clean_before_build: self.clean_before_build,
      preludes: self.preludes,
      dev_server: self.dev_server,
      plan_file: self.plan_file,
    }
  }

  /// Borrowing conversion into a layout, cloning the underlying values.
  pub fn to_layout(&self) -> ProjectLayout {
    self.clone().into_layout()
  }
}

/// Accept extensions written with or without a leading dot.
fn normalise_extension(extension: String) -> String {
  match extension.strip_prefix('.') {
    Some(stripped) => stripped.to_string(),
    None => extension,
  }
}
