//! Data structures produced while planning a multi-page build.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::project::BuildMode;

/// Kind of page asset a directory listing holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  /// Per-page script entry.
  Script,
  /// Per-page stylesheet entry.
  Style,
  /// Page template rendered into an HTML file.
  Template,
}

impl fmt::Display for AssetKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Script => f.write_str("script"),
      Self::Style => f.write_str("style"),
      Self::Template => f.write_str("template"),
    }
  }
}

/// Mapping from bundle name to the ordered source files contributing to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryMap(BTreeMap<String, Vec<String>>);

impl EntryMap {
  /// Append a source to a bundle, creating the bundle when it does not exist yet.
  pub fn push_source(&mut self, bundle: &str, source: String) {
    self.0.entry(bundle.to_string()).or_default().push(source);
  }

  /// Whether the bundle is part of the map.
  pub fn contains(&self, bundle: &str) -> bool {
    self.0.contains_key(bundle)
  }

  /// Sources contributing to a bundle.
  pub fn sources(&self, bundle: &str) -> Option<&[String]> {
    self.0.get(bundle).map(Vec::as_slice)
  }

  /// Number of bundles.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether no bundle has been registered.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Bundle names in lexicographic order.
  pub fn bundle_names(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  /// Bundles and their sources in lexicographic order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self
      .0
      .iter()
      .map(|(name, sources)| (name.as_str(), sources.as_slice()))
  }
}

/// Parameters handed to the template renderer for a single page.
///
/// Field names are the variables the page templates read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderParameters {
  /// Page name taken from the template filename.
  pub raw_filename: String,
  /// Script bundle the page links to.
  pub js_filename: String,
  /// Style bundle the page links to.
  pub css_filename: String,
}

/// One output page generated from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageJob {
  /// Template source path relative to the source context.
  pub template: String,
  /// Output HTML filename.
  pub filename: String,
  /// Variables exposed to the template.
  pub parameters: RenderParameters,
}

/// Output files produced for one entry-map bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleOutput {
  /// Bundle name.
  pub name: String,
  /// Script output filename relative to the output directory.
  pub script: String,
  /// Stylesheet output filename relative to the output directory.
  pub style: String,
}

/// Static file or directory copied verbatim into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyTarget {
  /// Source path relative to the source context.
  pub from: String,
  /// Destination path relative to the output directory.
  pub to: String,
  /// Missing optional sources are skipped instead of failing the build.
  #[serde(default = "default_optional")]
  pub optional: bool,
}

fn default_optional() -> bool {
  true
}

/// Where a prelude is placed relative to the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreludePosition {
  /// Inserted before the source.
  Prepend,
  /// Inserted after the source.
  Append,
}

/// Source snippet a loader injects into every page file of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prelude {
  /// Placement of the snippet.
  pub position: PreludePosition,
  /// Snippet text, inserted as-is.
  pub text: String,
}

/// Configured preludes for each page asset kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderPreludes {
  /// Injected into page scripts.
  pub script: Option<Prelude>,
  /// Injected into page stylesheets.
  pub style: Option<Prelude>,
  /// Injected into page templates.
  pub template: Option<Prelude>,
}

impl Default for LoaderPreludes {
  fn default() -> Self {
    Self {
      script: Some(Prelude {
        position: PreludePosition::Append,
        text: "import \"../app.js\"\n".into(),
      }),
      style: Some(Prelude {
        position: PreludePosition::Prepend,
        text: "@import '../app';".into(),
      }),
      template: Some(Prelude {
        position: PreludePosition::Prepend,
        text: "extends ../app \n\n".into(),
      }),
    }
  }
}

/// Prelude bound to the pages directory whose files receive it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreludeRule {
  /// Asset kind the rule applies to.
  pub kind: AssetKind,
  /// Pages directory relative to the source context.
  pub include: String,
  /// Snippet to inject.
  pub prelude: Prelude,
}

/// Development server options forwarded to the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevServerOptions {
  /// Serve the entry page for unknown routes.
  #[serde(alias = "history_api_fallback")]
  pub history_api_fallback: bool,
  /// Open a browser once the server is up.
  pub open: bool,
  /// Compress responses.
  pub compress: bool,
  /// Reload the browser when outputs change.
  #[serde(alias = "live_reload")]
  pub live_reload: bool,
  /// Hot module replacement.
  pub hot: bool,
}

impl Default for DevServerOptions {
  fn default() -> Self {
    Self {
      history_api_fallback: true,
      open: true,
      compress: true,
      live_reload: true,
      hot: false,
    }
  }
}

/// Development server section of the build plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerPlan {
  /// Directory served, relative to the project root.
  pub static_dir: String,
  /// Effective options for the selected mode.
  #[serde(flatten)]
  pub options: DevServerOptions,
}

/// Complete description of one build invocation, serialised for the external bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
  /// Build mode the plan was computed for.
  pub mode: BuildMode,
  /// Whether live reload is enabled.
  pub live_reload: bool,
  /// Source context directory relative to the project root.
  pub context: String,
  /// Output directory relative to the project root.
  pub output_dir: String,
  /// Bundle name to ordered source files.
  pub entries: EntryMap,
  /// Output filenames for every entry-map bundle.
  pub bundles: Vec<BundleOutput>,
  /// One render job per page template.
  pub pages: Vec<PageJob>,
  /// Loader preludes per page asset kind.
  pub preludes: Vec<PreludeRule>,
  /// Static copy targets.
  pub copy: Vec<CopyTarget>,
  /// Development server settings.
  pub dev_server: DevServerPlan,
}
