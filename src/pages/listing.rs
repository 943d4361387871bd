//! Directory scanning for per-page scripts, stylesheets and templates.

use std::fs;
use std::path::Path;

use crate::asset_paths::{is_hidden_file, make_entry_source_path, strip_recognized_extension};
use crate::error::ResolveError;
use crate::models::AssetKind;
use crate::project::ProjectLayout;

/// A page file discovered in a pages directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
  /// Filename as listed, extension included.
  pub file_name: String,
  /// Filename with the recognized extension stripped.
  pub page_name: String,
}

/// Sorted listing of the page files found in one pages directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
  kind: AssetKind,
  pages_dir: String,
  files: Vec<PageFile>,
}

impl DirectoryListing {
  /// List `pages_dir` below the source context, keeping files with one of `extensions`.
  ///
  /// Filenames are sorted lexicographically so that repeated scans of the same tree produce the
  /// same order on every platform. A missing directory is fatal; an empty one is not.
  pub fn scan<S: AsRef<str>>(
    kind: AssetKind,
    context_dir: &Path,
    pages_dir: &str,
    extensions: &[S],
  ) -> Result<Self, ResolveError> {
    let dir = context_dir.join(pages_dir);
    let read_error = |source: std::io::Error| ResolveError::ReadDir {
      path: dir.clone(),
      source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(&dir).map_err(read_error)? {
      let entry = entry.map_err(read_error)?;
      let file_name = entry.file_name();
      let Some(name) = file_name.to_str() else {
        tracing::warn!(
          "skipping non UTF-8 {kind} file {}",
          entry.path().display()
        );
        continue;
      };

      if is_hidden_file(name) || !entry.path().is_file() {
        continue;
      }
      names.push(name.to_string());
    }

    Ok(Self::from_file_names(kind, pages_dir, names, extensions))
  }

  /// Build a listing from already known filenames.
  pub fn from_file_names<S: AsRef<str>>(
    kind: AssetKind,
    pages_dir: &str,
    names: impl IntoIterator<Item = String>,
    extensions: &[S],
  ) -> Self {
    let mut files: Vec<PageFile> = names
      .into_iter()
      .filter_map(|file_name| {
        let Some(page_name) = strip_recognized_extension(&file_name, extensions) else {
          tracing::debug!("ignoring {file_name} in {kind} pages directory {pages_dir}");
          return None;
        };
        let page_name = page_name.to_string();
        Some(PageFile {
          file_name,
          page_name,
        })
      })
      .collect();
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Self {
      kind,
      pages_dir: pages_dir.to_string(),
      files,
    }
  }

  /// Asset kind held by the listing.
  pub fn kind(&self) -> AssetKind {
    self.kind
  }

  /// Pages directory relative to the source context.
  pub fn pages_dir(&self) -> &str {
    &self.pages_dir
  }

  /// Page files in lexicographic filename order.
  pub fn files(&self) -> &[PageFile] {
    &self.files
  }

  /// Whether the directory holds a file with exactly this name.
  pub fn contains(&self, file_name: &str) -> bool {
    self
      .files
      .binary_search_by(|file| file.file_name.as_str().cmp(file_name))
      .is_ok()
  }

  /// Number of page files.
  pub fn len(&self) -> usize {
    self.files.len()
  }

  /// Whether the directory held no page files.
  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Directory-qualified source path of a listed file.
  pub fn source_path(&self, file: &PageFile) -> String {
    make_entry_source_path(&self.pages_dir, &file.file_name)
  }
}

/// The three listings a single build invocation works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageScan {
  /// Per-page scripts.
  pub scripts: DirectoryListing,
  /// Per-page stylesheets.
  pub styles: DirectoryListing,
  /// Page templates.
  pub templates: DirectoryListing,
}

impl PageScan {
  /// Scan every pages directory of the layout below `context_dir`.
  pub fn scan(layout: &ProjectLayout, context_dir: &Path) -> Result<Self, ResolveError> {
    Ok(Self {
      scripts: DirectoryListing::for_kind(layout, context_dir, AssetKind::Script)?,
      styles: DirectoryListing::for_kind(layout, context_dir, AssetKind::Style)?,
      templates: DirectoryListing::for_kind(layout, context_dir, AssetKind::Template)?,
    })
  }
}

impl DirectoryListing {
  /// Scan the pages directory the layout configures for `kind`.
  pub fn for_kind(
    layout: &ProjectLayout,
    context_dir: &Path,
    kind: AssetKind,
  ) -> Result<Self, ResolveError> {
    match kind {
      AssetKind::Script => Self::scan(
        kind,
        context_dir,
        &layout.scripts_pages_dir,
        std::slice::from_ref(&layout.script_extension),
      ),
      AssetKind::Style => Self::scan(
        kind,
        context_dir,
        &layout.styles_pages_dir,
        &layout.style_extensions,
      ),
      AssetKind::Template => Self::scan(
        kind,
        context_dir,
        &layout.templates_pages_dir,
        std::slice::from_ref(&layout.template_extension),
      ),
    }
  }
}
