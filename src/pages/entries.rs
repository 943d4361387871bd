//! Entry map discovery for the external bundler.

use std::path::Path;

use crate::error::ResolveError;
use crate::models::EntryMap;
use crate::models::AssetKind;
use crate::pages::listing::DirectoryListing;
use crate::project::ProjectLayout;

/// Scan the script and style pages directories and build the entry map.
pub fn discover_entry_bundles(
  layout: &ProjectLayout,
  context_dir: &Path,
) -> Result<EntryMap, ResolveError> {
  let scripts = DirectoryListing::for_kind(layout, context_dir, AssetKind::Script)?;
  let styles = DirectoryListing::for_kind(layout, context_dir, AssetKind::Style)?;
  Ok(build_entry_map(layout, &scripts, &styles))
}

/// Merge script and style listings into an entry map keyed by page name.
///
/// The default bundle always comes first with the shared application script. Page contributions
/// follow, scripts before styles, each in listing order.
pub fn build_entry_map(
  layout: &ProjectLayout,
  scripts: &DirectoryListing,
  styles: &DirectoryListing,
) -> EntryMap {
  let mut entries = EntryMap::default();
  entries.push_source(&layout.default_bundle, layout.default_entry.clone());

  for listing in [scripts, styles] {
    for file in listing.files() {
      if file.page_name == layout.default_bundle {
        tracing::warn!(
          "{} page {} shares its name with the default bundle and is merged into it",
          listing.kind(),
          file.file_name
        );
      }
      entries.push_source(&file.page_name, listing.source_path(file));
    }
  }

  entries
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ProjectConfig;

  fn listing(kind: AssetKind, dir: &str, names: &[&str], extensions: &[&str]) -> DirectoryListing {
    DirectoryListing::from_file_names(
      kind,
      dir,
      names.iter().map(|name| name.to_string()),
      extensions,
    )
  }

  #[test]
  fn always_contains_default_bundle() {
    let layout = ProjectConfig::default().into_layout();
    let scripts = listing(AssetKind::Script, "js/pages", &[], &["js"]);
    let styles = listing(AssetKind::Style, "scss/pages", &[], &["scss", "sass"]);

    let entries = build_entry_map(&layout, &scripts, &styles);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.sources("app").unwrap(), ["./js/app.js"]);
  }

  #[test]
  fn merges_scripts_before_styles_for_shared_pages() {
    let layout = ProjectConfig::default().into_layout();
    let scripts = listing(AssetKind::Script, "js/pages", &["home.js"], &["js"]);
    let styles = listing(
      AssetKind::Style,
      "scss/pages",
      &["home.scss", "blog.sass"],
      &["scss", "sass"],
    );

    let entries = build_entry_map(&layout, &scripts, &styles);
    assert_eq!(entries.bundle_names().collect::<Vec<_>>(), vec![
      "app", "blog", "home"
    ]);
    assert_eq!(entries.sources("home").unwrap(), [
      "./js/pages/home.js",
      "./scss/pages/home.scss"
    ]);
    assert_eq!(entries.sources("blog").unwrap(), ["./scss/pages/blog.sass"]);
  }

  #[test]
  fn page_with_both_stylesheet_flavours_keeps_both_sources() {
    let layout = ProjectConfig::default().into_layout();
    let scripts = listing(AssetKind::Script, "js/pages", &[], &["js"]);
    let styles = listing(
      AssetKind::Style,
      "scss/pages",
      &["home.scss", "home.sass"],
      &["scss", "sass"],
    );

    let entries = build_entry_map(&layout, &scripts, &styles);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries.sources("home").unwrap(), [
      "./scss/pages/home.sass",
      "./scss/pages/home.scss"
    ]);
  }

  #[test]
  fn page_named_like_default_bundle_extends_it() {
    let layout = ProjectConfig::default().into_layout();
    let scripts = listing(AssetKind::Script, "js/pages", &["app.js"], &["js"]);
    let styles = listing(AssetKind::Style, "scss/pages", &[], &["scss"]);

    let entries = build_entry_map(&layout, &scripts, &styles);
    assert_eq!(entries.sources("app").unwrap(), [
      "./js/app.js",
      "./js/pages/app.js"
    ]);
  }
}
