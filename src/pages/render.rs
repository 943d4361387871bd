//! Pairing page templates with their script and style bundles.

use crate::asset_paths::render_output_filename;
use crate::error::ResolveError;
use crate::models::{PageJob, RenderParameters};
use crate::pages::listing::DirectoryListing;
use crate::project::ProjectLayout;

/// Script bundle a page links to: its own when `<page>.<script-ext>` exists, the default otherwise.
pub fn resolve_script_bundle<'a>(
  page: &'a str,
  scripts: &DirectoryListing,
  layout: &'a ProjectLayout,
) -> &'a str {
  let own_script = format!("{page}.{}", layout.script_extension);
  if scripts.contains(&own_script) {
    page
  } else {
    layout.default_bundle.as_str()
  }
}

/// Style bundle a page links to. Every recognized stylesheet extension counts as a match.
pub fn resolve_style_bundle<'a>(
  page: &'a str,
  styles: &DirectoryListing,
  layout: &'a ProjectLayout,
) -> &'a str {
  let has_own_style = layout
    .style_extensions
    .iter()
    .any(|extension| styles.contains(&format!("{page}.{extension}")));

  if has_own_style {
    page
  } else {
    layout.default_bundle.as_str()
  }
}

/// Emit one render job per template, in template listing order.
pub fn generate_page_jobs(
  layout: &ProjectLayout,
  templates: &DirectoryListing,
  scripts: &DirectoryListing,
  styles: &DirectoryListing,
) -> Result<Vec<PageJob>, ResolveError> {
  templates
    .files()
    .iter()
    .map(|file| -> Result<PageJob, ResolveError> {
      let page = file.page_name.as_str();
      let parameters = RenderParameters {
        raw_filename: page.to_string(),
        js_filename: resolve_script_bundle(page, scripts, layout).to_string(),
        css_filename: resolve_style_bundle(page, styles, layout).to_string(),
      };

      Ok(PageJob {
        template: templates.source_path(file),
        filename: render_output_filename(&layout.page_filename, page)?,
        parameters,
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ProjectConfig;
  use crate::models::AssetKind;

  fn listing(kind: AssetKind, names: &[&str], extensions: &[&str]) -> DirectoryListing {
    DirectoryListing::from_file_names(
      kind,
      "pages",
      names.iter().map(|name| name.to_string()),
      extensions,
    )
  }

  #[test]
  fn resolves_own_script_or_default() {
    let layout = ProjectConfig::default().into_layout();
    let scripts = listing(AssetKind::Script, &["home.js"], &["js"]);

    assert_eq!(resolve_script_bundle("home", &scripts, &layout), "home");
    assert_eq!(resolve_script_bundle("about", &scripts, &layout), "app");
  }

  #[test]
  fn accepts_either_stylesheet_extension() {
    let layout = ProjectConfig::default().into_layout();
    let styles = listing(AssetKind::Style, &["contact.scss", "legal.sass"], &[
      "scss", "sass",
    ]);

    assert_eq!(resolve_style_bundle("contact", &styles, &layout), "contact");
    assert_eq!(resolve_style_bundle("legal", &styles, &layout), "legal");
    assert_eq!(resolve_style_bundle("home", &styles, &layout), "app");
  }

  #[test]
  fn honours_configured_default_bundle() {
    let mut config = ProjectConfig::default();
    config.default_bundle = "main".into();
    let layout = config.into_layout();
    let scripts = listing(AssetKind::Script, &[], &["js"]);

    assert_eq!(resolve_script_bundle("home", &scripts, &layout), "main");
  }

  #[test]
  fn emits_one_job_per_template() {
    let layout = ProjectConfig::default().into_layout();
    let templates = DirectoryListing::from_file_names(
      AssetKind::Template,
      "pug/pages",
      ["index.pug".to_string(), "about.pug".to_string()],
      &["pug"],
    );
    let scripts = listing(AssetKind::Script, &["index.js"], &["js"]);
    let styles = listing(AssetKind::Style, &["about.sass"], &["scss", "sass"]);

    let jobs = generate_page_jobs(&layout, &templates, &scripts, &styles).unwrap();
    assert_eq!(jobs.len(), 2);

    assert_eq!(jobs[0].template, "./pug/pages/about.pug");
    assert_eq!(jobs[0].filename, "about.html");
    assert_eq!(jobs[0].parameters.js_filename, "app");
    assert_eq!(jobs[0].parameters.css_filename, "about");

    assert_eq!(jobs[1].filename, "index.html");
    assert_eq!(jobs[1].parameters.raw_filename, "index");
    assert_eq!(jobs[1].parameters.js_filename, "index");
    assert_eq!(jobs[1].parameters.css_filename, "app");
  }
}
