//! Build orchestrator: scans page sources, computes the build plan and prepares the output.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::asset_paths::render_output_filename;
use crate::bundle::output::{clean_output_dir, copy_static_assets};
use crate::bundle::plan::write_plan;
use crate::error::ResolveError;
use crate::models::{
  AssetKind, BuildPlan, BundleOutput, DevServerOptions, DevServerPlan, EntryMap, PreludeRule,
};
use crate::pages::{DirectoryListing, PageScan, build_entry_map, generate_page_jobs};
use crate::project::{BuildContext, ProjectLayout};

/// Generic build result type used across the crate.
pub type BuildResult<T> = Result<T>;

/// Everything a build invocation produced.
#[derive(Debug)]
pub struct BuildArtifacts {
  /// Plan handed to the external bundler.
  pub plan: BuildPlan,
  /// Location the plan was written to.
  pub plan_path: PathBuf,
  /// Number of static files copied into the output.
  pub copied_files: usize,
}

/// High-level helper computing the build plan and preparing the output directory.
pub struct SiteBuilder<'a> {
  context: BuildContext<'a>,
}

impl<'a> SiteBuilder<'a> {
  /// Create a builder for the provided build context.
  pub fn new(context: BuildContext<'a>) -> Self {
    Self { context }
  }

  /// Scan the pages directories and compute the plan without touching the output.
  pub fn plan(&self) -> BuildResult<BuildPlan> {
    let layout = self.context.layout;
    let context_dir = self.context.context_dir();
    let scan = PageScan::scan(layout, &context_dir)?;

    let entries = build_entry_map(layout, &scan.scripts, &scan.styles);
    let pages = generate_page_jobs(layout, &scan.templates, &scan.scripts, &scan.styles)?;
    let bundles = bundle_outputs(layout, &entries)?;

    let mode = self.context.mode;
    let live_reload = mode.live_reload();

    tracing::debug!(
      "planned {} bundles and {} pages from {}",
      entries.len(),
      pages.len(),
      context_dir.display()
    );

    Ok(BuildPlan {
      mode,
      live_reload,
      context: layout.source_dir.clone(),
      output_dir: layout.output_dir.clone(),
      entries,
      bundles,
      pages,
      preludes: prelude_rules(layout),
      copy: layout.copy.clone(),
      dev_server: DevServerPlan {
        static_dir: layout.output_dir.clone(),
        options: DevServerOptions {
          live_reload: layout.dev_server.live_reload && live_reload,
          ..layout.dev_server.clone()
        },
      },
    })
  }

  /// Compute the plan, clean the output, copy static assets and write the plan to disk.
  ///
  /// The plan is computed first so that a missing pages directory aborts the build before the
  /// previous output is removed.
  pub fn build(&self) -> BuildResult<BuildArtifacts> {
    let layout = self.context.layout;
    let plan = self.plan()?;

    let context_dir = self.context.context_dir();
    let output_dir = self.context.output_dir();

    if layout.clean_before_build {
      clean_output_dir(self.context.project_root, &output_dir, &[
        self.context.project_root,
        context_dir.as_path(),
      ])?;
    }

    let copied_files = copy_static_assets(&context_dir, &output_dir, &layout.copy)
      .context("failed to copy static assets")?;

    let plan_path = self.context.plan_path();
    write_plan(&plan_path, &plan)?;

    tracing::info!(
      "{} build: {} pages, {} bundles, {} static files",
      plan.mode,
      plan.pages.len(),
      plan.bundles.len(),
      copied_files
    );

    Ok(BuildArtifacts {
      plan,
      plan_path,
      copied_files,
    })
  }

  /// Read one page source of the given kind as the loader sees it, prelude included.
  ///
  /// When several files share the page name (`home.scss` and `home.sass`), the first in listing
  /// order is used.
  pub fn page_source(&self, kind: AssetKind, page: &str) -> BuildResult<String> {
    let layout = self.context.layout;
    let context_dir = self.context.context_dir();
    let listing = DirectoryListing::for_kind(layout, &context_dir, kind)?;

    let Some(file) = listing.files().iter().find(|file| file.page_name == page) else {
      bail!(
        "no {kind} source for page {page} in {}",
        context_dir.join(listing.pages_dir()).display()
      );
    };
    let path = context_dir.join(listing.pages_dir()).join(&file.file_name);

    let prelude = match kind {
      AssetKind::Script => &layout.preludes.script,
      AssetKind::Style => &layout.preludes.style,
      AssetKind::Template => &layout.preludes.template,
    };
    match prelude {
      Some(prelude) => prelude.apply_to_file(&path),
      None => fs::read_to_string(&path)
        .with_context(|| format!("failed to read page source {}", path.display())),
    }
  }
}

fn bundle_outputs(
  layout: &ProjectLayout,
  entries: &EntryMap,
) -> Result<Vec<BundleOutput>, ResolveError> {
  entries
    .bundle_names()
    .map(|name| -> Result<BundleOutput, ResolveError> {
      Ok(BundleOutput {
        name: name.to_string(),
        script: render_output_filename(&layout.script_filename, name)?,
        style: render_output_filename(&layout.style_filename, name)?,
      })
    })
    .collect()
}

fn prelude_rules(layout: &ProjectLayout) -> Vec<PreludeRule> {
  let preludes = &layout.preludes;
  [
    (AssetKind::Script, &layout.scripts_pages_dir, &preludes.script),
    (AssetKind::Style, &layout.styles_pages_dir, &preludes.style),
    (
      AssetKind::Template,
      &layout.templates_pages_dir,
      &preludes.template,
    ),
  ]
  .into_iter()
  .filter_map(|(kind, dir, prelude)| {
    prelude.as_ref().map(|prelude| PreludeRule {
      kind,
      include: dir.clone(),
      prelude: prelude.clone(),
    })
  })
  .collect()
}
