//! Command line entry point for planning and preparing multi-page builds.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use page_entry_bundler::bundle::plan::write_plan;
use page_entry_bundler::models::AssetKind;
use page_entry_bundler::{BuildContext, BuildMode, ProjectConfig, SiteBuilder};

#[derive(Parser)]
#[command(name = "page-entry-bundler")]
#[command(about = "Pair page templates with their script and style bundles")]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Project root containing the source context and configuration
  #[arg(short, long, default_value = ".")]
  root: PathBuf,

  /// Configuration file (defaults to pages.config.{json,yaml,yml} in the root)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Build mode; development enables live reload
  #[arg(short, long, value_enum, default_value_t = BuildMode::Development)]
  mode: BuildMode,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the build plan as JSON
  Plan {
    /// Write the plan to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
  },

  /// Clean the output, copy static assets and write the build plan
  Build,

  /// List the pages that would be generated
  Pages,

  /// Print a page source with its loader prelude applied
  Source {
    /// Kind of page asset
    #[arg(value_enum)]
    kind: AssetKind,

    /// Page name without extension
    page: String,
  },
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
  let config = match explicit {
    Some(path) => ProjectConfig::from_path(path)?,
    None => ProjectConfig::discover(root)?,
  };
  Ok(config)
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::new("info")
  };
  fmt().with_env_filter(filter).with_target(false).init();

  let layout = load_config(&cli.root, cli.config.as_deref())?.into_layout();
  let builder = SiteBuilder::new(BuildContext::new(&cli.root, &layout, cli.mode));

  match cli.command {
    Commands::Plan { out } => {
      let plan = builder.plan()?;
      match out {
        Some(path) => {
          write_plan(&path, &plan)?;
          tracing::info!("wrote build plan to {}", path.display());
        }
        None => {
          let json = serde_json::to_string_pretty(&plan)
            .context("failed to serialise build plan")?;
          println!("{json}");
        }
      }
    }
    Commands::Build => {
      let artifacts = builder.build()?;
      tracing::info!("build plan: {}", artifacts.plan_path.display());
    }
    Commands::Pages => {
      let plan = builder.plan()?;
      for job in &plan.pages {
        tracing::info!(
          "{} -> {} (js: {}, css: {})",
          job.template,
          job.filename,
          job.parameters.js_filename,
          job.parameters.css_filename
        );
      }
      tracing::info!("{} pages", plan.pages.len());
    }
    Commands::Source { kind, page } => {
      print!("{}", builder.page_source(kind, &page)?);
    }
  }

  Ok(())
}
