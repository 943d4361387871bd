//! Writing and loading the serialised build plan.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::BuildPlan;

/// Write the plan as prettified JSON, creating parent directories as needed.
pub fn write_plan(path: &Path, plan: &BuildPlan) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let json = serde_json::to_string_pretty(plan).context("failed to serialise build plan")?;
  fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Load a build plan from disk.
pub fn load_plan(path: &Path) -> Result<BuildPlan> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("build plan not found at {}", path.display()))?;
  let plan: BuildPlan = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse build plan {}", path.display()))?;
  Ok(plan)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{DevServerOptions, DevServerPlan, EntryMap};
  use crate::project::BuildMode;
  use tempfile::tempdir;

  fn plan() -> BuildPlan {
    let mut entries = EntryMap::default();
    entries.push_source("app", "./js/app.js".into());

    BuildPlan {
      mode: BuildMode::Production,
      live_reload: false,
      context: "src".into(),
      output_dir: "dist".into(),
      entries,
      bundles: Vec::new(),
      pages: Vec::new(),
      preludes: Vec::new(),
      copy: Vec::new(),
      dev_server: DevServerPlan {
        static_dir: "dist".into(),
        options: DevServerOptions::default(),
      },
    }
  }

  #[test]
  fn writes_plan_into_missing_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dist/nested/build-plan.json");

    write_plan(&path, &plan()).unwrap();

    let loaded = load_plan(&path).unwrap();
    assert_eq!(loaded, plan());

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"mode\": \"production\""));
    for key in ["liveReload", "outputDir", "devServer", "staticDir", "historyApiFallback"] {
      assert!(raw.contains(&format!("\"{key}\"")), "missing {key}");
    }
    assert!(!raw.contains("history_api_fallback"));
  }

  #[test]
  fn reports_missing_plan() {
    let dir = tempdir().unwrap();
    let err = load_plan(&dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("build plan not found"));
  }
}
