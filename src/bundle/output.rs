//! Output directory preparation: cleaning before a build and copying static assets.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use same_file::is_same_file;

use crate::models::CopyTarget;

/// Remove everything inside the output directory and recreate it empty.
///
/// Paths are compared after resolving symlinks and `..` segments. The output directory must lie
/// strictly inside `project_root` and must not contain any of the `protected` paths.
pub fn clean_output_dir(
  project_root: &Path,
  output_dir: &Path,
  protected: &[&Path],
) -> Result<()> {
  let root = resolve_path(project_root)?;
  let output = resolve_path(output_dir)?;

  if output == root || !output.starts_with(&root) {
    bail!(
      "refusing to clean {} because it is not inside the project root {}",
      output_dir.display(),
      project_root.display()
    );
  }

  for path in protected {
    if resolve_path(path)?.starts_with(&output) {
      bail!(
        "refusing to clean {} because it contains {}",
        output_dir.display(),
        path.display()
      );
    }
  }

  match fs::remove_dir_all(&output) {
    Ok(()) => tracing::debug!("cleaned {}", output.display()),
    Err(err) if err.kind() == ErrorKind::NotFound => {}
    Err(err) => {
      return Err(err).with_context(|| format!("failed to clean {}", output.display()));
    }
  }

  fs::create_dir_all(&output).with_context(|| format!("failed to create {}", output.display()))
}

/// Canonicalise the nearest existing ancestor and replay the missing tail lexically.
fn resolve_path(path: &Path) -> Result<PathBuf> {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    std::env::current_dir()
      .context("failed to read the current directory")?
      .join(path)
  };

  let Some(existing) = absolute.ancestors().find(|ancestor| ancestor.exists()) else {
    bail!("no existing ancestor for {}", path.display());
  };
  let mut resolved = existing
    .canonicalize()
    .with_context(|| format!("failed to resolve {}", existing.display()))?;

  let tail = absolute.strip_prefix(existing).unwrap_or(Path::new(""));
  for component in tail.components() {
    match component {
      Component::ParentDir => {
        resolved.pop();
      }
      Component::Normal(part) => resolved.push(part),
      _ => {}
    }
  }

  Ok(resolved)
}

/// Copy each target from the source context into the output directory.
///
/// Returns the number of files written. Optional targets whose source is missing are skipped.
pub fn copy_static_assets(
  context_dir: &Path,
  output_dir: &Path,
  targets: &[CopyTarget],
) -> Result<usize> {
  let mut copied = 0;

  for target in targets {
    let source = context_dir.join(&target.from);
    let destination = output_dir.join(&target.to);

    if !source.exists() {
      if target.optional {
        tracing::debug!("skipping missing static asset {}", source.display());
        continue;
      }
      bail!("static asset {} does not exist", source.display());
    }

    copied += copy_tree(&source, &destination)?;
  }

  Ok(copied)
}

fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
  if !source.is_dir() {
    if let Some(parent) = destination.parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    install_static_asset(source, destination).with_context(|| {
      format!(
        "failed to copy {} to {}",
        source.display(),
        destination.display()
      )
    })?;
    return Ok(1);
  }

  fs::create_dir_all(destination)
    .with_context(|| format!("failed to create {}", destination.display()))?;

  let mut copied = 0;
  for entry in
    fs::read_dir(source).with_context(|| format!("failed to read {}", source.display()))?
  {
    let entry = entry?;
    copied += copy_tree(&entry.path(), &destination.join(entry.file_name()))?;
  }

  Ok(copied)
}

fn install_static_asset(source: &Path, destination: &Path) -> std::io::Result<()> {
  if destination.exists() {
    if is_same_file(source, destination)? {
      return Ok(());
    }
    fs::remove_file(destination)?;
  }

  fs::copy(source, destination).map(|_| ())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn target(from: &str, optional: bool) -> CopyTarget {
    CopyTarget {
      from: from.into(),
      to: from.into(),
      optional,
    }
  }

  #[test]
  fn clean_removes_stale_outputs() -> Result<()> {
    let temp = tempdir()?;
    let root = temp.path();
    let output = root.join("dist");
    fs::create_dir_all(output.join("js"))?;
    fs::write(output.join("js/old.bundle.js"), b"stale")?;

    clean_output_dir(root, &output, &[root.join("src").as_path()])?;

    assert!(output.is_dir());
    assert_eq!(fs::read_dir(&output)?.count(), 0);
    Ok(())
  }

  #[test]
  fn clean_creates_missing_output() -> Result<()> {
    let temp = tempdir()?;
    let root = temp.path();

    clean_output_dir(root, &root.join("build/site"), &[])?;

    assert!(root.join("build/site").is_dir());
    Ok(())
  }

  #[test]
  fn clean_refuses_to_remove_sources() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();

    let err = clean_output_dir(root, &root.join("src/.."), &[root.join("src").as_path()])
      .unwrap_err();
    assert!(err.to_string().contains("refusing to clean"));
    assert!(root.join("src").is_dir());

    let err = clean_output_dir(root, &root.join("src"), &[root.join("src").as_path()])
      .unwrap_err();
    assert!(err.to_string().contains("because it contains"));
    assert!(root.join("src").is_dir());
  }

  #[test]
  fn clean_refuses_parent_of_project_root() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(temp.path().join("neighbour.txt"), b"keep").unwrap();

    let err = clean_output_dir(&root, &root.join(".."), &[root.join("src").as_path()])
      .unwrap_err();
    assert!(err.to_string().contains("not inside the project root"));

    let err = clean_output_dir(&root, &root.join("dist/../../elsewhere"), &[]).unwrap_err();
    assert!(err.to_string().contains("not inside the project root"));

    assert!(root.join("src").is_dir());
    assert!(temp.path().join("neighbour.txt").exists());
  }

  #[cfg(unix)]
  #[test]
  fn clean_follows_symlinked_outputs() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    std::os::unix::fs::symlink(temp.path(), root.join("dist")).unwrap();

    let err = clean_output_dir(&root, &root.join("dist"), &[root.join("src").as_path()])
      .unwrap_err();
    assert!(err.to_string().contains("not inside the project root"));
    assert!(root.join("src").is_dir());
  }

  #[test]
  fn copies_files_and_directories() -> Result<()> {
    let temp = tempdir()?;
    let context = temp.path().join("src");
    let output = temp.path().join("dist");
    fs::create_dir_all(context.join("img/icons"))?;
    fs::write(context.join("img/logo.png"), b"png")?;
    fs::write(context.join("img/icons/menu.svg"), b"svg")?;
    fs::write(context.join("favicon.ico"), b"ico")?;

    let copied = copy_static_assets(&context, &output, &[
      target("img", true),
      target("favicon.ico", true),
      target("fonts", true),
    ])?;

    assert_eq!(copied, 3);
    assert_eq!(fs::read(output.join("img/icons/menu.svg"))?, b"svg");
    assert_eq!(fs::read(output.join("favicon.ico"))?, b"ico");
    assert!(!output.join("fonts").exists());
    Ok(())
  }

  #[test]
  fn missing_required_asset_fails() {
    let temp = tempdir().unwrap();
    let err = copy_static_assets(temp.path(), &temp.path().join("dist"), &[target(
      "fonts", false,
    )])
    .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
  }

  #[test]
  fn install_overwrites_previous_copies() -> std::io::Result<()> {
    let temp = tempdir()?;
    let source = temp.path().join("source.txt");
    let destination = temp.path().join("copy.txt");
    fs::write(&source, b"new")?;
    fs::write(&destination, b"old")?;

    install_static_asset(&source, &destination)?;
    assert_eq!(fs::read(&destination)?, b"new");

    install_static_asset(&source, &source)?;
    assert_eq!(fs::read(&source)?, b"new");
    Ok(())
  }
}
