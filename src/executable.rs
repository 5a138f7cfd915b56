use anyhow::{bail, Context, Result};
use std::{env, fs, path::PathBuf};

use crate::utils::resolve_path;

/// Locates the binary whose version is being queried.
pub trait ExecutablePath {
  fn executable_path(&self) -> Result<PathBuf>;
}

impl<T: ExecutablePath + ?Sized> ExecutablePath for Box<T> {
  fn executable_path(&self) -> Result<PathBuf> {
    (**self).executable_path()
  }
}

/// The binary of the currently running process, with symlinks resolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentExecutable;

impl ExecutablePath for CurrentExecutable {
  fn executable_path(&self) -> Result<PathBuf> {
    let exe = env::current_exe().context("locating current executable")?;
    fs::canonicalize(&exe).with_context(|| format!("resolving {}", exe.display()))
  }
}

/// A path supplied by the user, e.g. via `--binary`.
#[derive(Debug, Clone)]
pub struct ExplicitPath {
  path: PathBuf,
  on_this_machine: bool,
}

impl ExplicitPath {
  /// A binary on this machine. Relative paths are taken from the current
  /// directory and the file must exist.
  pub fn local(path: impl Into<PathBuf>) -> Self {
    ExplicitPath { path: path.into(), on_this_machine: true }
  }

  /// A binary on another host. It cannot be checked from here, so it must be
  /// absolute.
  pub fn remote(path: impl Into<PathBuf>) -> Self {
    ExplicitPath { path: path.into(), on_this_machine: false }
  }
}

impl ExecutablePath for ExplicitPath {
  fn executable_path(&self) -> Result<PathBuf> {
    if !self.on_this_machine {
      if !self.path.is_absolute() {
        bail!("remote executable path must be absolute: {}", self.path.display());
      }
      return Ok(self.path.clone());
    }

    let path = resolve_path(&self.path)?;
    if !path.try_exists().unwrap_or(false) {
      bail!("executable not found at path: {}", path.display());
    }
    Ok(path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn current_executable_exists() {
    let path = CurrentExecutable.executable_path().unwrap();
    assert!(path.is_absolute());
    assert!(path.is_file());
  }

  #[test]
  fn explicit_path_returns_existing_file() {
    let tmpdir = tempfile::tempdir().unwrap();
    let binary = tmpdir.path().join("tool");
    fs::write(&binary, b"").unwrap();

    let resolved = ExplicitPath::local(binary.clone()).executable_path().unwrap();
    assert_eq!(resolved, binary);
  }

  #[test]
  fn explicit_path_fails_when_missing() {
    let tmpdir = tempfile::tempdir().unwrap();
    let binary = tmpdir.path().join("missing");

    let err = ExplicitPath::local(binary).executable_path().unwrap_err();
    assert!(err.to_string().contains("executable not found at path"));
  }

  #[test]
  fn remote_path_is_not_checked_locally() {
    let path = ExplicitPath::remote("/opt/tool/bin/tool").executable_path().unwrap();
    assert_eq!(path, PathBuf::from("/opt/tool/bin/tool"));
  }

  #[test]
  fn remote_path_must_be_absolute() {
    let err = ExplicitPath::remote("bin/tool").executable_path().unwrap_err();
    assert!(err.to_string().starts_with("remote executable path must be absolute"));
  }

  #[test]
  fn boxed_resolver_forwards() {
    let resolver: Box<dyn ExecutablePath> = Box::new(ExplicitPath::remote("/opt/tool"));
    assert_eq!(resolver.executable_path().unwrap(), PathBuf::from("/opt/tool"));
  }
}
