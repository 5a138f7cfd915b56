use anyhow::{anyhow, Result};
use std::{env, path::{Path, PathBuf}};

pub fn resolve_path(relative_path: &Path) -> Result<PathBuf> {
  if relative_path.is_absolute() {
    return Ok(relative_path.to_path_buf());
  }
  let current_dir = env::current_dir()?;
  Ok(current_dir.join(relative_path))
}

pub fn path_to_string(path: &Path) -> Result<String> {
  path
    .to_str()
    .map(str::to_string)
    .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))
}
