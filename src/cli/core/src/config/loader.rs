/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::GigConfig;

/// Walk upward from `start` to find `gig.toml`, like Cargo.toml discovery
pub fn find_gig_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join("gig.toml");
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("gig.toml not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_gig_config(path: &Path) -> Result<GigConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: GigConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.site.validate().with_context(|| format!("invalid [site] in {}", path.display()))?;
  Ok(config)
}

/// Explicit path, else `gig.toml` found upward from `cwd`, else defaults.
/// Returns the directory relative paths resolve against.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<(PathBuf, GigConfig)> {
  let path = match explicit {
    Some(p) => p.to_path_buf(),
    None => match find_gig_config(cwd) {
      Ok(p) => p,
      Err(_) => {
        tracing::debug!(cwd = %cwd.display(), "no gig.toml found; using defaults");
        return Ok((cwd.to_path_buf(), GigConfig::default()));
      }
    },
  };
  let config = load_gig_config(&path)?;
  let base_dir = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
  tracing::debug!(config = %path.display(), "loaded config");
  Ok((base_dir, config))
}
