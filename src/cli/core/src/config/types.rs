/* src/cli/core/src/config/types.rs */

use std::path::{Path, PathBuf};

use gig_binding::SiteConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GigConfig {
  #[serde(default)]
  pub site: SiteConfig,
  #[serde(default)]
  pub storage: StorageSection,
  #[serde(default)]
  pub api: ApiSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
  #[serde(default = "default_storage_path")]
  pub path: String,
}

impl Default for StorageSection {
  fn default() -> Self {
    Self { path: default_storage_path() }
  }
}

impl StorageSection {
  /// Relative paths resolve against the directory holding `gig.toml`.
  pub fn resolve(&self, base_dir: &Path) -> PathBuf {
    let path = Path::new(&self.path);
    if path.is_absolute() { path.to_path_buf() } else { base_dir.join(path) }
  }
}

fn default_storage_path() -> String {
  ".gig/preferences.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
  #[serde(default = "default_api_base")]
  pub base_url: String,
  /// `{slug}` is replaced with the requested content slug.
  #[serde(default = "default_content_path")]
  pub content_path: String,
}

impl Default for ApiSection {
  fn default() -> Self {
    Self { base_url: default_api_base(), content_path: default_content_path() }
  }
}

impl ApiSection {
  pub fn content_url(&self, base_override: Option<&str>, slug: &str) -> String {
    let base = base_override.unwrap_or(&self.base_url).trim_end_matches('/');
    let path = self.content_path.replace("{slug}", slug.trim_matches('/'));
    if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
  }
}

fn default_api_base() -> String {
  "http://localhost:3000".to_string()
}

fn default_content_path() -> String {
  "/api/seo-content/{slug}".to_string()
}
