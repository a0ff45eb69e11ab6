/* src/cli/core/src/pull.rs */

use std::path::Path;

use anyhow::{Context, Result};
use gig_binding::Content;
use serde_json::Value;

use crate::ui;

/// Fetch one generated content object and save it as pretty JSON.
pub async fn pull_content(url: &str, out: &Path) -> Result<Content> {
  ui::arrow(url);

  let resp = reqwest::get(url).await.with_context(|| format!("failed to fetch content from {url}"))?;

  let status = resp.status();
  if !status.is_success() {
    anyhow::bail!("server returned HTTP {status}");
  }

  let body: Value = resp.json().await.context("failed to parse response JSON")?;
  let content = Content::from_value(body).context("response is not a content object")?;

  ui::ok(&format!("{}{}", content.title, summary(&content)));

  let json = serde_json::to_string_pretty(&content)?;
  if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;

  ui::ok(&format!("saved {}", out.display()));
  Ok(content)
}

fn summary(content: &Content) -> String {
  let mut parts = Vec::new();
  let keywords = content.keywords.len();
  if keywords > 0 {
    parts.push(format!("{keywords} {}", if keywords == 1 { "keyword" } else { "keywords" }));
  }
  let faq = content.faq.len();
  if faq > 0 {
    parts.push(format!("{faq} FAQ {}", if faq == 1 { "entry" } else { "entries" }));
  }
  if let Some(generated_at) = &content.generated_at {
    parts.push(format!("generated {generated_at}"));
  }
  if parts.is_empty() { String::new() } else { format!(" ({})", parts.join(", ")) }
}
