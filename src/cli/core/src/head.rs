/* src/cli/core/src/head.rs */

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gig_binding::{Content, ContentView, DynamicContentPage, SiteConfig};
use gig_head::{inject_head, inject_html_lang, render_head, HeadDocument, HeadSyncEngine};
use gig_locale::Locale;

use crate::ui;

pub struct HeadArgs {
  pub content: PathBuf,
  pub path: Option<String>,
  pub template: Option<PathBuf>,
  pub out: Option<PathBuf>,
}

/// Head markup (or the full page when a template is given) for one content
/// object, plus how many structured-data blocks were skipped.
pub fn build_page(
  site: &SiteConfig,
  locale: Locale,
  mut content: Content,
  path: Option<&str>,
  template: Option<&str>,
) -> Result<(String, usize)> {
  if let Some(path) = path {
    content.url = path.to_string();
  }
  let intent = DynamicContentPage
    .intent(site, locale, &Some(content))
    .context("content produced no metadata")?;

  let mut engine = HeadSyncEngine::new(HeadDocument::new());
  let (_handle, report) = engine.apply(&intent);
  for err in &report.skipped {
    ui::warn(&err.to_string());
  }
  let head = render_head(engine.document());

  let html = match template {
    Some(template) => inject_html_lang(&inject_head(template, &head), locale.as_str()),
    None => head,
  };
  Ok((html, report.skipped.len()))
}

pub fn run(site: &SiteConfig, locale: Locale, args: &HeadArgs) -> Result<()> {
  let text = std::fs::read_to_string(&args.content)
    .with_context(|| format!("failed to read {}", args.content.display()))?;
  let content = Content::from_json(&text)
    .with_context(|| format!("failed to parse content in {}", args.content.display()))?;

  let template = match &args.template {
    Some(path) => Some(
      std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?,
    ),
    None => None,
  };

  let (html, skipped) =
    build_page(site, locale, content, args.path.as_deref(), template.as_deref())?;

  match &args.out {
    Some(out) => {
      write_file(out, &html)?;
      ui::ok(&format!("{} ({locale}, {} bytes)", out.display(), html.len()));
      if skipped > 0 {
        ui::warn(&format!("{skipped} structured-data block(s) skipped"));
      }
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout.write_all(html.as_bytes()).context("failed to write to stdout")?;
      stdout.write_all(b"\n").context("failed to write to stdout")?;
    }
  }
  Ok(())
}

fn write_file(out: &Path, html: &str) -> Result<()> {
  if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(out, html).with_context(|| format!("failed to write {}", out.display()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn site() -> SiteConfig {
    SiteConfig { base_url: "https://gigmarket.example".into(), ..Default::default() }
  }

  fn content() -> Content {
    Content::from_json(
      r#"{"title":"Logo design","description":"Hire logo designers","url":"/ai/logo",
          "faq":[{"question":"Cost?","answer":"From $50."}]}"#,
    )
    .unwrap()
  }

  #[test]
  fn head_only() {
    let (html, skipped) = build_page(&site(), Locale::En, content(), None, None).unwrap();
    assert_eq!(skipped, 0);
    assert!(html.starts_with("<title>Logo design | Gigmarket</title>"));
    assert!(html.contains(r#"<link rel="canonical" href="https://gigmarket.example/ai/logo">"#));
    assert!(html.contains(r#"id="ld-faq""#));
  }

  #[test]
  fn template_gets_head_and_lang() {
    let template = r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><title>App</title></head><body></body></html>"#;
    let (html, _) =
      build_page(&site(), Locale::ZhTw, content(), Some("/ai/logo-v2"), Some(template)).unwrap();
    assert!(html.contains(r#"<html lang="zh-TW">"#));
    assert!(!html.contains("<title>App</title>"));
    assert!(html.contains("https://gigmarket.example/zh-TW/ai/logo-v2"));
    assert_eq!(html.matches("<title>").count(), 1);
  }

  #[test]
  fn bad_raw_block_is_counted() {
    let mut c = content();
    c.structured_data = Some("{not json".into());
    let (html, skipped) = build_page(&site(), Locale::En, c, None, None).unwrap();
    assert_eq!(skipped, 1);
    assert!(html.contains("<title>"));
  }

  #[test]
  fn run_writes_output_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("content.json");
    std::fs::write(&input, r#"{"title":"FAQ","url":"/faq"}"#).unwrap();
    let out = tmp.path().join("dist/faq.html");
    let args = HeadArgs { content: input, path: None, template: None, out: Some(out.clone()) };
    run(&site(), Locale::En, &args).unwrap();
    let written = std::fs::read_to_string(out).unwrap();
    assert!(written.starts_with("<title>FAQ | Gigmarket</title>"));
  }
}
