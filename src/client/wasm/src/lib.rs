/* src/client/wasm/src/lib.rs */

mod controller;
mod head;
mod storage;

pub use controller::SiteController;
pub use head::BrowserHead;
pub use storage::BrowserStorage;

use gig_binding::{Content, ContentView, DynamicContentPage, SiteConfig};
use gig_head::{HeadDocument, HeadSyncEngine, MetadataIntent};
use gig_locale::Locale;
use serde_json::json;
use wasm_bindgen::prelude::*;

fn error_json(err: impl std::fmt::Display) -> String {
  json!({ "error": err.to_string() }).to_string()
}

/// `navigator.languages`, falling back to `navigator.language`.
pub(crate) fn navigator_languages() -> Vec<String> {
  let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
    return Vec::new();
  };
  let list: js_sys::Array = navigator.languages();
  let languages: Vec<String> = list.iter().filter_map(|value| value.as_string()).collect();
  if !languages.is_empty() {
    return languages;
  }
  navigator.language().into_iter().collect()
}

// --- Preference helpers ---

#[wasm_bindgen]
pub fn default_currency_for(locale: &str) -> String {
  match locale.parse::<Locale>() {
    Ok(locale) => gig_locale::default_currency_for(locale).code().to_string(),
    Err(e) => error_json(e),
  }
}

/// Map a JSON array of language tags to a supported locale.
#[wasm_bindgen]
pub fn detect_locale(languages_json: &str) -> String {
  let languages: Vec<String> = serde_json::from_str(languages_json).unwrap_or_default();
  gig_locale::detect_locale_from(&languages).as_str().to_string()
}

// --- Head helpers ---

/// Metadata intent for a content object, or `null` when `content_json` is
/// empty (content still loading).
#[wasm_bindgen]
pub fn build_content_intent(site_json: &str, locale: &str, content_json: &str) -> String {
  let site: SiteConfig = match serde_json::from_str(site_json) {
    Ok(site) => site,
    Err(e) => return error_json(e),
  };
  let locale = match locale.parse::<Locale>() {
    Ok(locale) => locale,
    Err(e) => return error_json(e),
  };
  let content = if content_json.is_empty() {
    None
  } else {
    match Content::from_json(content_json) {
      Ok(content) => Some(content),
      Err(e) => return error_json(e),
    }
  };
  match DynamicContentPage.intent(&site, locale, &content) {
    Some(intent) => serde_json::to_string(&intent).unwrap_or_else(|_| "null".to_string()),
    None => "null".to_string(),
  }
}

/// Render an intent to head markup, for server-side or prerendered pages.
#[wasm_bindgen]
pub fn render_intent(intent_json: &str) -> String {
  let intent: MetadataIntent = match serde_json::from_str(intent_json) {
    Ok(intent) => intent,
    Err(e) => return error_json(e),
  };
  let mut engine = HeadSyncEngine::new(HeadDocument::new());
  let (_handle, report) = engine.apply(&intent);
  for err in &report.skipped {
    tracing::warn!(%err, "structured-data block skipped while rendering");
  }
  gig_head::render_head(engine.document())
}

#[wasm_bindgen]
pub fn inject_head(html: &str, head_html: &str) -> String {
  gig_head::inject_head(html, head_html)
}

#[wasm_bindgen]
pub fn inject_html_lang(html: &str, locale: &str) -> String {
  gig_head::inject_html_lang(html, locale)
}
