/* src/client/wasm/src/controller.rs */

use gig_binding::{
  Content, DynamicContentPage, PageMeta, SeoHead, SiteConfig, SiteRuntime, SyncOutcome, ViewId,
};
use gig_locale::LocaleStore;
use wasm_bindgen::prelude::*;

use crate::head::BrowserHead;
use crate::navigator_languages;
use crate::storage::BrowserStorage;

fn js_err(err: impl std::fmt::Display) -> JsValue {
  JsValue::from_str(&err.to_string())
}

fn applied(outcome: &SyncOutcome) -> bool {
  matches!(outcome, SyncOutcome::Applied(_))
}

/// Page-lifetime owner of the preference store and the live document head.
#[wasm_bindgen]
pub struct SiteController {
  runtime: SiteRuntime<BrowserStorage, BrowserHead>,
}

#[wasm_bindgen]
impl SiteController {
  /// `site_json` is a serialized site config; empty uses the defaults.
  #[wasm_bindgen(constructor)]
  pub fn new(site_json: &str) -> Result<SiteController, JsValue> {
    let site: SiteConfig = if site_json.is_empty() {
      SiteConfig::default()
    } else {
      serde_json::from_str(site_json).map_err(js_err)?
    };
    let head = BrowserHead::current().ok_or_else(|| JsValue::from_str("document is not available"))?;
    let store = LocaleStore::initialize(BrowserStorage::local(), navigator_languages());
    let runtime = SiteRuntime::new(site, store, head).map_err(js_err)?;
    Ok(Self { runtime })
  }

  pub fn locale(&self) -> String {
    self.runtime.locale().as_str().to_string()
  }

  pub fn currency(&self) -> String {
    self.runtime.currency().code().to_string()
  }

  /// `{"locale": ..., "currency": ..., "currencyManuallySet": ...}`
  #[wasm_bindgen(js_name = preferenceJson)]
  pub fn preference_json(&self) -> String {
    serde_json::to_string(&self.runtime.store().preference()).unwrap_or_else(|_| "null".to_string())
  }

  /// Returns how many views re-applied.
  #[wasm_bindgen(js_name = setLocale)]
  pub fn set_locale(&mut self, tag: &str) -> Result<usize, JsValue> {
    self.runtime.set_locale_tag(tag).map_err(js_err)
  }

  #[wasm_bindgen(js_name = setCurrency)]
  pub fn set_currency(&mut self, code: &str) -> Result<usize, JsValue> {
    self.runtime.set_currency_code(code).map_err(js_err)
  }

  pub fn reset(&mut self) -> usize {
    self.runtime.reset(navigator_languages())
  }

  #[wasm_bindgen(js_name = mountSeoHead)]
  pub fn mount_seo_head(&mut self, page_json: &str) -> Result<u64, JsValue> {
    let page = parse_page(page_json)?;
    let (id, _) = self.runtime.mount(SeoHead, page);
    Ok(id.get())
  }

  /// Mount a content page; an empty string mounts it pending.
  #[wasm_bindgen(js_name = mountContentPage)]
  pub fn mount_content_page(&mut self, content_json: &str) -> Result<u64, JsValue> {
    let content = parse_content(content_json)?;
    let (id, _) = self.runtime.mount(DynamicContentPage, content);
    Ok(id.get())
  }

  /// Returns whether the head changed.
  #[wasm_bindgen(js_name = updateSeoHead)]
  pub fn update_seo_head(&mut self, id: u64, page_json: &str) -> Result<bool, JsValue> {
    let page = parse_page(page_json)?;
    let outcome = self.runtime.set_input::<SeoHead>(ViewId::from_raw(id), page).map_err(js_err)?;
    Ok(applied(&outcome))
  }

  #[wasm_bindgen(js_name = setContent)]
  pub fn set_content(&mut self, id: u64, content_json: &str) -> Result<bool, JsValue> {
    let content = parse_content(content_json)?;
    let outcome = self
      .runtime
      .set_input::<DynamicContentPage>(ViewId::from_raw(id), content)
      .map_err(js_err)?;
    Ok(applied(&outcome))
  }

  /// Returns how many head nodes were removed.
  pub fn unmount(&mut self, id: u64) -> Result<usize, JsValue> {
    self.runtime.unmount(ViewId::from_raw(id)).map_err(js_err)
  }
}

fn parse_page(page_json: &str) -> Result<PageMeta, JsValue> {
  if page_json.is_empty() {
    return Ok(PageMeta::default());
  }
  serde_json::from_str(page_json).map_err(js_err)
}

fn parse_content(content_json: &str) -> Result<Option<Content>, JsValue> {
  if content_json.is_empty() || content_json == "null" {
    return Ok(None);
  }
  Content::from_json(content_json).map(Some).map_err(js_err)
}
