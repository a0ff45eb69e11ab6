/* src/client/binding/rust/src/site.rs */

use std::collections::BTreeMap;

use gig_head::HreflangEntry;
use gig_locale::Locale;
use serde::{Deserialize, Serialize};

use crate::errors::BindingError;

/// How non-default locales appear in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlStrategy {
  /// `/zh-TW/services/logo`; the default locale stays unprefixed.
  #[default]
  Prefix,
  /// `/services/logo?lang=zh-TW`
  Query,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleOverrides {
  pub name: Option<String>,
  pub tagline: Option<String>,
  pub description: Option<String>,
  pub placename: Option<String>,
}

/// Site-wide SEO settings shared by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
  pub name: String,
  pub base_url: String,
  pub tagline: Option<String>,
  pub description: Option<String>,
  pub default_image: Option<String>,
  pub twitter_site: Option<String>,
  pub author: Option<String>,
  pub robots: String,
  pub keywords: Vec<String>,
  pub url_strategy: UrlStrategy,
  /// Keyed by locale tag (`"zh-TW"`).
  pub locales: BTreeMap<String, LocaleOverrides>,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      name: "Gigmarket".to_string(),
      base_url: "http://localhost:3000".to_string(),
      tagline: None,
      description: None,
      default_image: None,
      twitter_site: None,
      author: None,
      robots: default_robots(),
      keywords: Vec::new(),
      url_strategy: UrlStrategy::default(),
      locales: BTreeMap::new(),
    }
  }
}

fn default_robots() -> String {
  "index, follow".to_string()
}

impl SiteConfig {
  pub fn validate(&self) -> Result<(), BindingError> {
    if self.name.trim().is_empty() {
      return Err(BindingError::Config("site.name must not be empty".into()));
    }
    if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
      return Err(BindingError::Config(format!(
        "site.base_url \"{}\" must start with http:// or https://",
        self.base_url
      )));
    }
    for tag in self.locales.keys() {
      if tag.parse::<Locale>().is_err() {
        return Err(BindingError::Config(format!(
          "site.locales.\"{tag}\" is not a supported locale"
        )));
      }
    }
    Ok(())
  }

  fn overrides(&self, locale: Locale) -> Option<&LocaleOverrides> {
    self.locales.get(locale.as_str())
  }

  pub fn site_name(&self, locale: Locale) -> &str {
    self.overrides(locale).and_then(|o| o.name.as_deref()).unwrap_or(&self.name)
  }

  pub fn tagline(&self, locale: Locale) -> Option<&str> {
    self.overrides(locale).and_then(|o| o.tagline.as_deref()).or(self.tagline.as_deref())
  }

  pub fn description(&self, locale: Locale) -> Option<&str> {
    self.overrides(locale).and_then(|o| o.description.as_deref()).or(self.description.as_deref())
  }

  pub fn placename(&self, locale: Locale) -> Option<&str> {
    self.overrides(locale).and_then(|o| o.placename.as_deref())
  }

  fn base(&self) -> &str {
    self.base_url.trim_end_matches('/')
  }

  /// Absolute URL of `path` as seen in `locale`.
  pub fn localized_url(&self, path: &str, locale: Locale) -> String {
    let path = normalize_path(path);
    if locale == Locale::DEFAULT {
      return format!("{}{path}", self.base());
    }
    match self.url_strategy {
      UrlStrategy::Prefix => {
        let rest = if path == "/" { "" } else { path.as_str() };
        format!("{}/{}{rest}", self.base(), locale.as_str())
      }
      UrlStrategy::Query => {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{path}{sep}lang={}", self.base(), locale.as_str())
      }
    }
  }

  /// One alternate link per supported locale plus `x-default`.
  pub fn hreflang_entries(&self, path: &str) -> Vec<HreflangEntry> {
    let mut entries: Vec<HreflangEntry> = Locale::ALL
      .into_iter()
      .map(|l| HreflangEntry::new(l.as_str(), self.localized_url(path, l)))
      .collect();
    entries.push(HreflangEntry::new("x-default", self.localized_url(path, Locale::DEFAULT)));
    entries
  }

  /// Reduce a content URL to a site-relative path. Absolute URLs lose their
  /// origin; bare slugs gain a leading slash.
  pub fn path_of(&self, url: &str) -> String {
    let own = url
      .strip_prefix(self.base())
      .filter(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'));
    if let Some(rest) = own {
      return normalize_path(rest);
    }
    if let Some(scheme_end) = url.find("://") {
      let after = &url[scheme_end + 3..];
      return normalize_path(after.find('/').map_or("/", |i| &after[i..]));
    }
    normalize_path(url)
  }
}

fn normalize_path(path: &str) -> String {
  let path = path.trim();
  if path.is_empty() {
    return "/".to_string();
  }
  if path.starts_with('/') { path.to_string() } else { format!("/{path}") }
}
