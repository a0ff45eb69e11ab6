/* src/client/locale/rust/src/locale.rs */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LocaleError;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
  #[serde(rename = "en")]
  En,
  #[serde(rename = "zh-TW")]
  ZhTw,
  #[serde(rename = "zh-CN")]
  ZhCn,
}

impl Locale {
  pub const ALL: [Locale; 3] = [Locale::En, Locale::ZhTw, Locale::ZhCn];
  pub const DEFAULT: Locale = Locale::En;

  /// BCP 47 tag, also the persisted and hreflang form.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::En => "en",
      Self::ZhTw => "zh-TW",
      Self::ZhCn => "zh-CN",
    }
  }

  /// Open Graph `og:locale` form (underscore, with region).
  pub fn og_locale(self) -> &'static str {
    match self {
      Self::En => "en_US",
      Self::ZhTw => "zh_TW",
      Self::ZhCn => "zh_CN",
    }
  }

  /// ISO 3166 region used for `geo.region`.
  pub fn region(self) -> &'static str {
    match self {
      Self::En => "US",
      Self::ZhTw => "TW",
      Self::ZhCn => "CN",
    }
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Locale {
  type Err = LocaleError;

  /// Strict parse: only the exact enumerated tags are accepted.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Locale::ALL
      .into_iter()
      .find(|l| l.as_str() == s)
      .ok_or_else(|| LocaleError::InvalidLocale(s.to_string()))
  }
}

/// Strip OS encoding/modifier suffixes (`zh_TW.UTF-8`, `de_DE@euro`) and
/// normalise `_` separators to `-`.
fn normalize_tag(tag: &str) -> String {
  let tag = tag.trim();
  let end = tag.find(['.', '@']).unwrap_or(tag.len());
  tag[..end].replace('_', "-")
}

/// Map a single environment language tag onto a supported locale.
///
/// Precedence:
/// 1. exact match against the enumeration (case-insensitive)
/// 2. any `zh*` tag: region CN or SG, or the Hans script, is `zh-CN`;
///    everything else Chinese is `zh-TW`
/// 3. primary subtag match (`en-GB` -> `en`)
///
/// Returns `None` when the tag says nothing about a supported language.
pub fn detect_locale(tag: &str) -> Option<Locale> {
  let tag = normalize_tag(tag);
  if tag.is_empty() {
    return None;
  }

  if let Some(exact) = Locale::ALL.into_iter().find(|l| l.as_str().eq_ignore_ascii_case(&tag)) {
    return Some(exact);
  }

  let lower = tag.to_ascii_lowercase();
  if lower.starts_with("zh") {
    let rest = &lower[2..];
    let simplified = rest.contains("cn") || rest.contains("sg") || rest.contains("hans");
    return Some(if simplified { Locale::ZhCn } else { Locale::ZhTw });
  }

  let primary = lower.split('-').next().unwrap_or_default();
  Locale::ALL.into_iter().find(|l| l.as_str() == primary)
}

/// Walk an ordered list of environment languages (e.g. `navigator.languages`)
/// and take the first that maps; `en` when none does.
pub fn detect_locale_from<I, T>(signals: I) -> Locale
where
  I: IntoIterator<Item = T>,
  T: AsRef<str>,
{
  signals.into_iter().find_map(|s| detect_locale(s.as_ref())).unwrap_or(Locale::DEFAULT)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_exact_tags() {
    assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
    assert_eq!("zh-TW".parse::<Locale>(), Ok(Locale::ZhTw));
    assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::ZhCn));
  }

  #[test]
  fn parse_rejects_legacy_and_unknown() {
    assert_eq!("zh".parse::<Locale>(), Err(LocaleError::InvalidLocale("zh".into())));
    assert!("fr".parse::<Locale>().is_err());
    assert!("zh-tw".parse::<Locale>().is_err());
  }

  #[test]
  fn display_round_trips_tag() {
    for locale in Locale::ALL {
      assert_eq!(locale.to_string().parse::<Locale>(), Ok(locale));
    }
  }

  #[test]
  fn detect_exact_match() {
    assert_eq!(detect_locale("zh-TW"), Some(Locale::ZhTw));
    assert_eq!(detect_locale("zh-cn"), Some(Locale::ZhCn));
    assert_eq!(detect_locale("EN"), Some(Locale::En));
  }

  #[test]
  fn detect_simplified_regions() {
    assert_eq!(detect_locale("zh-SG"), Some(Locale::ZhCn));
    assert_eq!(detect_locale("zh-Hans"), Some(Locale::ZhCn));
    assert_eq!(detect_locale("zh-Hans-HK"), Some(Locale::ZhCn));
  }

  #[test]
  fn detect_other_chinese_is_traditional() {
    assert_eq!(detect_locale("zh"), Some(Locale::ZhTw));
    assert_eq!(detect_locale("zh-HK"), Some(Locale::ZhTw));
    assert_eq!(detect_locale("zh-Hant"), Some(Locale::ZhTw));
  }

  #[test]
  fn detect_os_style_tags() {
    assert_eq!(detect_locale("zh_CN.UTF-8"), Some(Locale::ZhCn));
    assert_eq!(detect_locale("en_US.UTF-8"), Some(Locale::En));
  }

  #[test]
  fn detect_unrelated_is_none() {
    assert_eq!(detect_locale("fr-FR"), None);
    assert_eq!(detect_locale(""), None);
    assert_eq!(detect_locale("   "), None);
  }

  #[test]
  fn detect_from_list_takes_first_mapping() {
    assert_eq!(detect_locale_from(["fr-FR", "zh-SG", "en"]), Locale::ZhCn);
    assert_eq!(detect_locale_from(["en-US", "zh-TW"]), Locale::En);
  }

  #[test]
  fn detect_from_list_defaults_to_en() {
    assert_eq!(detect_locale_from(["fr", "de"]), Locale::En);
    assert_eq!(detect_locale_from(Vec::<String>::new()), Locale::En);
  }

  #[test]
  fn serde_uses_tags() {
    assert_eq!(serde_json::to_string(&Locale::ZhTw).unwrap(), r#""zh-TW""#);
    assert_eq!(serde_json::from_str::<Locale>(r#""zh-CN""#).unwrap(), Locale::ZhCn);
  }
}
