/* src/client/locale/rust/src/store.rs */

use serde::{Deserialize, Serialize};

use crate::currency::{default_currency_for, Currency};
use crate::errors::LocaleError;
use crate::locale::{detect_locale_from, Locale};
use crate::storage::KeyValueStore;

pub const PREFERRED_LANGUAGE_KEY: &str = "preferred-language";
pub const PREFERRED_CURRENCY_KEY: &str = "preferred-currency";
/// Presence means true; the stored value itself is ignored.
pub const CURRENCY_MANUALLY_SET_KEY: &str = "currency-manually-set";
/// Bare `zh` written by older releases; migrated to `zh-TW` on read.
pub const LEGACY_LOCALE: &str = "zh";
const LEGACY_REPLACEMENT: Locale = Locale::ZhTw;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalePreference {
  pub locale: Locale,
  pub currency: Currency,
  pub currency_manually_set: bool,
}

impl LocalePreference {
  /// Fresh preference for a locale: currency follows the language.
  pub fn derived(locale: Locale) -> Self {
    Self { locale, currency: default_currency_for(locale), currency_manually_set: false }
  }
}

/// Owner of the language/currency preference.
///
/// Every mutation updates memory first, then writes through to the store.
/// Storage failures are logged and swallowed: memory stays authoritative for
/// the session.
#[derive(Debug)]
pub struct LocaleStore<S> {
  storage: S,
  preference: LocalePreference,
  revision: u64,
}

impl<S: KeyValueStore> LocaleStore<S> {
  /// Read the persisted preference, migrating the legacy locale first and
  /// deriving anything missing or invalid from the environment languages.
  ///
  /// Initialization is not a language change: a stored currency is kept even
  /// when it differs from the locale's default.
  pub fn initialize<I, T>(storage: S, signals: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
  {
    let mut store =
      Self { storage, preference: LocalePreference::derived(Locale::DEFAULT), revision: 0 };

    let stored_locale = store.storage.get(PREFERRED_LANGUAGE_KEY);
    let locale = match stored_locale.as_deref() {
      Some(LEGACY_LOCALE) => {
        tracing::info!(from = LEGACY_LOCALE, to = %LEGACY_REPLACEMENT, "migrating legacy locale");
        LEGACY_REPLACEMENT
      }
      Some(raw) => raw.parse::<Locale>().unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring persisted locale");
        detect_locale_from(signals)
      }),
      None => detect_locale_from(signals),
    };
    if stored_locale.as_deref() != Some(locale.as_str()) {
      store.persist(PREFERRED_LANGUAGE_KEY, locale.as_str());
    }

    let currency_manually_set = store.storage.get(CURRENCY_MANUALLY_SET_KEY).is_some();
    let stored_currency = store.storage.get(PREFERRED_CURRENCY_KEY);
    let currency = match stored_currency.as_deref() {
      Some(raw) => raw.parse::<Currency>().unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring persisted currency");
        default_currency_for(locale)
      }),
      None => default_currency_for(locale),
    };
    if stored_currency.as_deref() != Some(currency.code()) {
      store.persist(PREFERRED_CURRENCY_KEY, currency.code());
    }

    store.preference = LocalePreference { locale, currency, currency_manually_set };
    tracing::debug!(preference = ?store.preference, "locale store initialized");
    store
  }

  pub fn preference(&self) -> LocalePreference {
    self.preference
  }

  pub fn locale(&self) -> Locale {
    self.preference.locale
  }

  pub fn currency(&self) -> Currency {
    self.preference.currency
  }

  pub fn currency_manually_set(&self) -> bool {
    self.preference.currency_manually_set
  }

  /// Incremented once per effective state change; never by a no-op write.
  pub fn revision(&self) -> u64 {
    self.revision
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Switch language. Currency follows unless the user picked one.
  /// Returns whether the preference changed.
  pub fn set_locale(&mut self, locale: Locale) -> bool {
    let mut next = self.preference;
    next.locale = locale;
    self.persist(PREFERRED_LANGUAGE_KEY, locale.as_str());
    if !next.currency_manually_set {
      next.currency = default_currency_for(locale);
      self.persist(PREFERRED_CURRENCY_KEY, next.currency.code());
    }
    self.commit(next)
  }

  /// Validating variant of [`Self::set_locale`] for raw tags from callers.
  pub fn set_locale_tag(&mut self, tag: &str) -> Result<bool, LocaleError> {
    let locale = tag.parse::<Locale>()?;
    Ok(self.set_locale(locale))
  }

  /// Explicit user choice. Pins the currency against later language changes
  /// until [`Self::reset`].
  pub fn set_currency(&mut self, currency: Currency) -> bool {
    let next = LocalePreference { currency, currency_manually_set: true, ..self.preference };
    self.persist(PREFERRED_CURRENCY_KEY, currency.code());
    self.persist(CURRENCY_MANUALLY_SET_KEY, "true");
    self.commit(next)
  }

  pub fn set_currency_code(&mut self, code: &str) -> Result<bool, LocaleError> {
    let currency = code.parse::<Currency>()?;
    Ok(self.set_currency(currency))
  }

  /// Forget everything the user chose and start over from the environment.
  pub fn reset<I, T>(&mut self, signals: I) -> bool
  where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
  {
    for key in [PREFERRED_LANGUAGE_KEY, PREFERRED_CURRENCY_KEY, CURRENCY_MANUALLY_SET_KEY] {
      if let Err(err) = self.storage.remove(key) {
        tracing::warn!(key, %err, "failed to clear preference");
      }
    }
    let next = LocalePreference::derived(detect_locale_from(signals));
    self.persist(PREFERRED_LANGUAGE_KEY, next.locale.as_str());
    self.persist(PREFERRED_CURRENCY_KEY, next.currency.code());
    tracing::info!(locale = %next.locale, currency = %next.currency, "preferences reset");
    self.commit(next)
  }

  fn commit(&mut self, next: LocalePreference) -> bool {
    if next == self.preference {
      return false;
    }
    self.preference = next;
    self.revision += 1;
    true
  }

  fn persist(&mut self, key: &str, value: &str) {
    match self.storage.set(key, value) {
      Ok(()) => tracing::debug!(key, value, "preference persisted"),
      Err(err) => tracing::warn!(key, %err, "failed to persist preference; keeping in-memory value"),
    }
  }
}
