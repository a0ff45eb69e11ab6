/* src/client/locale/rust/tests/preferences.rs */

use std::collections::BTreeMap;

use gig_locale::{
  default_currency_for, detect_locale, detect_locale_from, Currency, KeyValueStore, Locale,
  LocaleStore, MemoryStore, StorageError, CURRENCY_MANUALLY_SET_KEY, LEGACY_LOCALE,
  PREFERRED_CURRENCY_KEY, PREFERRED_LANGUAGE_KEY,
};
use proptest::prelude::*;

/// Memory store that counts value-changing writes per key.
#[derive(Default)]
struct CountingStore {
  inner: MemoryStore,
  changes: BTreeMap<String, usize>,
}

impl CountingStore {
  fn changes(&self, key: &str) -> usize {
    self.changes.get(key).copied().unwrap_or(0)
  }
}

impl KeyValueStore for CountingStore {
  fn get(&self, key: &str) -> Option<String> {
    self.inner.get(key)
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    if self.inner.get(key).as_deref() != Some(value) {
      *self.changes.entry(key.to_string()).or_default() += 1;
    }
    self.inner.set(key, value)
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    self.inner.remove(key)
  }
}

#[test]
fn currency_policy_is_total() {
  for locale in Locale::ALL {
    let currency = default_currency_for(locale);
    assert!(Currency::ALL.contains(&currency), "{locale} has no currency");
  }
}

#[test]
fn migration_is_idempotent() {
  let mut storage = CountingStore::default();
  storage.inner.set(PREFERRED_LANGUAGE_KEY, LEGACY_LOCALE).unwrap();
  storage.changes.clear();

  let first = LocaleStore::initialize(&mut storage, ["en"]).locale();
  let second = LocaleStore::initialize(&mut storage, ["en"]).locale();

  assert_eq!(first, Locale::ZhTw);
  assert_eq!(second, Locale::ZhTw);
  assert_eq!(storage.get(PREFERRED_LANGUAGE_KEY).as_deref(), Some("zh-TW"));
  assert_eq!(storage.changes(PREFERRED_LANGUAGE_KEY), 1);
}

#[test]
fn currency_follows_locale_until_overridden() {
  let mut store = LocaleStore::initialize(MemoryStore::new(), ["en-US"]);
  assert!(!store.currency_manually_set());

  store.set_locale(Locale::ZhCn);
  assert_eq!(store.currency(), Currency::Cny);

  store.set_currency(Currency::Usd);
  store.set_locale(Locale::ZhTw);
  assert_eq!(store.currency(), Currency::Usd);
}

#[test]
fn end_to_end_manual_override() {
  let mut storage = MemoryStore::new();
  {
    let store = LocaleStore::initialize(&mut storage, ["zh-TW"]);
    assert_eq!(store.locale(), Locale::ZhTw);
    assert_eq!(store.currency(), Currency::Twd);
    assert!(!store.currency_manually_set());
  }

  let mut store = LocaleStore::initialize(&mut storage, ["zh-TW"]);
  store.set_currency(Currency::Usd);
  assert_eq!(store.currency(), Currency::Usd);
  assert!(store.currency_manually_set());
  assert_eq!(store.storage().get(PREFERRED_CURRENCY_KEY).as_deref(), Some("USD"));
  assert!(store.storage().get(CURRENCY_MANUALLY_SET_KEY).is_some());

  store.set_locale(Locale::En);
  assert_eq!(store.locale(), Locale::En);
  assert_eq!(store.currency(), Currency::Usd);

  // en -> USD would match by coincidence; zh-CN proves the override path
  store.set_locale(Locale::ZhCn);
  assert_eq!(store.currency(), Currency::Usd);
  assert_eq!(store.storage().get(PREFERRED_LANGUAGE_KEY).as_deref(), Some("zh-CN"));
  assert_eq!(store.storage().get(PREFERRED_CURRENCY_KEY).as_deref(), Some("USD"));

  // a reload sees exactly what memory held
  drop(store);
  let reloaded = LocaleStore::initialize(&mut storage, ["en"]);
  assert_eq!(reloaded.locale(), Locale::ZhCn);
  assert_eq!(reloaded.currency(), Currency::Usd);
  assert!(reloaded.currency_manually_set());
}

#[test]
fn revision_counts_effective_changes_only() {
  let mut store = LocaleStore::initialize(MemoryStore::new(), ["en"]);
  store.set_locale(Locale::En);
  store.set_locale(Locale::ZhTw);
  store.set_locale(Locale::ZhTw);
  store.set_currency(Currency::Twd);
  store.set_currency(Currency::Twd);
  // zh-TW/TWD derived -> zh-TW/TWD manual flips only the flag
  assert_eq!(store.revision(), 2);
}

proptest! {
  #[test]
  fn detection_never_panics(tag in ".{0,24}") {
    let _ = detect_locale(&tag);
  }

  #[test]
  fn zh_prefixed_tags_always_map_to_chinese(suffix in "[-_A-Za-z0-9]{0,12}") {
    let tag = format!("zh{suffix}");
    let locale = detect_locale(&tag);
    prop_assert!(matches!(locale, Some(Locale::ZhTw | Locale::ZhCn)), "{tag} -> {locale:?}");
  }

  #[test]
  fn detection_from_list_is_always_supported(tags in proptest::collection::vec(".{0,12}", 0..5)) {
    let locale = detect_locale_from(&tags);
    prop_assert!(Locale::ALL.contains(&locale));
  }

  #[test]
  fn any_corrupt_persisted_value_recovers(raw_locale in ".{0,12}", raw_currency in ".{0,6}") {
    let storage = MemoryStore::with_entries([
      (PREFERRED_LANGUAGE_KEY, raw_locale),
      (PREFERRED_CURRENCY_KEY, raw_currency),
    ]);
    let store = LocaleStore::initialize(storage, ["fr"]);
    prop_assert!(Locale::ALL.contains(&store.locale()));
    prop_assert!(Currency::ALL.contains(&store.currency()));
    let persisted = store.storage().get(PREFERRED_LANGUAGE_KEY);
    prop_assert_eq!(persisted.as_deref(), Some(store.locale().as_str()));
  }
}
