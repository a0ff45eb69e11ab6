/* src/client/locale/rust/src/lib.rs */

//! Language and currency preferences for the Gigmarket client.
//!
//! [`LocaleStore`] is the only writer of the persisted preference keys. It is
//! read once at startup (legacy values are migrated before anything else looks
//! at them) and afterwards mutated only through its setters, each of which
//! persists before returning.

pub mod currency;
pub mod errors;
pub mod locale;
pub mod storage;
pub mod store;

pub use currency::{default_currency_for, Currency};
pub use errors::{LocaleError, StorageError};
pub use locale::{detect_locale, detect_locale_from, Locale};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{
  LocalePreference, LocaleStore, CURRENCY_MANUALLY_SET_KEY, LEGACY_LOCALE, PREFERRED_CURRENCY_KEY,
  PREFERRED_LANGUAGE_KEY,
};
