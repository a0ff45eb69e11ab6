/* src/cli/core/src/prefs.rs */

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use gig_locale::{FileStore, KeyValueStore, LocaleStore};

use crate::ui;

#[derive(Debug, Clone, Subcommand)]
pub enum PrefsAction {
  /// Print the stored language and currency
  Show,
  /// Switch language (en, zh-TW, zh-CN); currency follows unless set manually
  Language { tag: String },
  /// Pin a currency (USD, TWD, CNY)
  Currency { code: String },
  /// Forget all choices and re-detect from the OS locale
  Reset,
}

/// OS locales in preference order.
pub fn environment_languages() -> Vec<String> {
  sys_locale::get_locales().collect()
}

/// Returns whether the preference changed.
pub fn apply<S: KeyValueStore>(
  store: &mut LocaleStore<S>,
  action: &PrefsAction,
  signals: &[String],
) -> Result<bool> {
  let changed = match action {
    PrefsAction::Show => false,
    PrefsAction::Language { tag } => {
      store.set_locale_tag(tag).with_context(|| format!("cannot switch language to \"{tag}\""))?
    }
    PrefsAction::Currency { code } => {
      store.set_currency_code(code).with_context(|| format!("cannot switch currency to \"{code}\""))?
    }
    PrefsAction::Reset => store.reset(signals),
  };
  Ok(changed)
}

pub fn run(action: &PrefsAction, path: &Path) -> Result<()> {
  let signals = environment_languages();
  tracing::debug!(store = %path.display(), ?signals, "opening preference store");
  let mut store = LocaleStore::initialize(FileStore::open(path), &signals);

  let changed = apply(&mut store, action, &signals)?;
  match action {
    PrefsAction::Show => {}
    _ if changed => ui::ok("preferences updated"),
    _ => ui::arrow("already set; nothing changed"),
  }

  let prefs = store.preference();
  ui::field("language", prefs.locale.as_str());
  ui::field(
    "currency",
    &format!("{} ({})", prefs.currency.code(), prefs.currency.symbol()),
  );
  ui::field(
    "currency source",
    if prefs.currency_manually_set { "manual" } else { "follows language" },
  );
  ui::field("store", &path.display().to_string());
  Ok(())
}
