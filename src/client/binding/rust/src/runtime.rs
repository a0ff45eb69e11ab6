/* src/client/binding/rust/src/runtime.rs */

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use gig_head::{DocumentHead, HeadSyncEngine};
use gig_locale::{Currency, KeyValueStore, Locale, LocaleStore};

use crate::binding::{ContentBinding, SyncOutcome};
use crate::errors::BindingError;
use crate::site::SiteConfig;
use crate::views::ContentView;

/// Identifies a mounted view inside one [`SiteRuntime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u64);

impl ViewId {
  pub fn from_raw(id: u64) -> Self {
    Self(id)
  }

  pub fn get(self) -> u64 {
    self.0
  }
}

impl fmt::Display for ViewId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "view#{}", self.0)
  }
}

/// Object-safe face of a [`ContentBinding`] so views of different types can
/// live in one map.
trait MountedView<D: DocumentHead> {
  fn sync(&mut self, engine: &mut HeadSyncEngine<D>, site: &SiteConfig, locale: Locale)
  -> SyncOutcome;
  fn applies(&self) -> u64;
  fn release(self: Box<Self>, engine: &mut HeadSyncEngine<D>) -> usize;
  fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<V, D> MountedView<D> for ContentBinding<V>
where
  V: ContentView + 'static,
  V::Input: 'static,
  D: DocumentHead,
{
  fn sync(
    &mut self,
    engine: &mut HeadSyncEngine<D>,
    site: &SiteConfig,
    locale: Locale,
  ) -> SyncOutcome {
    ContentBinding::sync(self, engine, site, locale)
  }

  fn applies(&self) -> u64 {
    ContentBinding::applies(self)
  }

  fn release(self: Box<Self>, engine: &mut HeadSyncEngine<D>) -> usize {
    (*self).unmount(engine)
  }

  fn as_any_mut(&mut self) -> &mut dyn Any {
    self
  }
}

/// Owns the locale store, the head engine and every mounted view.
///
/// Preference changes go through the runtime so each effective change
/// re-syncs every view exactly once; bindings whose locale and input are
/// unchanged skip the engine entirely.
pub struct SiteRuntime<S, D: DocumentHead> {
  site: SiteConfig,
  store: LocaleStore<S>,
  engine: HeadSyncEngine<D>,
  views: BTreeMap<ViewId, Box<dyn MountedView<D>>>,
  next_view: u64,
}

impl<S: KeyValueStore, D: DocumentHead> SiteRuntime<S, D> {
  pub fn new(site: SiteConfig, store: LocaleStore<S>, document: D) -> Result<Self, BindingError> {
    site.validate()?;
    Ok(Self {
      site,
      store,
      engine: HeadSyncEngine::new(document),
      views: BTreeMap::new(),
      next_view: 0,
    })
  }

  pub fn site(&self) -> &SiteConfig {
    &self.site
  }

  pub fn store(&self) -> &LocaleStore<S> {
    &self.store
  }

  pub fn engine(&self) -> &HeadSyncEngine<D> {
    &self.engine
  }

  pub fn document(&self) -> &D {
    self.engine.document()
  }

  pub fn locale(&self) -> Locale {
    self.store.locale()
  }

  pub fn currency(&self) -> Currency {
    self.store.currency()
  }

  pub fn view_count(&self) -> usize {
    self.views.len()
  }

  /// Mount a view and sync it against the current locale right away.
  pub fn mount<V>(&mut self, view: V, input: V::Input) -> (ViewId, SyncOutcome)
  where
    V: ContentView + 'static,
    V::Input: 'static,
  {
    self.next_view += 1;
    let id = ViewId(self.next_view);
    let mut binding = ContentBinding::new(view, input);
    let outcome = binding.sync(&mut self.engine, &self.site, self.store.locale());
    self.views.insert(id, Box::new(binding));
    tracing::debug!(view = %id, "view mounted");
    (id, outcome)
  }

  /// Hand a view new input. Only that view is synced, and only when the
  /// input differs from what it already has.
  pub fn set_input<V>(&mut self, id: ViewId, input: V::Input) -> Result<SyncOutcome, BindingError>
  where
    V: ContentView + 'static,
    V::Input: 'static,
  {
    let mounted = self.views.get_mut(&id).ok_or(BindingError::UnknownView(id.0))?;
    let binding = mounted
      .as_any_mut()
      .downcast_mut::<ContentBinding<V>>()
      .ok_or(BindingError::ViewTypeMismatch(id.0))?;
    if !binding.set_input(input) {
      return Ok(SyncOutcome::Unchanged);
    }
    Ok(binding.sync(&mut self.engine, &self.site, self.store.locale()))
  }

  /// Returns how many views re-applied their intent.
  pub fn set_locale(&mut self, locale: Locale) -> usize {
    let before = self.store.revision();
    self.store.set_locale(locale);
    self.after_store_change(before)
  }

  pub fn set_locale_tag(&mut self, tag: &str) -> Result<usize, BindingError> {
    let locale = tag.parse::<Locale>()?;
    Ok(self.set_locale(locale))
  }

  pub fn set_currency(&mut self, currency: Currency) -> usize {
    let before = self.store.revision();
    self.store.set_currency(currency);
    self.after_store_change(before)
  }

  pub fn set_currency_code(&mut self, code: &str) -> Result<usize, BindingError> {
    let currency = code.parse::<Currency>()?;
    Ok(self.set_currency(currency))
  }

  pub fn reset<I, T>(&mut self, signals: I) -> usize
  where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
  {
    let before = self.store.revision();
    self.store.reset(signals);
    self.after_store_change(before)
  }

  /// Release a view's head nodes. A second call with the same id is an
  /// `UnknownView` error.
  pub fn unmount(&mut self, id: ViewId) -> Result<usize, BindingError> {
    let mounted = self.views.remove(&id).ok_or(BindingError::UnknownView(id.0))?;
    let removed = mounted.release(&mut self.engine);
    tracing::debug!(view = %id, removed, "view unmounted");
    Ok(removed)
  }

  /// How many times the view has applied an intent.
  pub fn applies(&self, id: ViewId) -> Result<u64, BindingError> {
    self.views.get(&id).map(|v| v.applies()).ok_or(BindingError::UnknownView(id.0))
  }

  fn after_store_change(&mut self, before: u64) -> usize {
    if self.store.revision() == before {
      return 0;
    }
    let locale = self.store.locale();
    let mut applied = 0;
    for mounted in self.views.values_mut() {
      if matches!(mounted.sync(&mut self.engine, &self.site, locale), SyncOutcome::Applied(_)) {
        applied += 1;
      }
    }
    tracing::debug!(revision = self.store.revision(), applied, "views re-synced");
    applied
  }
}

impl<S, D: DocumentHead> fmt::Debug for SiteRuntime<S, D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SiteRuntime")
      .field("site", &self.site.name)
      .field("views", &self.views.keys().collect::<Vec<_>>())
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::views::{DynamicContentPage, PageMeta, SeoHead};
  use gig_head::HeadDocument;
  use gig_locale::MemoryStore;

  fn runtime() -> SiteRuntime<MemoryStore, HeadDocument> {
    let store = LocaleStore::initialize(MemoryStore::new(), ["en-US"]);
    let site = SiteConfig { base_url: "https://gigmarket.example".into(), ..Default::default() };
    SiteRuntime::new(site, store, HeadDocument::new()).unwrap()
  }

  #[test]
  fn invalid_site_is_rejected() {
    let store = LocaleStore::initialize(MemoryStore::new(), Vec::<String>::new());
    let site = SiteConfig { name: String::new(), ..Default::default() };
    assert!(matches!(
      SiteRuntime::new(site, store, HeadDocument::new()),
      Err(BindingError::Config(_))
    ));
  }

  #[test]
  fn set_input_type_mismatch() {
    let mut rt = runtime();
    let (id, _) = rt.mount(SeoHead, PageMeta::default());
    assert_eq!(
      rt.set_input::<DynamicContentPage>(id, None),
      Err(BindingError::ViewTypeMismatch(id.get()))
    );
  }

  #[test]
  fn unmount_twice_is_unknown_view() {
    let mut rt = runtime();
    let (id, _) = rt.mount(SeoHead, PageMeta::default());
    assert!(rt.unmount(id).is_ok());
    assert_eq!(rt.unmount(id), Err(BindingError::UnknownView(id.get())));
    assert_eq!(rt.engine().active_handles(), 0);
  }

  #[test]
  fn currency_change_does_not_reapply() {
    let mut rt = runtime();
    let (id, _) = rt.mount(SeoHead, PageMeta::default());
    assert_eq!(rt.set_currency(Currency::Cny), 0);
    assert_eq!(rt.applies(id), Ok(1));
    assert_eq!(rt.currency(), Currency::Cny);
  }

  #[test]
  fn unknown_locale_tag_is_an_error() {
    let mut rt = runtime();
    assert!(matches!(rt.set_locale_tag("fr"), Err(BindingError::Locale(_))));
    assert_eq!(rt.locale(), Locale::En);
  }
}
