/* src/client/binding/rust/src/binding.rs */

use gig_head::{ApplyReport, DocumentHead, HeadError, HeadHandle, HeadSyncEngine};
use gig_locale::Locale;

use crate::site::SiteConfig;
use crate::views::ContentView;

/// Result of one [`ContentBinding::sync`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
  /// The intent was (re)applied.
  Applied(ApplyReport),
  /// Neither the locale nor the input changed since the last apply.
  Unchanged,
  /// The view has nothing to publish yet.
  Pending,
}

/// One mounted view, memoized on `(locale, input)`.
#[derive(Debug)]
pub struct ContentBinding<V: ContentView> {
  view: V,
  input: V::Input,
  applied: Option<(Locale, V::Input)>,
  handle: Option<HeadHandle>,
  applies: u64,
}

impl<V: ContentView> ContentBinding<V> {
  pub fn new(view: V, input: V::Input) -> Self {
    Self { view, input, applied: None, handle: None, applies: 0 }
  }

  pub fn input(&self) -> &V::Input {
    &self.input
  }

  /// How many times this binding has handed an intent to the engine.
  pub fn applies(&self) -> u64 {
    self.applies
  }

  pub fn is_applied(&self) -> bool {
    self.handle.is_some()
  }

  /// Replace the input. Returns whether it differs from the current one;
  /// nothing reaches the engine until the next `sync`.
  pub fn set_input(&mut self, input: V::Input) -> bool {
    if input == self.input {
      return false;
    }
    self.input = input;
    true
  }

  /// Apply the view's intent if the locale or input changed since the last
  /// successful apply.
  pub fn sync<D: DocumentHead>(
    &mut self,
    engine: &mut HeadSyncEngine<D>,
    site: &SiteConfig,
    locale: Locale,
  ) -> SyncOutcome {
    let unchanged = self
      .applied
      .as_ref()
      .is_some_and(|(applied_locale, applied_input)| {
        *applied_locale == locale && *applied_input == self.input
      });
    if unchanged {
      return SyncOutcome::Unchanged;
    }

    let Some(intent) = self.view.intent(site, locale, &self.input) else {
      // withdrawn input: nothing published for the old one may linger
      if let Some(handle) = self.handle.take() {
        let removed = engine.release(handle);
        tracing::debug!(locale = %locale, removed, "content binding withdrawn");
      }
      self.applied = None;
      return SyncOutcome::Pending;
    };

    let report = match &self.handle {
      Some(handle) => match engine.update(handle, &intent) {
        Ok(report) => report,
        Err(HeadError::UnknownHandle(id)) => {
          tracing::warn!(handle = id, "head handle no longer active; re-applying");
          let (handle, report) = engine.apply(&intent);
          self.handle = Some(handle);
          report
        }
        Err(err) => {
          tracing::warn!(%err, "head update failed");
          return SyncOutcome::Pending;
        }
      },
      None => {
        let (handle, report) = engine.apply(&intent);
        self.handle = Some(handle);
        report
      }
    };

    self.applies += 1;
    self.applied = Some((locale, self.input.clone()));
    tracing::debug!(locale = %locale, applies = self.applies, "content binding applied");
    SyncOutcome::Applied(report)
  }

  /// Release the head nodes this binding owns. Consuming `self` makes a
  /// second release impossible.
  pub fn unmount<D: DocumentHead>(self, engine: &mut HeadSyncEngine<D>) -> usize {
    match self.handle {
      Some(handle) => engine.release(handle),
      None => 0,
    }
  }
}
