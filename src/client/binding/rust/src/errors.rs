/* src/client/binding/rust/src/errors.rs */

use std::fmt;

use gig_locale::LocaleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
  UnknownView(u64),
  /// `set_input` was called with an input type the view does not take.
  ViewTypeMismatch(u64),
  Config(String),
  Locale(LocaleError),
}

impl fmt::Display for BindingError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnknownView(id) => write!(f, "view {id} is not mounted"),
      Self::ViewTypeMismatch(id) => write!(f, "view {id} does not accept this input type"),
      Self::Config(msg) => write!(f, "invalid site config: {msg}"),
      Self::Locale(err) => err.fmt(f),
    }
  }
}

impl std::error::Error for BindingError {}

impl From<LocaleError> for BindingError {
  fn from(err: LocaleError) -> Self {
    Self::Locale(err)
  }
}
