/* src/client/locale/rust/src/errors.rs */

use std::fmt;

/// A value outside the closed locale/currency enumerations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
  InvalidLocale(String),
  InvalidCurrency(String),
}

impl LocaleError {
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidLocale(_) => "INVALID_LOCALE",
      Self::InvalidCurrency(_) => "INVALID_CURRENCY",
    }
  }
}

impl fmt::Display for LocaleError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidLocale(v) => write!(f, "{}: unsupported locale \"{v}\"", self.code()),
      Self::InvalidCurrency(v) => write!(f, "{}: unsupported currency \"{v}\"", self.code()),
    }
  }
}

impl std::error::Error for LocaleError {}

/// Failure of the durable key/value backend. Never fatal to callers of
/// [`crate::LocaleStore`]; in-memory state stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
  /// Backend missing entirely (e.g. storage disabled in the browser).
  Unavailable(String),
  /// Write rejected by the backend (quota, permissions, disk).
  Io(String),
  /// Backend content could not be decoded.
  Corrupt(String),
}

impl fmt::Display for StorageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
      Self::Io(msg) => write!(f, "storage write failed: {msg}"),
      Self::Corrupt(msg) => write!(f, "storage corrupt: {msg}"),
    }
  }
}

impl std::error::Error for StorageError {}
