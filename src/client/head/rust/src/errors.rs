/* src/client/head/rust/src/errors.rs */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadError {
  /// A structured-data block could not be turned into a JSON-LD document.
  Serialization { id: String, reason: String },
  /// The handle was already released or never issued by this engine.
  UnknownHandle(u64),
}

impl HeadError {
  pub fn serialization(id: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Serialization { id: id.into(), reason: reason.into() }
  }
}

impl fmt::Display for HeadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Serialization { id, reason } => {
        write!(f, "SERIALIZATION_ERROR: structured data \"{id}\": {reason}")
      }
      Self::UnknownHandle(id) => write!(f, "UNKNOWN_HANDLE: head handle {id} is not active"),
    }
  }
}

impl std::error::Error for HeadError {}
