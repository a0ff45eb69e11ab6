/* src/client/binding/rust/src/content.rs */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
  pub question: String,
  pub answer: String,
}

/// Generated page content as served by the backend's SEO content endpoint.
/// Unknown fields are preserved in `extra` so the object round-trips.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Content {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub slug: Option<String>,
  pub title: String,
  pub description: String,
  pub keywords: Vec<String>,
  pub url: String,
  pub faq: Vec<FaqEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub generated_at: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  /// Pre-serialized JSON-LD supplied by the generator.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub structured_data: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Content {
  /// Parse a content object, accepting either the bare object or the
  /// `{ "content": {...} }` envelope some endpoints wrap it in.
  pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
    Self::from_value(serde_json::from_str(text)?)
  }

  /// Same as [`Self::from_json`] for an already decoded body.
  pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
    match value {
      Value::Object(mut map) if map.len() == 1 && map.contains_key("content") => {
        serde_json::from_value(map.remove("content").unwrap_or_default())
      }
      other => serde_json::from_value(other),
    }
  }
}
