/* src/client/head/rust/src/intent.rs */

//! Declarative description of what the document head should contain for one
//! mounted view.

use serde::{Deserialize, Serialize};

use crate::document::NodeKey;
use crate::errors::HeadError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataIntent {
  pub title: Option<String>,
  pub description: Option<String>,
  pub keywords: Vec<String>,
  /// Value for `<html lang>`.
  pub html_lang: Option<String>,
  pub robots: Option<String>,
  pub author: Option<String>,
  pub geo: Option<GeoTags>,
  pub open_graph: Option<OpenGraph>,
  pub twitter: Option<TwitterCard>,
  pub canonical_url: Option<String>,
  pub hreflang: Vec<HreflangEntry>,
  pub structured_data: Vec<StructuredDataBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenGraph {
  pub title: Option<String>,
  pub description: Option<String>,
  #[serde(rename = "type")]
  pub og_type: Option<String>,
  pub url: Option<String>,
  pub image: Option<String>,
  pub site_name: Option<String>,
  pub locale: Option<String>,
  /// `article:modified_time`, only meaningful with `og:type = article`.
  pub modified_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwitterCard {
  pub card: Option<String>,
  pub title: Option<String>,
  pub description: Option<String>,
  pub image: Option<String>,
  pub site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoTags {
  pub region: Option<String>,
  pub placename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HreflangEntry {
  pub lang: String,
  pub url: String,
}

impl HreflangEntry {
  pub fn new(lang: impl Into<String>, url: impl Into<String>) -> Self {
    Self { lang: lang.into(), url: url.into() }
  }
}

/// JSON-LD body of a structured-data block.
///
/// `Raw` carries text produced elsewhere (e.g. by the backend) and is only
/// validated when the block is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonLdPayload {
  // listed first so a JSON string deserializes as raw text
  Raw(String),
  Document(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDataBlock {
  pub id: String,
  pub json: JsonLdPayload,
}

impl StructuredDataBlock {
  pub fn new(id: impl Into<String>, json: serde_json::Value) -> Self {
    Self { id: id.into(), json: JsonLdPayload::Document(json) }
  }

  pub fn raw(id: impl Into<String>, text: impl Into<String>) -> Self {
    Self { id: id.into(), json: JsonLdPayload::Raw(text.into()) }
  }

  /// Build a block from any serializable schema type.
  pub fn from_serialize<T: Serialize>(id: impl Into<String>, value: &T) -> Result<Self, HeadError> {
    let id = id.into();
    match serde_json::to_value(value) {
      Ok(json) => Ok(Self::new(id, json)),
      Err(e) => Err(HeadError::serialization(id, e.to_string())),
    }
  }

  /// Compact JSON text for the `<script>` body. Only objects and arrays are
  /// valid JSON-LD documents.
  pub fn encode(&self) -> Result<String, HeadError> {
    if self.id.trim().is_empty() {
      return Err(HeadError::serialization(&self.id, "block id must not be empty"));
    }
    let parsed;
    let value = match &self.json {
      JsonLdPayload::Document(value) => value,
      JsonLdPayload::Raw(text) => {
        parsed = serde_json::from_str::<serde_json::Value>(text)
          .map_err(|e| HeadError::serialization(&self.id, e.to_string()))?;
        &parsed
      }
    };
    if !(value.is_object() || value.is_array()) {
      return Err(HeadError::serialization(&self.id, "JSON-LD must be an object or array"));
    }
    serde_json::to_string(value).map_err(|e| HeadError::serialization(&self.id, e.to_string()))
  }
}

fn push(entries: &mut Vec<(NodeKey, String)>, key: NodeKey, value: Option<&String>) {
  if let Some(value) = value {
    entries.push((key, value.clone()));
  }
}

impl MetadataIntent {
  /// Every singleton meta tag this intent sets, in document order.
  pub fn meta_entries(&self) -> Vec<(NodeKey, String)> {
    let mut entries = Vec::new();
    push(&mut entries, NodeKey::meta_name("description"), self.description.as_ref());
    if !self.keywords.is_empty() {
      entries.push((NodeKey::meta_name("keywords"), self.keywords.join(", ")));
    }
    push(&mut entries, NodeKey::meta_name("robots"), self.robots.as_ref());
    push(&mut entries, NodeKey::meta_name("author"), self.author.as_ref());

    if let Some(geo) = &self.geo {
      push(&mut entries, NodeKey::meta_name("geo.region"), geo.region.as_ref());
      push(&mut entries, NodeKey::meta_name("geo.placename"), geo.placename.as_ref());
    }

    if let Some(og) = &self.open_graph {
      push(&mut entries, NodeKey::meta_property("og:title"), og.title.as_ref());
      push(&mut entries, NodeKey::meta_property("og:description"), og.description.as_ref());
      push(&mut entries, NodeKey::meta_property("og:type"), og.og_type.as_ref());
      push(&mut entries, NodeKey::meta_property("og:url"), og.url.as_ref());
      push(&mut entries, NodeKey::meta_property("og:image"), og.image.as_ref());
      push(&mut entries, NodeKey::meta_property("og:site_name"), og.site_name.as_ref());
      push(&mut entries, NodeKey::meta_property("og:locale"), og.locale.as_ref());
      push(
        &mut entries,
        NodeKey::meta_property("article:modified_time"),
        og.modified_time.as_ref(),
      );
    }

    if let Some(tw) = &self.twitter {
      push(&mut entries, NodeKey::meta_name("twitter:card"), tw.card.as_ref());
      push(&mut entries, NodeKey::meta_name("twitter:title"), tw.title.as_ref());
      push(&mut entries, NodeKey::meta_name("twitter:description"), tw.description.as_ref());
      push(&mut entries, NodeKey::meta_name("twitter:image"), tw.image.as_ref());
      push(&mut entries, NodeKey::meta_name("twitter:site"), tw.site.as_ref());
    }

    entries
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn meta_entries_skip_absent_fields() {
    let intent = MetadataIntent {
      description: Some("Hire vetted freelancers".into()),
      open_graph: Some(OpenGraph { title: Some("Gigmarket".into()), ..Default::default() }),
      ..Default::default()
    };
    let entries = intent.meta_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], (NodeKey::meta_name("description"), "Hire vetted freelancers".into()));
    assert_eq!(entries[1], (NodeKey::meta_property("og:title"), "Gigmarket".into()));
  }

  #[test]
  fn keywords_are_joined() {
    let intent = MetadataIntent {
      keywords: vec!["freelance".into(), "design".into()],
      ..Default::default()
    };
    assert_eq!(intent.meta_entries(), vec![(NodeKey::meta_name("keywords"), "freelance, design".into())]);
  }

  #[test]
  fn encode_document_block() {
    let block = StructuredDataBlock::new("ld-org", json!({"@type": "Organization"}));
    assert_eq!(block.encode().unwrap(), r#"{"@type":"Organization"}"#);
  }

  #[test]
  fn encode_rejects_scalar_and_bad_raw() {
    let scalar = StructuredDataBlock::new("ld-x", json!("text"));
    assert!(matches!(scalar.encode(), Err(HeadError::Serialization { .. })));
    let raw = StructuredDataBlock::raw("ld-y", "{not json");
    let err = raw.encode().unwrap_err();
    assert!(matches!(err, HeadError::Serialization { ref id, .. } if id == "ld-y"));
  }

  #[test]
  fn encode_validates_raw() {
    let raw = StructuredDataBlock::raw("ld-faq", r#"{ "@type": "FAQPage" }"#);
    assert_eq!(raw.encode().unwrap(), r#"{"@type":"FAQPage"}"#);
  }

  #[test]
  fn encode_rejects_empty_id() {
    let block = StructuredDataBlock::new("  ", json!({}));
    assert!(block.encode().is_err());
  }

  #[test]
  fn from_serialize_reports_failure() {
    use std::collections::BTreeMap;
    // non-string map keys cannot become JSON object keys
    let mut bad = BTreeMap::new();
    bad.insert((1, 2), "x");
    let err = StructuredDataBlock::from_serialize("ld-bad", &bad).unwrap_err();
    assert!(matches!(err, HeadError::Serialization { ref id, .. } if id == "ld-bad"));
  }

  #[test]
  fn intent_deserializes_camel_case() {
    let intent: MetadataIntent = serde_json::from_value(json!({
      "title": "Home",
      "canonicalUrl": "https://gigmarket.example/",
      "openGraph": {"type": "website", "siteName": "Gigmarket"},
      "hreflang": [{"lang": "en", "url": "https://gigmarket.example/"}],
      "structuredData": [{"id": "ld-org", "json": {"@type": "Organization"}}]
    }))
    .unwrap();
    assert_eq!(intent.canonical_url.as_deref(), Some("https://gigmarket.example/"));
    let og = intent.open_graph.unwrap();
    assert_eq!(og.og_type.as_deref(), Some("website"));
    assert_eq!(og.site_name.as_deref(), Some("Gigmarket"));
    assert_eq!(intent.hreflang[0].lang, "en");
    assert!(matches!(intent.structured_data[0].json, JsonLdPayload::Document(_)));
  }

  #[test]
  fn string_payload_deserializes_as_raw() {
    let block: StructuredDataBlock =
      serde_json::from_value(json!({"id": "ld-content", "json": "{\"@type\":\"HowTo\"}"})).unwrap();
    assert_eq!(block.json, JsonLdPayload::Raw(r#"{"@type":"HowTo"}"#.into()));
    assert_eq!(block.encode().unwrap(), r#"{"@type":"HowTo"}"#);
  }
}
