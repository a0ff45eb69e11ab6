/* src/client/head/rust/src/lib.rs */

pub mod document;
pub mod engine;
pub mod errors;
pub mod escape;
pub mod intent;
pub mod render;

// Public API re-exports
pub use document::{DocumentHead, HeadDocument, HeadElement, MetaAttr, NodeKey, ValueSlot};
pub use engine::{ApplyReport, HeadHandle, HeadSyncEngine};
pub use errors::HeadError;
pub use escape::{escape_attr, escape_text, script_safe_json};
pub use intent::{
  GeoTags, HreflangEntry, JsonLdPayload, MetadataIntent, OpenGraph, StructuredDataBlock,
  TwitterCard,
};
pub use render::{inject_head, inject_html_lang, render_head};
