/* src/client/head/rust/src/document.rs */

//! The head-level node model the engine reconciles against.
//!
//! [`DocumentHead`] is the seam between the engine and a concrete document:
//! the in-memory [`HeadDocument`] here, or the browser DOM in the wasm crate.

/// Which attribute identifies a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaAttr {
  Name,
  Property,
}

impl MetaAttr {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Property => "property",
    }
  }
}

/// Stable identity of a managed head node. Repeated reconciliation finds the
/// node by this key and updates its value instead of appending another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKey {
  Meta { attr: MetaAttr, name: String },
  Canonical,
  Alternate { hreflang: String },
  JsonLd { id: String },
}

/// Where a node keeps the value the engine writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSlot {
  Attr(&'static str),
  Text,
}

pub const JSON_LD_TYPE: &str = "application/ld+json";

impl NodeKey {
  pub fn meta_name(name: impl Into<String>) -> Self {
    Self::Meta { attr: MetaAttr::Name, name: name.into() }
  }

  pub fn meta_property(name: impl Into<String>) -> Self {
    Self::Meta { attr: MetaAttr::Property, name: name.into() }
  }

  pub fn alternate(hreflang: impl Into<String>) -> Self {
    Self::Alternate { hreflang: hreflang.into() }
  }

  pub fn json_ld(id: impl Into<String>) -> Self {
    Self::JsonLd { id: id.into() }
  }

  pub fn tag(&self) -> &'static str {
    match self {
      Self::Meta { .. } => "meta",
      Self::Canonical | Self::Alternate { .. } => "link",
      Self::JsonLd { .. } => "script",
    }
  }

  /// Attributes that make up the identity, in creation order.
  pub fn identity_attrs(&self) -> Vec<(&'static str, String)> {
    match self {
      Self::Meta { attr, name } => vec![(attr.as_str(), name.clone())],
      Self::Canonical => vec![("rel", "canonical".to_string())],
      Self::Alternate { hreflang } => {
        vec![("rel", "alternate".to_string()), ("hreflang", hreflang.clone())]
      }
      Self::JsonLd { id } => vec![("type", JSON_LD_TYPE.to_string()), ("id", id.clone())],
    }
  }

  pub fn value_slot(&self) -> ValueSlot {
    match self {
      Self::Meta { .. } => ValueSlot::Attr("content"),
      Self::Canonical | Self::Alternate { .. } => ValueSlot::Attr("href"),
      Self::JsonLd { .. } => ValueSlot::Text,
    }
  }

  /// Shared singletons survive a handle's release; owned keys are removed
  /// once no live handle claims them.
  pub fn is_shared(&self) -> bool {
    matches!(self, Self::Meta { .. } | Self::Canonical)
  }

  pub fn matches<F>(&self, tag: &str, attr: F) -> bool
  where
    F: Fn(&str) -> Option<String>,
  {
    tag.eq_ignore_ascii_case(self.tag())
      && self.identity_attrs().iter().all(|(name, want)| attr(name).as_deref() == Some(want))
  }

  /// CSS selector locating this node inside `<head>`.
  pub fn selector(&self) -> String {
    let mut sel = self.tag().to_string();
    for (name, value) in self.identity_attrs() {
      sel.push_str(&format!("[{name}=\"{}\"]", css_escape(&value)));
    }
    sel
  }
}

fn css_escape(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for ch in value.chars() {
    if ch == '"' || ch == '\\' {
      out.push('\\');
    }
    out.push(ch);
  }
  out
}

pub trait DocumentHead {
  type Node: Clone;

  fn title(&self) -> Option<String>;
  fn set_title(&mut self, title: &str);
  fn lang(&self) -> Option<String>;
  fn set_lang(&mut self, lang: &str);

  fn find(&self, key: &NodeKey) -> Option<Self::Node>;
  /// Append exactly one node carrying `key`'s identity and `value`. `None`
  /// when the backing document refused the node.
  fn create(&mut self, key: &NodeKey, value: &str) -> Option<Self::Node>;
  fn value(&self, node: &Self::Node, key: &NodeKey) -> Option<String>;
  fn set_value(&mut self, node: &Self::Node, key: &NodeKey, value: &str);
  fn remove(&mut self, node: &Self::Node);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadElement {
  id: u64,
  pub tag: String,
  pub attrs: Vec<(String, String)>,
  pub text: Option<String>,
}

impl HeadElement {
  pub fn new(tag: impl Into<String>) -> Self {
    Self { id: 0, tag: tag.into(), attrs: Vec::new(), text: None }
  }

  pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.set_attr(&name.into(), &value.into());
    self
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  pub fn attr(&self, name: &str) -> Option<&str> {
    self.attrs.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
  }

  pub fn set_attr(&mut self, name: &str, value: &str) {
    match self.attrs.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
      Some((_, v)) => *v = value.to_string(),
      None => self.attrs.push((name.to_string(), value.to_string())),
    }
  }

  fn slot_value(&self, slot: ValueSlot) -> Option<String> {
    match slot {
      ValueSlot::Attr(name) => self.attr(name).map(str::to_string),
      ValueSlot::Text => self.text.clone(),
    }
  }

  fn set_slot_value(&mut self, slot: ValueSlot, value: &str) {
    match slot {
      ValueSlot::Attr(name) => self.set_attr(name, value),
      ValueSlot::Text => self.text = Some(value.to_string()),
    }
  }
}

/// In-memory document head, used for server-side rendering and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDocument {
  title: Option<String>,
  lang: Option<String>,
  elements: Vec<HeadElement>,
  next_id: u64,
}

impl HeadDocument {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn elements(&self) -> &[HeadElement] {
    &self.elements
  }

  /// Append an element not managed by any engine (template markup,
  /// third-party tags).
  pub fn push(&mut self, mut element: HeadElement) {
    self.next_id += 1;
    element.id = self.next_id;
    self.elements.push(element);
  }

  pub fn count(&self, key: &NodeKey) -> usize {
    self.elements.iter().filter(|e| key_matches(key, e)).count()
  }

  pub fn get(&self, key: &NodeKey) -> Option<&HeadElement> {
    self.elements.iter().find(|e| key_matches(key, e))
  }

  /// Value slot of the first node matching `key`.
  pub fn value_of(&self, key: &NodeKey) -> Option<String> {
    self.get(key).and_then(|e| e.slot_value(key.value_slot()))
  }

  fn position(&self, id: u64) -> Option<usize> {
    self.elements.iter().position(|e| e.id == id)
  }
}

fn key_matches(key: &NodeKey, element: &HeadElement) -> bool {
  key.matches(&element.tag, |name| element.attr(name).map(str::to_string))
}

impl DocumentHead for HeadDocument {
  type Node = u64;

  fn title(&self) -> Option<String> {
    self.title.clone()
  }

  fn set_title(&mut self, title: &str) {
    self.title = Some(title.to_string());
  }

  fn lang(&self) -> Option<String> {
    self.lang.clone()
  }

  fn set_lang(&mut self, lang: &str) {
    self.lang = Some(lang.to_string());
  }

  fn find(&self, key: &NodeKey) -> Option<u64> {
    self.get(key).map(|e| e.id)
  }

  fn create(&mut self, key: &NodeKey, value: &str) -> Option<u64> {
    let mut element = HeadElement::new(key.tag());
    for (name, v) in key.identity_attrs() {
      element.set_attr(name, &v);
    }
    element.set_slot_value(key.value_slot(), value);
    self.push(element);
    Some(self.next_id)
  }

  fn value(&self, node: &u64, key: &NodeKey) -> Option<String> {
    let idx = self.position(*node)?;
    self.elements[idx].slot_value(key.value_slot())
  }

  fn set_value(&mut self, node: &u64, key: &NodeKey, value: &str) {
    if let Some(idx) = self.position(*node) {
      self.elements[idx].set_slot_value(key.value_slot(), value);
    }
  }

  fn remove(&mut self, node: &u64) {
    if let Some(idx) = self.position(*node) {
      self.elements.remove(idx);
    }
  }
}
