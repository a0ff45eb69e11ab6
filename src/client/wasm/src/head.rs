/* src/client/wasm/src/head.rs */

use gig_head::{DocumentHead, NodeKey, ValueSlot};
use web_sys::{Document, Element};

use crate::storage::js_message;

/// The live `document.head`, located through each key's CSS selector so
/// markup rendered on the server is adopted rather than duplicated.
#[derive(Debug, Clone)]
pub struct BrowserHead {
  document: Document,
}

impl BrowserHead {
  pub fn current() -> Option<Self> {
    let document = web_sys::window()?.document()?;
    Some(Self { document })
  }

  fn write_value(node: &Element, slot: ValueSlot, value: &str) {
    match slot {
      ValueSlot::Attr(name) => {
        if let Err(err) = node.set_attribute(name, value) {
          tracing::warn!(attr = name, err = %js_message(&err), "failed to set head attribute");
        }
      }
      ValueSlot::Text => node.set_text_content(Some(value)),
    }
  }
}

impl DocumentHead for BrowserHead {
  type Node = Element;

  fn title(&self) -> Option<String> {
    Some(self.document.title()).filter(|t| !t.is_empty())
  }

  fn set_title(&mut self, title: &str) {
    self.document.set_title(title);
  }

  fn lang(&self) -> Option<String> {
    self.document.document_element()?.get_attribute("lang")
  }

  fn set_lang(&mut self, lang: &str) {
    let Some(root) = self.document.document_element() else {
      return;
    };
    if let Err(err) = root.set_attribute("lang", lang) {
      tracing::warn!(err = %js_message(&err), "failed to set html lang");
    }
  }

  fn find(&self, key: &NodeKey) -> Option<Element> {
    self.document.head()?.query_selector(&key.selector()).ok().flatten()
  }

  fn create(&mut self, key: &NodeKey, value: &str) -> Option<Element> {
    let head = self.document.head()?;
    let node = match self.document.create_element(key.tag()) {
      Ok(node) => node,
      Err(err) => {
        tracing::warn!(tag = key.tag(), err = %js_message(&err), "failed to create head node");
        return None;
      }
    };
    for (name, v) in key.identity_attrs() {
      node.set_attribute(name, &v).ok()?;
    }
    Self::write_value(&node, key.value_slot(), value);
    head.append_child(&node).ok()?;
    Some(node)
  }

  fn value(&self, node: &Element, key: &NodeKey) -> Option<String> {
    match key.value_slot() {
      ValueSlot::Attr(name) => node.get_attribute(name),
      ValueSlot::Text => node.text_content(),
    }
  }

  fn set_value(&mut self, node: &Element, key: &NodeKey, value: &str) {
    Self::write_value(node, key.value_slot(), value);
  }

  fn remove(&mut self, node: &Element) {
    node.remove();
  }
}
