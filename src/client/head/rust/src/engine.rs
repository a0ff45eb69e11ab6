/* src/client/head/rust/src/engine.rs */

//! Idempotent reconciliation of [`MetadataIntent`]s into a [`DocumentHead`].
//!
//! Every managed item is located by its [`NodeKey`] before anything is
//! written: an existing node only has its value overwritten, a missing one is
//! created exactly once. Hreflang links and JSON-LD blocks are set-reconciled
//! per handle and reference-counted across handles. While several handles
//! claim one of them the latest apply wins; when a claimant leaves, the node
//! goes back to the value of the newest handle still claiming it. Titles,
//! meta tags and the canonical link are shared singletons left in their last
//! applied state.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::document::{DocumentHead, NodeKey};
use crate::errors::HeadError;
use crate::intent::MetadataIntent;

/// Ownership token for one mounted view's intent. Not `Clone`: releasing
/// consumes it, so a view can only be torn down once.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadHandle {
  id: u64,
}

impl HeadHandle {
  pub fn id(&self) -> u64 {
    self.id
  }
}

/// What one reconciliation pass did to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
  pub created: usize,
  pub updated: usize,
  pub unchanged: usize,
  pub removed: usize,
  /// Structured-data blocks left untouched because they failed to encode.
  pub skipped: Vec<HeadError>,
}

impl ApplyReport {
  /// True when the pass wrote nothing.
  pub fn is_noop(&self) -> bool {
    self.created == 0 && self.updated == 0 && self.removed == 0
  }
}

#[derive(Debug)]
pub struct HeadSyncEngine<D> {
  document: D,
  /// owned key -> handles currently claiming it
  owners: HashMap<NodeKey, BTreeSet<u64>>,
  /// handle -> owned keys it claims, with the value it last wrote (`None`
  /// for a block that never encoded)
  claims: HashMap<u64, BTreeMap<NodeKey, Option<String>>>,
  next_handle: u64,
}

impl<D: DocumentHead> HeadSyncEngine<D> {
  pub fn new(document: D) -> Self {
    Self { document, owners: HashMap::new(), claims: HashMap::new(), next_handle: 0 }
  }

  pub fn document(&self) -> &D {
    &self.document
  }

  pub fn active_handles(&self) -> usize {
    self.claims.len()
  }

  /// Reconcile a new view's intent and hand back its ownership token.
  pub fn apply(&mut self, intent: &MetadataIntent) -> (HeadHandle, ApplyReport) {
    self.next_handle += 1;
    let id = self.next_handle;
    self.claims.insert(id, BTreeMap::new());
    let report = self.reconcile(id, intent);
    (HeadHandle { id }, report)
  }

  /// Replace the intent behind `handle`. Unchanged keys keep their nodes;
  /// owned keys absent from `intent` are dropped, new ones added.
  pub fn update(
    &mut self,
    handle: &HeadHandle,
    intent: &MetadataIntent,
  ) -> Result<ApplyReport, HeadError> {
    if !self.claims.contains_key(&handle.id) {
      return Err(HeadError::UnknownHandle(handle.id));
    }
    Ok(self.reconcile(handle.id, intent))
  }

  /// Remove every node only this handle still claims and restore shared
  /// ones to a remaining claimant's value. Returns how many nodes left the
  /// document.
  pub fn release(&mut self, handle: HeadHandle) -> usize {
    let Some(keys) = self.claims.remove(&handle.id) else {
      return 0;
    };
    let removed = keys.keys().filter(|key| self.disown(handle.id, key)).count();
    tracing::debug!(handle = handle.id, removed, "head handle released");
    removed
  }

  fn reconcile(&mut self, id: u64, intent: &MetadataIntent) -> ApplyReport {
    let mut report = ApplyReport::default();

    if let Some(title) = &intent.title {
      if self.document.title().as_deref() == Some(title.as_str()) {
        report.unchanged += 1;
      } else {
        self.document.set_title(title);
        report.updated += 1;
      }
    }
    if let Some(lang) = &intent.html_lang {
      if self.document.lang().as_deref() == Some(lang.as_str()) {
        report.unchanged += 1;
      } else {
        self.document.set_lang(lang);
        report.updated += 1;
      }
    }

    for (key, value) in intent.meta_entries() {
      self.upsert(&key, &value, &mut report);
    }
    if let Some(url) = &intent.canonical_url {
      self.upsert(&NodeKey::Canonical, url, &mut report);
    }

    let previous = self.claims.remove(&id).unwrap_or_default();
    let mut desired = BTreeMap::new();
    for entry in &intent.hreflang {
      let key = NodeKey::alternate(&entry.lang);
      self.upsert(&key, &entry.url, &mut report);
      desired.insert(key, Some(entry.url.clone()));
    }
    for block in &intent.structured_data {
      let key = NodeKey::json_ld(&block.id);
      let value = match block.encode() {
        Ok(json) => {
          self.upsert(&key, &json, &mut report);
          Some(json)
        }
        Err(err) => {
          tracing::warn!(handle = id, %err, "skipping structured-data block");
          report.skipped.push(err);
          // a skipped block keeps whatever node it had
          previous.get(&key).cloned().flatten()
        }
      };
      desired.insert(key, value);
    }

    for key in desired.keys() {
      self.owners.entry(key.clone()).or_default().insert(id);
    }
    let dropped: Vec<NodeKey> =
      previous.into_keys().filter(|key| !desired.contains_key(key)).collect();
    self.claims.insert(id, desired);
    for key in &dropped {
      if self.disown(id, key) {
        report.removed += 1;
      }
    }

    tracing::debug!(
      handle = id,
      created = report.created,
      updated = report.updated,
      unchanged = report.unchanged,
      removed = report.removed,
      skipped = report.skipped.len(),
      "head reconciled"
    );
    report
  }

  fn upsert(&mut self, key: &NodeKey, value: &str, report: &mut ApplyReport) {
    match self.document.find(key) {
      Some(node) => {
        if self.document.value(&node, key).as_deref() == Some(value) {
          report.unchanged += 1;
        } else {
          self.document.set_value(&node, key, value);
          report.updated += 1;
        }
      }
      None => match self.document.create(key, value) {
        Some(_) => report.created += 1,
        None => tracing::warn!(?key, "document refused head node"),
      },
    }
  }

  /// Drop `id`'s claim on `key`. The node is removed when nobody else
  /// claims it, otherwise it takes the newest remaining claimant's value.
  /// Returns whether a node was removed.
  fn disown(&mut self, id: u64, key: &NodeKey) -> bool {
    let Some(owners) = self.owners.get_mut(key) else {
      return false;
    };
    owners.remove(&id);
    if let Some(survivor) = owners.last().copied() {
      self.restore(survivor, key);
      return false;
    }
    self.owners.remove(key);
    match self.document.find(key) {
      Some(node) => {
        self.document.remove(&node);
        true
      }
      None => false,
    }
  }

  fn restore(&mut self, survivor: u64, key: &NodeKey) {
    let value = self.claims.get(&survivor).and_then(|claimed| claimed.get(key)).cloned().flatten();
    let Some(value) = value else {
      return;
    };
    let mut report = ApplyReport::default();
    self.upsert(key, &value, &mut report);
    if report.updated > 0 {
      tracing::debug!(handle = survivor, ?key, "owned node restored");
    }
  }
}
