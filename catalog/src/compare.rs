//! Persisted compare list.
//!
//! The store is uncapped; the four-item limit is a UI policy applied by
//! [`crate::widgets::toggle_compare`].

#[cfg(test)]
#[path = "compare_test.rs"]
mod compare_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};
use crate::storage::{COMPARE_KEY, Storage};
use crate::store::{Keyed, NoOp, Outcome, PersistedStore};

/// A product selected for side-by-side comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareItem {
    pub id: ProductId,
    pub name: String,
    pub manufacturer: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub category: String,
}

impl From<&Product> for CompareItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            manufacturer: product.manufacturer.name.clone(),
            part_number: product.part_number.clone(),
            thumbnail: product.thumbnail.clone(),
            category: product.category.clone(),
        }
    }
}

impl Keyed for CompareItem {
    fn product_id(&self) -> ProductId {
        self.id
    }
}

/// Compare list plus the (non-persisted) dialog visibility flag.
#[derive(Clone, Debug)]
pub struct CompareStore {
    inner: PersistedStore<CompareItem>,
    dialog_open: bool,
}

impl CompareStore {
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        Self { inner: PersistedStore::hydrate(storage, COMPARE_KEY), dialog_open: false }
    }

    pub fn add(&mut self, item: CompareItem) -> Outcome {
        if self.inner.contains(item.id) {
            return Outcome::NoOp(NoOp::AlreadyPresent);
        }
        self.inner.push(item);
        self.inner.commit();
        Outcome::Added
    }

    pub fn remove(&mut self, id: ProductId) -> Outcome {
        if self.inner.take(id).is_none() {
            return Outcome::NoOp(NoOp::NotFound);
        }
        self.inner.commit();
        Outcome::Removed
    }

    pub fn clear(&mut self) -> Outcome {
        if self.inner.is_empty() {
            return Outcome::NoOp(NoOp::AlreadyEmpty);
        }
        self.inner.purge();
        Outcome::Cleared
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.inner.contains(id)
    }

    /// Remove if present (returns `false`), otherwise add (returns `true`).
    pub fn toggle(&mut self, item: CompareItem) -> bool {
        if self.inner.contains(item.id) {
            self.remove(item.id);
            false
        } else {
            self.add(item) == Outcome::Added
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[CompareItem] {
        self.inner.items()
    }

    #[must_use]
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }
}
