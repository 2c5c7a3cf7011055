//! Persisted bookmark list.

#[cfg(test)]
#[path = "bookmarks_test.rs"]
mod bookmarks_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId, ProductSummary};
use crate::storage::{BOOKMARKS_KEY, Storage};
use crate::store::{Keyed, NoOp, Outcome, PersistedStore, timestamp};

/// A bookmarked product with its display fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkItem {
    pub id: ProductId,
    #[serde(flatten)]
    pub summary: ProductSummary,
    #[serde(default)]
    pub added_at: String,
}

impl BookmarkItem {
    #[must_use]
    pub fn new(id: ProductId, summary: ProductSummary) -> Self {
        Self { id, summary, added_at: String::new() }
    }
}

impl From<&Product> for BookmarkItem {
    fn from(product: &Product) -> Self {
        Self::new(product.id, ProductSummary::from(product))
    }
}

impl Keyed for BookmarkItem {
    fn product_id(&self) -> ProductId {
        self.id
    }
}

/// Bookmark collection. Duplicate adds are ignored; bookmarks carry no
/// quantity.
#[derive(Clone, Debug)]
pub struct BookmarkStore {
    inner: PersistedStore<BookmarkItem>,
}

impl BookmarkStore {
    /// Load bookmarks from `storage`.
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        Self { inner: PersistedStore::hydrate(storage, BOOKMARKS_KEY) }
    }

    /// Bookmark a product. Stamps `added_at`.
    pub fn add(&mut self, mut item: BookmarkItem) -> Outcome {
        if item.summary.name.trim().is_empty() {
            return Outcome::NoOp(NoOp::InvalidItem);
        }
        if self.inner.contains(item.id) {
            return Outcome::NoOp(NoOp::AlreadyPresent);
        }
        item.added_at = timestamp();
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

    #[must_use]
    pub fn is_bookmarked(&self, id: ProductId) -> bool {
        self.inner.contains(id)
    }

    /// Remove if present (returns `false`), otherwise add (returns `true`).
    ///
    /// An item that fails validation is not added and reports `false`.
    pub fn toggle(&mut self, item: BookmarkItem) -> bool {
        if self.inner.contains(item.id) {
            self.remove(item.id);
            false
        } else {
            self.add(item) == Outcome::Added
        }
    }

    pub fn clear(&mut self) -> Outcome {
        if self.inner.is_empty() {
            return Outcome::NoOp(NoOp::AlreadyEmpty);
        }
        self.inner.purge();
        Outcome::Cleared
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn items(&self) -> &[BookmarkItem] {
        self.inner.items()
    }

    #[must_use]
    pub fn needs_flush(&self) -> bool {
        self.inner.needs_flush()
    }
}
