//! Persisted quote-request cart.
//!
//! DESIGN
//! ======
//! The cart caches its distinct-item count and total quantity so navbar
//! badges read them without folding the list. Every mutation adjusts the
//! caches by the exact delta it applied; `hydrate` recomputes them from the
//! loaded items. Quantities are `u32` and never stored as zero.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId, ProductSummary};
use crate::storage::{QUOTE_CART_KEY, Storage};
use crate::store::{Keyed, NoOp, Outcome, PersistedStore, parse_timestamp, timestamp};

/// One product line in the quote cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCartItem {
    pub id: ProductId,
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub quantity: u32,
    #[serde(default)]
    pub added_at: String,
}

impl QuoteCartItem {
    #[must_use]
    pub fn new(id: ProductId, summary: ProductSummary, quantity: u32) -> Self {
        Self { id, summary, quantity, added_at: String::new() }
    }

    /// Cart line for `product` with the given quantity.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self::new(product.id, ProductSummary::from(product), quantity)
    }
}

impl Keyed for QuoteCartItem {
    fn product_id(&self) -> ProductId {
        self.id
    }
}

/// Cart entries of one manufacturer, for the grouped cart view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManufacturerGroup<'a> {
    pub manufacturer_id: u64,
    pub manufacturer_name: &'a str,
    pub items: Vec<&'a QuoteCartItem>,
    pub quantity: u64,
}

/// Quote cart with cached counters.
#[derive(Clone, Debug)]
pub struct QuoteCart {
    inner: PersistedStore<QuoteCartItem>,
    item_count: usize,
    total_quantity: u64,
}

impl QuoteCart {
    /// Load the cart from `storage`. Zero-quantity lines left by older
    /// snapshots are dropped.
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        let mut inner: PersistedStore<QuoteCartItem> = PersistedStore::hydrate(storage, QUOTE_CART_KEY);
        let stale: Vec<ProductId> = inner
            .items()
            .iter()
            .filter(|item| item.quantity == 0)
            .map(|item| item.id)
            .collect();
        for id in &stale {
            inner.take(*id);
        }
        let mut cart = Self { inner, item_count: 0, total_quantity: 0 };
        cart.recount();
        cart
    }

    /// Add a line, merging into an existing entry by summing quantities.
    pub fn add(&mut self, mut item: QuoteCartItem) -> Outcome {
        if item.quantity == 0 {
            return Outcome::NoOp(NoOp::InvalidQuantity);
        }
        let incoming = item.quantity;
        let outcome = if let Some(existing) = self.inner.get_mut(item.id) {
            let merged = existing.quantity.saturating_add(incoming);
            let delta = u64::from(merged - existing.quantity);
            existing.quantity = merged;
            existing.added_at = timestamp();
            self.total_quantity += delta;
            Outcome::Merged
        } else {
            item.added_at = timestamp();
            self.inner.push(item);
            self.item_count += 1;
            self.total_quantity += u64::from(incoming);
            Outcome::Added
        };
        self.inner.commit();
        outcome
    }

    pub fn remove(&mut self, id: ProductId) -> Outcome {
        let Some(removed) = self.inner.take(id) else {
            return Outcome::NoOp(NoOp::NotFound);
        };
        self.item_count -= 1;
        self.total_quantity -= u64::from(removed.quantity);
        self.inner.commit();
        Outcome::Removed
    }

    /// Replace the quantity of an entry. Zero is rejected without change.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Outcome {
        if quantity == 0 {
            return Outcome::NoOp(NoOp::InvalidQuantity);
        }
        let Some(existing) = self.inner.get_mut(id) else {
            return Outcome::NoOp(NoOp::NotFound);
        };
        let previous = existing.quantity;
        existing.quantity = quantity;
        existing.added_at = timestamp();
        self.total_quantity = self.total_quantity - u64::from(previous) + u64::from(quantity);
        self.inner.commit();
        Outcome::Updated
    }

    pub fn clear(&mut self) -> Outcome {
        if self.inner.is_empty() {
            return Outcome::NoOp(NoOp::AlreadyEmpty);
        }
        self.inner.purge();
        self.item_count = 0;
        self.total_quantity = 0;
        Outcome::Cleared
    }

    #[must_use]
    pub fn is_in_quote(&self, id: ProductId) -> bool {
        self.inner.contains(id)
    }

    /// Remove if present (returns `false`), otherwise add (returns `true`).
    pub fn toggle(&mut self, item: QuoteCartItem) -> bool {
        if self.inner.contains(item.id) {
            self.remove(item.id);
            false
        } else {
            self.add(item) == Outcome::Added
        }
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    #[must_use]
    pub fn items(&self) -> &[QuoteCartItem] {
        self.inner.items()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&QuoteCartItem> {
        self.inner.get(id)
    }

    #[must_use]
    pub fn needs_flush(&self) -> bool {
        self.inner.needs_flush()
    }

    /// Entries ordered by most recent `added_at` first. Entries with
    /// unreadable stamps sort last; ties keep the later insertion first.
    #[must_use]
    pub fn newest_first(&self) -> Vec<&QuoteCartItem> {
        let mut items: Vec<&QuoteCartItem> = self.inner.items().iter().rev().collect();
        items.sort_by(|a, b| parse_timestamp(&b.added_at).cmp(&parse_timestamp(&a.added_at)));
        items
    }

    /// Entries grouped by manufacturer, in order of first appearance.
    #[must_use]
    pub fn grouped_by_manufacturer(&self) -> Vec<ManufacturerGroup<'_>> {
        let mut groups: Vec<ManufacturerGroup<'_>> = Vec::new();
        for item in self.inner.items() {
            let id = item.summary.manufacturer_id;
            if let Some(group) = groups.iter_mut().find(|g| g.manufacturer_id == id) {
                group.items.push(item);
                group.quantity += u64::from(item.quantity);
            } else {
                groups.push(ManufacturerGroup {
                    manufacturer_id: id,
                    manufacturer_name: &item.summary.manufacturer_name,
                    items: vec![item],
                    quantity: u64::from(item.quantity),
                });
            }
        }
        groups
    }

    fn recount(&mut self) {
        self.item_count = self.inner.len();
        self.total_quantity = self.inner.items().iter().map(|item| u64::from(item.quantity)).sum();
    }
}
