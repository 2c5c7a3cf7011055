//! Generic persisted collection keyed by product id.
//!
//! DESIGN
//! ======
//! `PersistedStore` keeps the authoritative collection in memory and writes
//! the full snapshot to [`Storage`] after every mutation. A failed write is
//! logged and remembered in `needs_flush`; the in-memory state stays correct
//! and the next mutation writes the whole snapshot again, so nothing is lost
//! once storage recovers. Emptying a collection deletes its key outright.
//!
//! The snapshot envelope (`{"state":{"items":[..]},"version":0}`) matches the
//! layout the site already wrote to `localStorage`, so existing visitors keep
//! their bookmarks and carts.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::product::ProductId;
use crate::storage::{Storage, StorageError};

/// Snapshot format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Items stored in a [`PersistedStore`] are unique by product id.
pub trait Keyed {
    fn product_id(&self) -> ProductId;
}

/// Result of a store mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A new entry was appended.
    Added,
    /// An existing entry absorbed the incoming quantity.
    Merged,
    /// An existing entry's quantity was replaced.
    Updated,
    /// The entry was deleted.
    Removed,
    /// The collection was emptied.
    Cleared,
    /// Nothing changed; the reason is part of the contract.
    NoOp(NoOp),
}

/// Why a mutation left the store untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoOp {
    /// The id is already present and the store does not merge.
    AlreadyPresent,
    /// No entry has the requested id.
    NotFound,
    /// Quantity was zero.
    InvalidQuantity,
    /// The incoming item lacks required display fields.
    InvalidItem,
    /// `clear` on an empty collection.
    AlreadyEmpty,
}

impl Outcome {
    /// Whether the mutation changed the collection.
    #[must_use]
    pub fn changed(self) -> bool {
        !matches!(self, Self::NoOp(_))
    }
}

#[derive(Deserialize)]
struct Snapshot<T> {
    state: SnapshotState<T>,
    version: u32,
}

#[derive(Deserialize)]
struct SnapshotState<T> {
    items: Vec<T>,
}

/// Ordered collection of `T`, unique by product id, mirrored to storage.
#[derive(Clone)]
pub struct PersistedStore<T> {
    key: &'static str,
    items: Vec<T>,
    storage: Arc<dyn Storage>,
    needs_flush: bool,
}

impl<T> fmt::Debug for PersistedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedStore")
            .field("key", &self.key)
            .field("len", &self.items.len())
            .field("needs_flush", &self.needs_flush)
            .finish_non_exhaustive()
    }
}

impl<T> PersistedStore<T>
where
    T: Keyed + Serialize + DeserializeOwned,
{
    /// Load the collection stored under `key`.
    ///
    /// Unreadable or corrupt snapshots start an empty collection; duplicate
    /// ids in a snapshot keep the first entry.
    pub fn hydrate(storage: Arc<dyn Storage>, key: &'static str) -> Self {
        let items = match read_snapshot::<T>(storage.as_ref(), key) {
            Ok(items) => dedupe(items),
            Err(e) => {
                warn!(error = %e, key, "discarding unreadable store snapshot");
                Vec::new()
            }
        };
        debug!(key, count = items.len(), "store hydrated");
        Self { key, items, storage, needs_flush: false }
    }

    /// Storage key this collection is persisted under.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id() == id)
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&T> {
        self.items.iter().find(|item| item.product_id() == id)
    }

    /// True when the last write failed and the snapshot in storage is stale.
    #[must_use]
    pub fn needs_flush(&self) -> bool {
        self.needs_flush
    }

    pub(crate) fn get_mut(&mut self, id: ProductId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.product_id() == id)
    }

    /// Append without a uniqueness check; callers test `contains` first.
    pub(crate) fn push(&mut self, item: T) {
        debug_assert!(!self.contains(item.product_id()));
        self.items.push(item);
    }

    pub(crate) fn take(&mut self, id: ProductId) -> Option<T> {
        let index = self.items.iter().position(|item| item.product_id() == id)?;
        Some(self.items.remove(index))
    }

    /// Empty the collection and delete its key from storage.
    ///
    /// A failed delete leaves the store marked `needs_flush`; the next
    /// successful write replaces the stale snapshot with the current items.
    pub(crate) fn purge(&mut self) {
        self.items.clear();
        match self.storage.remove(self.key) {
            Ok(()) => self.needs_flush = false,
            Err(e) => {
                self.needs_flush = true;
                warn!(error = %e, key = self.key, "store delete failed; will retry on next mutation");
            }
        }
    }

    /// Write the full snapshot to storage.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the store stays marked `needs_flush`.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        match write_snapshot(self.storage.as_ref(), self.key, &self.items) {
            Ok(()) => {
                self.needs_flush = false;
                Ok(())
            }
            Err(e) => {
                self.needs_flush = true;
                Err(e)
            }
        }
    }

    /// Flush after a mutation. Failures are logged, never raised.
    pub(crate) fn commit(&mut self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, key = self.key, count = self.items.len(), "store write failed; will retry on next mutation");
        }
    }
}

fn read_snapshot<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Vec<T>, StorageError> {
    let Some(raw) = storage.load(key)? else {
        return Ok(Vec::new());
    };
    let snapshot: Snapshot<T> = serde_json::from_str(&raw)?;
    if snapshot.version != SNAPSHOT_VERSION {
        warn!(key, version = snapshot.version, "ignoring snapshot with unknown version");
        return Ok(Vec::new());
    }
    Ok(snapshot.state.items)
}

fn write_snapshot<T: Serialize>(storage: &dyn Storage, key: &str, items: &[T]) -> Result<(), StorageError> {
    #[derive(Serialize)]
    struct Borrowed<'a, T> {
        state: BorrowedState<'a, T>,
        version: u32,
    }
    #[derive(Serialize)]
    struct BorrowedState<'a, T> {
        items: &'a [T],
    }

    let json = serde_json::to_string(&Borrowed { state: BorrowedState { items }, version: SNAPSHOT_VERSION })?;
    storage.save(key, &json)
}

fn dedupe<T: Keyed>(items: Vec<T>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.product_id())).collect()
}

/// Current UTC time as RFC 3339, used for `addedAt` stamps.
#[must_use]
pub fn timestamp() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

/// Parse an RFC 3339 stamp written by [`timestamp`].
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).ok()
}
