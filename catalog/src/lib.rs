//! Product-catalog state layer shared by the `partsdesk` server and the
//! Leptos storefront.
//!
//! This crate owns the browser-side state model: the persisted bookmark,
//! quote-cart and compare stores, the in-memory filter manager, the
//! paginated listing contract and the small widget policies (toasts,
//! quantity dialog, compare cap). It also carries the wire types the
//! storefront and server exchange (quote requests, blog posts).
//!
//! DESIGN
//! ======
//! Stores are explicit containers over a [`storage::Storage`] seam so the
//! same code runs against `localStorage` in the browser and an in-memory map
//! in tests. Every mutation returns an [`store::Outcome`]; expected
//! conditions (duplicate add, missing id, bad quantity) are `NoOp` values,
//! never errors.

pub mod blog;
pub mod bookmarks;
pub mod cart;
pub mod compare;
pub mod filter;
pub mod listing;
pub mod product;
pub mod quote;
pub mod storage;
pub mod store;
pub mod widgets;

pub use bookmarks::{BookmarkItem, BookmarkStore};
pub use cart::{QuoteCart, QuoteCartItem};
pub use compare::{CompareItem, CompareStore};
pub use filter::{FilterState, FilterValue};
pub use listing::{CatalogListing, ListingView, ViewMode};
pub use product::{Product, ProductId};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use store::{NoOp, Outcome};
