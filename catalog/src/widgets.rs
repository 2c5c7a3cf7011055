//! Interaction widgets: user gestures translated into store calls plus the
//! confirmation toast each gesture shows.
//!
//! These functions hold the UI policy that the stores deliberately do not:
//! the four-item compare cap, the quantity dialog's lower bound, and toast
//! wording. Each returns the [`Toast`] to enqueue; none of them fail.

#[cfg(test)]
#[path = "widgets_test.rs"]
mod widgets_test;

use crate::bookmarks::{BookmarkItem, BookmarkStore};
use crate::cart::{QuoteCart, QuoteCartItem};
use crate::compare::{CompareItem, CompareStore};
use crate::product::ProductId;
use crate::store::{NoOp, Outcome};

/// Maximum number of products the compare widget will add.
pub const COMPARE_UI_LIMIT: usize = 4;

pub const DEFAULT_TOAST_DURATION_MS: u32 = 5000;

/// Toasts kept on screen at once; older ones are evicted first.
pub const TOAST_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub duration_ms: u32,
}

impl Toast {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: ToastVariant::Default,
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>) -> Self {
        Self { variant: ToastVariant::Destructive, ..Self::new(title) }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A toast with the id used to dismiss it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedToast {
    pub id: u64,
    pub toast: Toast,
}

/// On-screen toasts, newest last.
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<QueuedToast>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `toast` and return its id. The caller schedules
    /// [`Self::dismiss`] after `duration_ms`.
    pub fn push(&mut self, toast: Toast) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(QueuedToast { id, toast });
        if self.toasts.len() > TOAST_LIMIT {
            let overflow = self.toasts.len() - TOAST_LIMIT;
            self.toasts.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|queued| queued.id != id);
        self.toasts.len() != before
    }

    #[must_use]
    pub fn toasts(&self) -> &[QueuedToast] {
        &self.toasts
    }
}

// =============================================================================
// QUANTITY DIALOG
// =============================================================================

/// Quantity picker shown before adding to the quote cart. The value never
/// drops below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityDialog {
    quantity: u32,
}

impl Default for QuantityDialog {
    fn default() -> Self {
        Self { quantity: 1 }
    }
}

impl QuantityDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// No-op at 1; the decrement button is rendered disabled there.
    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.quantity -= 1;
        }
    }

    #[must_use]
    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    /// Accept typed input. Non-numeric, zero or negative entries are
    /// ignored and leave the current value in place.
    pub fn set_input(&mut self, raw: &str) -> bool {
        match raw.trim().parse::<u32>() {
            Ok(quantity) if quantity >= 1 => {
                self.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Back to 1 after the dialog closes.
    pub fn reset(&mut self) {
        self.quantity = 1;
    }
}

// =============================================================================
// GESTURES
// =============================================================================

/// Result of clicking the compare button on a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareToggle {
    Added,
    Removed,
    /// The compare list already holds [`COMPARE_UI_LIMIT`] items.
    Full,
}

/// Toggle compare membership, refusing to grow past [`COMPARE_UI_LIMIT`].
pub fn toggle_compare(store: &mut CompareStore, item: CompareItem) -> (CompareToggle, Toast) {
    if store.contains(item.id) {
        store.remove(item.id);
        let toast = Toast::new("Removed from comparison").description(format!("{} was removed.", item.name));
        return (CompareToggle::Removed, toast);
    }
    if store.len() >= COMPARE_UI_LIMIT {
        let toast = Toast::destructive("Comparison list is full")
            .description(format!("You can compare up to {COMPARE_UI_LIMIT} products at a time."));
        return (CompareToggle::Full, toast);
    }
    let toast = Toast::new("Added to comparison").description(format!("{} was added.", item.name));
    store.add(item);
    (CompareToggle::Added, toast)
}

/// Open the compare dialog, or explain why there is nothing to show.
pub fn open_compare(store: &mut CompareStore) -> Option<Toast> {
    if store.is_empty() {
        return Some(
            Toast::destructive("Nothing to compare").description("Add products from the list to compare them."),
        );
    }
    store.open_dialog();
    None
}

/// Toggle bookmark membership. Returns whether the product is now
/// bookmarked.
pub fn toggle_bookmark(store: &mut BookmarkStore, item: BookmarkItem) -> (bool, Toast) {
    let name = item.summary.name.clone();
    let was_bookmarked = store.is_bookmarked(item.id);
    let bookmarked = store.toggle(item);
    let toast = match (was_bookmarked, bookmarked) {
        (_, true) => Toast::new("Bookmarked").description(format!("{name} was added to your bookmarks.")),
        (true, false) => {
            Toast::new("Bookmark removed").description(format!("{name} was removed from your bookmarks."))
        }
        (false, false) => Toast::destructive("Could not bookmark").description("This product has no name to show."),
    };
    (bookmarked, toast)
}

pub fn remove_bookmark(store: &mut BookmarkStore, id: ProductId) -> Option<Toast> {
    store
        .remove(id)
        .changed()
        .then(|| Toast::new("Bookmark removed").description("The product was removed from your bookmarks."))
}

/// Add the dialog's quantity of `item` to the cart and reset the dialog.
pub fn add_to_quote(cart: &mut QuoteCart, dialog: &mut QuantityDialog, mut item: QuoteCartItem) -> (Outcome, Toast) {
    item.quantity = dialog.quantity();
    let name = item.summary.name.clone();
    let quantity = item.quantity;
    let outcome = cart.add(item);
    dialog.reset();
    let toast = match outcome {
        Outcome::NoOp(NoOp::InvalidQuantity) => {
            Toast::destructive("Invalid quantity").description("Quantity must be at least 1.")
        }
        _ => Toast::new("Added to quote").description(format!("{quantity} × {name} added to your quote request.")),
    };
    (outcome, toast)
}

pub fn remove_from_quote(cart: &mut QuoteCart, id: ProductId) -> Option<Toast> {
    cart.remove(id)
        .changed()
        .then(|| Toast::new("Removed from quote").description("The product was removed from your quote request."))
}

pub fn clear_quote(cart: &mut QuoteCart) -> Option<Toast> {
    cart.clear()
        .changed()
        .then(|| Toast::new("Quote cleared").description("All products were removed from your quote request."))
}
