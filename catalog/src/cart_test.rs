use super::*;
use crate::storage::MemoryStorage;

fn line(id: ProductId, quantity: u32) -> QuoteCartItem {
    line_from(id, quantity, 1, "Acme")
}

fn line_from(id: ProductId, quantity: u32, manufacturer_id: u64, manufacturer: &str) -> QuoteCartItem {
    QuoteCartItem::new(
        id,
        ProductSummary {
            name: format!("Part {id}"),
            manufacturer_name: manufacturer.to_owned(),
            manufacturer_id,
            ..ProductSummary::default()
        },
        quantity,
    )
}

fn cart() -> QuoteCart {
    QuoteCart::hydrate(Arc::new(MemoryStorage::new()))
}

/// Counters must always match a fold over the live items.
fn assert_counters_consistent(cart: &QuoteCart) {
    assert_eq!(cart.item_count(), cart.items().len());
    let folded: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
    assert_eq!(cart.total_quantity(), folded);
}

// =============================================================
// add
// =============================================================

#[test]
fn repeated_add_merges_quantities_scenario() {
    let mut cart = cart();
    assert_eq!(cart.add(line(5, 2)), Outcome::Added);
    assert_eq!(cart.add(line(5, 3)), Outcome::Merged);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.get(5).map(|i| i.quantity), Some(5));
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.total_quantity(), 5);
}

#[test]
fn add_merge_sums_for_several_quantity_pairs() {
    for (q1, q2) in [(1, 1), (1, 9), (7, 2), (100, 250)] {
        let mut cart = cart();
        cart.add(line(1, q1));
        cart.add(line(1, q2));
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(q1 + q2));
        assert_eq!(cart.items().len(), 1);
        assert_counters_consistent(&cart);
    }
}

#[test]
fn add_zero_quantity_is_rejected() {
    let mut cart = cart();
    assert_eq!(cart.add(line(1, 0)), Outcome::NoOp(NoOp::InvalidQuantity));
    assert!(cart.items().is_empty());
    assert_eq!(cart.total_quantity(), 0);
}

#[test]
fn add_saturates_instead_of_overflowing() {
    let mut cart = cart();
    cart.add(line(1, u32::MAX));
    cart.add(line(1, 5));
    assert_eq!(cart.get(1).map(|i| i.quantity), Some(u32::MAX));
    assert_counters_consistent(&cart);
}

// =============================================================
// update_quantity
// =============================================================

#[test]
fn update_quantity_zero_leaves_quantity_unchanged() {
    let mut cart = cart();
    cart.add(line(1, 4));
    assert_eq!(cart.update_quantity(1, 0), Outcome::NoOp(NoOp::InvalidQuantity));
    assert_eq!(cart.get(1).map(|i| i.quantity), Some(4));
    assert_eq!(cart.total_quantity(), 4);
}

#[test]
fn update_quantity_adjusts_total_by_delta() {
    let mut cart = cart();
    cart.add(line(1, 4));
    cart.add(line(2, 6));
    assert_eq!(cart.update_quantity(1, 1), Outcome::Updated);
    assert_eq!(cart.total_quantity(), 7);
    assert_eq!(cart.update_quantity(2, 10), Outcome::Updated);
    assert_eq!(cart.total_quantity(), 11);
    assert_counters_consistent(&cart);
}

#[test]
fn update_quantity_missing_is_noop() {
    let mut cart = cart();
    assert_eq!(cart.update_quantity(9, 3), Outcome::NoOp(NoOp::NotFound));
}

// =============================================================
// remove / clear / toggle
// =============================================================

#[test]
fn remove_decrements_counters() {
    let mut cart = cart();
    cart.add(line(1, 2));
    cart.add(line(2, 3));
    assert_eq!(cart.remove(1), Outcome::Removed);
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.total_quantity(), 3);
    assert_eq!(cart.remove(1), Outcome::NoOp(NoOp::NotFound));
}

#[test]
fn clear_resets_counters() {
    let mut cart = cart();
    cart.add(line(1, 2));
    cart.add(line(2, 3));
    assert_eq!(cart.clear(), Outcome::Cleared);
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.total_quantity(), 0);
    assert_eq!(cart.clear(), Outcome::NoOp(NoOp::AlreadyEmpty));
}

#[test]
fn is_empty_tracks_lines() {
    let mut cart = cart();
    assert!(cart.is_empty());
    cart.add(line(1, 2));
    assert!(!cart.is_empty());
    cart.clear();
    assert!(cart.is_empty());
}

#[test]
fn clear_deletes_persisted_snapshot() {
    let storage = MemoryStorage::new();
    let mut cart = QuoteCart::hydrate(Arc::new(storage.clone()));
    cart.add(line(1, 2));
    assert!(storage.raw(QUOTE_CART_KEY).is_some());

    cart.clear();
    assert!(storage.raw(QUOTE_CART_KEY).is_none());
    assert!(QuoteCart::hydrate(Arc::new(storage)).is_empty());
}

#[test]
fn toggle_round_trip_restores_membership() {
    let mut cart = cart();
    assert!(cart.toggle(line(8, 1)));
    assert!(!cart.toggle(line(8, 1)));
    assert!(!cart.is_in_quote(8));
    assert_counters_consistent(&cart);
}

#[test]
fn counters_stay_consistent_across_mixed_mutations() {
    let mut cart = cart();
    cart.add(line(1, 2));
    cart.add(line(2, 5));
    cart.add(line(1, 1));
    cart.update_quantity(2, 0);
    cart.update_quantity(2, 3);
    cart.remove(3);
    cart.toggle(line(4, 2));
    cart.remove(1);
    assert_counters_consistent(&cart);
    assert_eq!(cart.total_quantity(), 5);
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn cart_survives_reload_with_counters() {
    let storage = MemoryStorage::new();
    let mut cart = QuoteCart::hydrate(Arc::new(storage.clone()));
    cart.add(line(1, 2));
    cart.add(line(2, 3));

    let reloaded = QuoteCart::hydrate(Arc::new(storage));
    assert_eq!(reloaded.item_count(), 2);
    assert_eq!(reloaded.total_quantity(), 5);
}

#[test]
fn hydrate_drops_zero_quantity_lines() {
    let storage = MemoryStorage::new();
    storage
        .save(
            QUOTE_CART_KEY,
            r#"{"state":{"items":[
                {"id":1,"name":"A","manufacturerName":"Acme","manufacturerId":1,"quantity":0,"addedAt":""},
                {"id":2,"name":"B","manufacturerName":"Acme","manufacturerId":1,"quantity":2,"addedAt":""}
            ]},"version":0}"#,
        )
        .expect("save");
    let cart = QuoteCart::hydrate(Arc::new(storage));
    assert!(!cart.is_in_quote(1));
    assert_eq!(cart.total_quantity(), 2);
    assert_counters_consistent(&cart);
}

#[test]
fn storage_failure_keeps_cart_usable() {
    let storage = MemoryStorage::with_quota(0);
    let mut cart = QuoteCart::hydrate(Arc::new(storage.clone()));
    assert_eq!(cart.add(line(1, 2)), Outcome::Added);
    assert!(cart.needs_flush());
    assert_eq!(cart.total_quantity(), 2);

    storage.set_quota(None);
    cart.add(line(2, 1));
    assert!(!cart.needs_flush());
    let reloaded = QuoteCart::hydrate(Arc::new(storage));
    assert_eq!(reloaded.item_count(), 2);
}

// =============================================================
// Display helpers
// =============================================================

#[test]
fn grouped_by_manufacturer_keeps_first_appearance_order() {
    let mut cart = cart();
    cart.add(line_from(1, 2, 10, "Macroblock"));
    cart.add(line_from(2, 1, 20, "onsemi"));
    cart.add(line_from(3, 4, 10, "Macroblock"));

    let groups = cart.grouped_by_manufacturer();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].manufacturer_name, "Macroblock");
    assert_eq!(groups[0].items.len(), 2);
    assert_eq!(groups[0].quantity, 6);
    assert_eq!(groups[1].manufacturer_name, "onsemi");
    assert_eq!(groups[1].quantity, 1);
}

#[test]
fn newest_first_puts_unstamped_lines_last() {
    let storage = MemoryStorage::new();
    storage
        .save(
            QUOTE_CART_KEY,
            r#"{"state":{"items":[
                {"id":1,"name":"A","manufacturerName":"Acme","manufacturerId":1,"quantity":1,"addedAt":"2024-01-01T00:00:00Z"},
                {"id":2,"name":"B","manufacturerName":"Acme","manufacturerId":1,"quantity":1,"addedAt":"garbage"},
                {"id":3,"name":"C","manufacturerName":"Acme","manufacturerId":1,"quantity":1,"addedAt":"2024-06-01T00:00:00Z"}
            ]},"version":0}"#,
        )
        .expect("save");
    let cart = QuoteCart::hydrate(Arc::new(storage));
    let ids: Vec<ProductId> = cart.newest_first().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}
