use super::*;
use serde_json::json;

fn product(id: u64, name: &str, manufacturer: &str) -> Product {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "part_number": format!("PN-{id:03}"),
        "manufacturer": {"id": 1, "name": manufacturer},
        "category": "Sensor",
    }))
    .expect("product fixture")
}

fn products(n: u64) -> Vec<Product> {
    (1..=n).map(|id| product(id, &format!("Part {id}"), "Acme")).collect()
}

fn ready(n: u64) -> CatalogListing {
    let mut listing = CatalogListing::new();
    let ticket = listing.begin_load();
    assert!(listing.finish_load(ticket, Ok(products(n))));
    listing
}

fn results(listing: &CatalogListing) -> PageSlice<'_> {
    match listing.view() {
        ListingView::Results(slice) => slice,
        other => panic!("expected results, got {other:?}"),
    }
}

// =============================================================
// Load states
// =============================================================

#[test]
fn unresolved_candidates_render_skeletons_not_empty() {
    let mut listing = CatalogListing::new();
    listing.set_mode(ViewMode::List);
    assert_eq!(
        listing.view(),
        ListingView::Loading { mode: ViewMode::List, placeholders: DEFAULT_PAGE_SIZE }
    );
}

#[test]
fn zero_matches_render_empty_state() {
    let mut listing = ready(3);
    listing.set_query("nothing like this");
    assert_eq!(listing.view(), ListingView::Empty { query: "nothing like this" });
}

#[test]
fn failed_load_renders_message() {
    let mut listing = CatalogListing::new();
    let ticket = listing.begin_load();
    listing.finish_load(ticket, Err("upstream timed out".to_owned()));
    assert_eq!(listing.view(), ListingView::Failed { message: "upstream timed out" });
}

#[test]
fn late_response_from_superseded_request_is_dropped() {
    let mut listing = CatalogListing::new();
    let first = listing.begin_load();
    let second = listing.begin_load();

    assert!(listing.finish_load(second, Ok(products(2))));
    assert!(!listing.finish_load(first, Ok(products(30))));
    assert_eq!(listing.candidates().len(), 2);
}

#[test]
fn stale_response_while_newer_pending_keeps_loading() {
    let mut listing = CatalogListing::new();
    let first = listing.begin_load();
    let _second = listing.begin_load();
    assert!(!listing.finish_load(first, Ok(products(5))));
    assert!(matches!(listing.view(), ListingView::Loading { .. }));
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn page_count_is_ceiling_of_filtered_over_page_size() {
    assert_eq!(ready(0).page_count(), 0);
    assert_eq!(ready(12).page_count(), 1);
    assert_eq!(ready(13).page_count(), 2);
    assert_eq!(ready(25).page_count(), 3);
}

#[test]
fn last_page_holds_remainder() {
    let mut listing = ready(25);
    listing.set_page(3);
    let slice = results(&listing);
    assert_eq!(slice.page, 3);
    assert_eq!(slice.items.len(), 1);
    assert_eq!(slice.items[0].id, 25);
}

#[test]
fn changing_filters_resets_to_first_page() {
    let mut listing = ready(40);
    listing.set_page(3);
    assert_eq!(listing.page(), 3);
    listing.set_query("part");
    assert_eq!(listing.page(), 1);

    listing.set_page(2);
    listing.set_filter("manufacturer", FilterValue::select(["Acme"]));
    assert_eq!(listing.page(), 1);

    listing.set_page(2);
    listing.remove_filter("manufacturer");
    assert_eq!(listing.page(), 1);
}

#[test]
fn reset_filters_drops_query_and_filters() {
    let mut listing = ready(30);
    listing.set_query("part 1");
    listing.set_filter("manufacturer", FilterValue::select(["Acme"]));
    listing.set_page(2);

    listing.clear_filters();
    assert_eq!(listing.filter().query(), "part 1");

    listing.set_filter("manufacturer", FilterValue::select(["Acme"]));
    listing.reset_filters();
    assert!(listing.filter().is_empty());
    assert_eq!(listing.page(), 1);
    assert_eq!(results(&listing).items.len(), DEFAULT_PAGE_SIZE);
}

#[test]
fn set_page_is_clamped() {
    let mut listing = ready(30);
    listing.set_page(99);
    assert_eq!(listing.page(), 3);
    listing.set_page(0);
    assert_eq!(listing.page(), 1);
}

#[test]
fn next_and_prev_stop_at_edges() {
    let mut listing = ready(20);
    assert!(!listing.prev_page());
    assert!(listing.next_page());
    assert!(!listing.next_page());
    assert_eq!(listing.page(), 2);
}

#[test]
fn page_size_change_resets_page_and_rejects_zero() {
    let mut listing = ready(50);
    listing.set_page(4);
    assert!(listing.set_page_size(24));
    assert_eq!(listing.page(), 1);
    assert_eq!(listing.page_count(), 3);
    assert!(!listing.set_page_size(0));
    assert_eq!(listing.page_size(), 24);
}

#[test]
fn page_window_is_centred_and_bounded() {
    assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
    assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
    assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    assert_eq!(page_window(2, 3), vec![1, 2, 3]);
    assert!(page_window(1, 0).is_empty());
}

// =============================================================
// Sorting / view mode / stats
// =============================================================

#[test]
fn sort_by_manufacturer_is_stable() {
    let mut listing = CatalogListing::new();
    let ticket = listing.begin_load();
    listing.finish_load(
        ticket,
        Ok(vec![product(1, "b", "onsemi"), product(2, "a", "Abcom"), product(3, "c", "onsemi")]),
    );
    listing.set_sort(Some(Sort { key: SortKey::Manufacturer, order: SortOrder::Asc }));
    let ids: Vec<u64> = listing.visible().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    listing.set_sort(Some(Sort { key: SortKey::Name, order: SortOrder::Desc }));
    let ids: Vec<u64> = listing.visible().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn toggle_mode_switches_layout() {
    let mut listing = ready(1);
    assert_eq!(listing.mode(), ViewMode::Grid);
    listing.toggle_mode();
    assert_eq!(results(&listing).mode, ViewMode::List);
}

#[test]
fn results_carry_filter_stats() {
    let mut listing = ready(4);
    listing.set_query("part 1");
    let slice = results(&listing);
    assert_eq!(slice.stats, FilterStats { total: 4, filtered: 1, percentage: 25 });
    assert_eq!(slice.window, vec![1]);
}
