//! Filter state manager: search text plus typed per-key filters, and the
//! predicate that derives the visible subset of a candidate list.
//!
//! DESIGN
//! ======
//! Filters are keyed by attribute name and hold a [`FilterValue`] tagged
//! union, so evaluation is an exhaustive `match` instead of runtime type
//! inspection. Inactive values (a toggle switched off, an empty selection)
//! are never stored: setting one removes the key, which is what "toggling a
//! filter off removes its predicate" means in practice.
//!
//! Applied filters keep insertion order so the filter-status badges render
//! in the order the user applied them.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::product::Product;

/// Value of one filter key.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    /// Product attribute must be `true` while the toggle is on.
    Toggle(bool),
    /// Product attribute must be one of the selected values.
    MultiSelect(BTreeSet<String>),
    /// Product attribute must lie within `[min, max]` inclusive.
    Range { min: f64, max: f64 },
}

impl FilterValue {
    /// Range with bounds normalized so `min <= max`.
    #[must_use]
    pub fn range(a: f64, b: f64) -> Self {
        if a <= b { Self::Range { min: a, max: b } } else { Self::Range { min: b, max: a } }
    }

    /// Multi-select value from any iterator of strings.
    pub fn select<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MultiSelect(values.into_iter().map(Into::into).collect())
    }

    /// Whether this value contributes a predicate.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Toggle(on) => *on,
            Self::MultiSelect(selected) => !selected.is_empty(),
            Self::Range { min, max } => !min.is_nan() && !max.is_nan(),
        }
    }

    fn matches(&self, product: &Product, key: &str) -> bool {
        match self {
            Self::Toggle(on) => !*on || product.flag(key) == Some(true),
            Self::MultiSelect(selected) => {
                selected.is_empty()
                    || product
                        .categorical_values(key)
                        .iter()
                        .any(|value| selected.contains(*value))
            }
            Self::Range { min, max } => product
                .numeric_span(key)
                .is_some_and(|(low, high)| low >= *min && high <= *max),
        }
    }
}

/// Kind of control a filter key is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Toggle,
    MultiSelect,
    Range,
}

/// Static description of a filterable attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    pub kind: FieldKind,
}

/// Filterable attributes of the LED driver IC and sensor listings.
pub const FIELDS: &[FilterField] = &[
    FilterField { key: "manufacturer", label: "Manufacturer", unit: None, kind: FieldKind::MultiSelect },
    FilterField { key: "category", label: "Category", unit: None, kind: FieldKind::MultiSelect },
    FilterField { key: "package_type", label: "Package", unit: None, kind: FieldKind::MultiSelect },
    FilterField { key: "topology", label: "Topology", unit: None, kind: FieldKind::MultiSelect },
    FilterField { key: "dimming_method", label: "Dimming", unit: None, kind: FieldKind::MultiSelect },
    FilterField { key: "mounting_type", label: "Mounting", unit: None, kind: FieldKind::MultiSelect },
    FilterField { key: "channels", label: "Channels", unit: None, kind: FieldKind::Range },
    FilterField { key: "input_voltage", label: "Input voltage", unit: Some("V"), kind: FieldKind::Range },
    FilterField { key: "output_voltage", label: "Output voltage", unit: Some("V"), kind: FieldKind::Range },
    FilterField { key: "output_current", label: "Output current", unit: Some("mA"), kind: FieldKind::Range },
    FilterField {
        key: "switching_frequency",
        label: "Switching frequency",
        unit: Some("kHz"),
        kind: FieldKind::Range,
    },
    FilterField {
        key: "operating_temperature",
        label: "Operating temperature",
        unit: Some("°C"),
        kind: FieldKind::Range,
    },
    FilterField { key: "internal_switch", label: "Internal switch", unit: None, kind: FieldKind::Toggle },
    FilterField { key: "thermal_pad", label: "Thermal pad", unit: None, kind: FieldKind::Toggle },
];

/// Look up the static description of `key`.
#[must_use]
pub fn field(key: &str) -> Option<&'static FilterField> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Counts shown in the result header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total: usize,
    pub filtered: usize,
    /// `filtered / total` as a rounded percentage; 0 for an empty list.
    pub percentage: usize,
}

/// Search query and active filters for one listing. Never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    query: String,
    filters: Vec<(String, FilterValue)>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Set `key` to `value`. An inactive value removes the key instead.
    /// An existing key keeps its position among the applied filters.
    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        let key = key.into();
        if !value.is_active() {
            self.remove(&key);
            return;
        }
        if let Some(slot) = self.filters.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.filters.push((key, value));
        }
    }

    /// Switch a toggle filter on or off.
    pub fn toggle(&mut self, key: impl Into<String>, on: bool) {
        self.set(key, FilterValue::Toggle(on));
    }

    /// Add or remove one option of a multi-select filter.
    pub fn select(&mut self, key: &str, option: &str, selected: bool) {
        let mut options = match self.get(key) {
            Some(FilterValue::MultiSelect(current)) => current.clone(),
            _ => BTreeSet::new(),
        };
        if selected {
            options.insert(option.to_owned());
        } else {
            options.remove(option);
        }
        self.set(key, FilterValue::MultiSelect(options));
    }

    /// Set a range filter, normalizing bound order.
    pub fn set_range(&mut self, key: impl Into<String>, min: f64, max: f64) {
        self.set(key, FilterValue::range(min, max));
    }

    /// Remove one filter. Other filters and the query are untouched.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|(k, _)| k != key);
        self.filters.len() != before
    }

    /// Remove every filter, keeping the search query.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Remove every filter and the search query.
    pub fn reset(&mut self) {
        self.filters.clear();
        self.query.clear();
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.filters.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Active filters in the order they were applied.
    pub fn applied(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of active filters (the query is not counted).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.filters.len()
    }

    /// True when neither a filter nor a search query is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.query.trim().is_empty()
    }

    /// Whether `product` passes the search and every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with(product, self.needle().as_deref())
    }

    /// The visible subset of `candidates`, in candidate order.
    #[must_use]
    pub fn apply<'a>(&self, candidates: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.needle();
        candidates
            .iter()
            .filter(|product| self.matches_with(product, needle.as_deref()))
            .collect()
    }

    /// Result counts for `candidates` under the current state.
    #[must_use]
    pub fn stats(&self, candidates: &[Product]) -> FilterStats {
        let total = candidates.len();
        let filtered = self.apply(candidates).len();
        let percentage = if total == 0 { 0 } else { (filtered * 200 + total) / (total * 2) };
        FilterStats { total, filtered, percentage }
    }

    fn needle(&self) -> Option<String> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    fn matches_with(&self, product: &Product, needle: Option<&str>) -> bool {
        needle.is_none_or(|needle| matches_query(product, needle))
            && self.filters.iter().all(|(key, value)| value.matches(product, key))
    }
}

fn matches_query(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product
            .part_number
            .as_deref()
            .is_some_and(|part| part.to_lowercase().contains(needle))
        || product.manufacturer.name.to_lowercase().contains(needle)
}

/// Badge text for an applied filter, e.g. `Package: QFN-24, SOP-8` or
/// `Input voltage: 3~24V`.
#[must_use]
pub fn label(key: &str, value: &FilterValue) -> String {
    let (name, unit) = field(key).map_or((key, ""), |f| (f.label, f.unit.unwrap_or("")));
    let mut out = String::from(name);
    match value {
        FilterValue::Toggle(_) => {}
        FilterValue::MultiSelect(selected) => {
            out.push_str(": ");
            out.push_str(&selected.iter().map(String::as_str).collect::<Vec<_>>().join(", "));
        }
        FilterValue::Range { min, max } => {
            let _ = write!(out, ": {min}~{max}{unit}");
        }
    }
    out
}

/// Distinct values of a categorical attribute, in first-occurrence order.
#[must_use]
pub fn facet_options(candidates: &[Product], key: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut options = Vec::new();
    for product in candidates {
        for value in product.categorical_values(key) {
            if seen.insert(value) {
                options.push(value.to_owned());
            }
        }
    }
    options
}

/// Smallest low and largest high bound of a numeric attribute, for range
/// slider limits. `None` when no candidate has the attribute.
#[must_use]
pub fn range_bounds(candidates: &[Product], key: &str) -> Option<(f64, f64)> {
    candidates
        .iter()
        .filter_map(|product| product.numeric_span(key))
        .fold(None, |acc, (low, high)| match acc {
            None => Some((low, high)),
            Some((min, max)) => Some((f64::min(min, low), f64::max(max, high))),
        })
}
