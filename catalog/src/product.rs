//! Product display projection as delivered by the catalog provider.

#[cfg(test)]
#[path = "product_test.rs"]
mod product_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numeric product identifier, unique across the catalog.
pub type ProductId = u64;

/// Parameter key holding the package type (e.g. `SOP-8`).
pub const PACKAGE_TYPE_KEY: &str = "package_type";

/// Manufacturer reference carried on every product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u64,
    pub name: String,
}

/// Read-only product record used by the listing, filter and widget layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    pub manufacturer: Manufacturer,
    pub category: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,
}

/// One entry of the structured parameter map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub value: ParameterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameter payload. Variant order matters for untagged decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Flag(bool),
    Number(f64),
    Span { min: f64, max: f64 },
    Text(String),
    List(Vec<String>),
}

impl Product {
    /// Look up a raw parameter value by key.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&ParameterValue> {
        self.parameters.get(key).map(|p| &p.value)
    }

    /// Boolean attribute used by toggle filters.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.parameter(key)? {
            ParameterValue::Flag(on) => Some(*on),
            _ => None,
        }
    }

    /// Categorical values for multi-select filters.
    ///
    /// `manufacturer` and `category` resolve to the top-level fields; other
    /// keys read text or list parameters.
    #[must_use]
    pub fn categorical_values(&self, key: &str) -> Vec<&str> {
        match key {
            "manufacturer" => vec![self.manufacturer.name.as_str()],
            "category" => vec![self.category.as_str()],
            _ => match self.parameter(key) {
                Some(ParameterValue::Text(text)) => vec![text.as_str()],
                Some(ParameterValue::List(values)) => values.iter().map(String::as_str).collect(),
                _ => Vec::new(),
            },
        }
    }

    /// Numeric attribute as an inclusive `(low, high)` span.
    ///
    /// A single number is a degenerate span.
    #[must_use]
    pub fn numeric_span(&self, key: &str) -> Option<(f64, f64)> {
        match self.parameter(key)? {
            ParameterValue::Number(v) => Some((*v, *v)),
            ParameterValue::Span { min, max } => Some((*min, *max)),
            _ => None,
        }
    }

    #[must_use]
    pub fn package_type(&self) -> Option<&str> {
        match self.parameter(PACKAGE_TYPE_KEY)? {
            ParameterValue::Text(text) => Some(text.as_str()),
            ParameterValue::List(values) => values.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Denormalized display fields copied into bookmark and cart entries so the
/// UI can render them without refetching the product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub manufacturer_name: String,
    pub manufacturer_id: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub package_type: Option<String>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            subtitle: product.subtitle.clone(),
            category: Some(product.category.clone()),
            manufacturer_name: product.manufacturer.name.clone(),
            manufacturer_id: product.manufacturer.id,
            image_url: product.thumbnail.clone(),
            package_type: product.package_type().map(str::to_owned),
        }
    }
}
