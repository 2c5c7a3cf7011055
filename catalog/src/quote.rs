//! Quote-request form model and the submission endpoint's wire shapes.
//!
//! Validation runs locally before submission and reports every failing
//! field at once so the form can mark them inline. The endpoint itself
//! accepts any JSON body; [`QuoteResponse`] is the only contract the
//! storefront relies on.

#[cfg(test)]
#[path = "quote_test.rs"]
mod quote_test;

use serde::{Deserialize, Serialize};

use crate::cart::{QuoteCart, QuoteCartItem};
use crate::product::ProductId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
}

/// Who is asking for the quote.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub preferred_contact: ContactMethod,
}

/// One requested product, copied from a cart entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub product_id: ProductId,
    pub name: String,
    pub manufacturer: String,
    pub quantity: u32,
}

impl From<&QuoteCartItem> for QuoteLine {
    fn from(item: &QuoteCartItem) -> Self {
        Self {
            product_id: item.id,
            name: item.summary.name.clone(),
            manufacturer: item.summary.manufacturer_name.clone(),
            quantity: item.quantity,
        }
    }
}

/// Body posted to `/api/quote-request`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub items: Vec<QuoteLine>,
}

/// A form field that failed local validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuoteFieldError {
    #[error("name is required")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("a phone number is required when phone contact is preferred")]
    MissingPhone,
    #[error("the quote request has no products")]
    EmptyCart,
    #[error("product {0} has a zero quantity")]
    InvalidQuantity(ProductId),
}

impl QuoteRequest {
    /// Build a request for every line currently in `cart`.
    #[must_use]
    pub fn from_cart(contact: ContactInfo, cart: &QuoteCart) -> Self {
        Self { contact, items: cart.items().iter().map(QuoteLine::from).collect() }
    }

    /// Check the form before submission.
    ///
    /// # Errors
    ///
    /// Returns every failing field, in form order.
    pub fn validate(&self) -> Result<(), Vec<QuoteFieldError>> {
        let mut errors = Vec::new();
        if self.contact.name.trim().is_empty() {
            errors.push(QuoteFieldError::MissingName);
        }
        if !is_plausible_email(&self.contact.email) {
            errors.push(QuoteFieldError::InvalidEmail);
        }
        if self.contact.preferred_contact == ContactMethod::Phone
            && self.contact.phone.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            errors.push(QuoteFieldError::MissingPhone);
        }
        if self.items.is_empty() {
            errors.push(QuoteFieldError::EmptyCart);
        }
        errors.extend(
            self.items
                .iter()
                .filter(|line| line.quantity == 0)
                .map(|line| QuoteFieldError::InvalidQuantity(line.product_id)),
        );
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Sum of requested quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

fn is_plausible_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Endpoint reply. `request_id` is present only on success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl QuoteResponse {
    #[must_use]
    pub fn accepted(request_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Your quote request was received.".to_owned(),
            request_id: Some(request_id.into()),
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            success: false,
            message: "Something went wrong while processing your quote request. Please try again.".to_owned(),
            request_id: None,
        }
    }
}
