use std::fmt;

use super::errors::DomainError;

/// Positive whole-number quantity in canonical decimal form. No upper bound
/// is applied; the provider decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity(String);

impl Quantity {
    pub fn one() -> Self {
        Quantity("1".to_string())
    }

    /// Accepts ASCII digits only. Leading zeros are dropped and zero is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = raw.trim_start_matches('0');
        if digits.is_empty() {
            return None;
        }
        Some(Quantity(digits.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Opaque catalog object (item variation) id in the provider's catalog.
    pub catalog_id: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountScope {
    Order,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountSpec {
    pub label: String,
    /// Decimal percentage as a string, e.g. "15"
    pub percentage: String,
    pub scope: DiscountScope,
}

/// An order ready to be sent to the provider. Always holds at least one line.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    location_id: String,
    items: Vec<LineItem>,
    discount: Option<DiscountSpec>,
}

impl OrderRequest {
    pub fn new(
        location_id: impl Into<String>,
        items: Vec<LineItem>,
        discount: Option<DiscountSpec>,
    ) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::InvalidInput(
                "products must name at least one catalog item".to_string(),
            ));
        }
        Ok(Self {
            location_id: location_id.into(),
            items,
            discount,
        })
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn discount(&self) -> Option<&DiscountSpec> {
        self.discount.as_ref()
    }
}

/// Parse a `products` value of the form `ID[:QTY][,ID[:QTY]...]`.
///
/// Blank entries are skipped. A quantity that is not a positive decimal
/// integer falls back to 1 rather than failing the request; large values are
/// passed through as given.
pub fn parse_line_items(products: &str) -> Vec<LineItem> {
    products
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> LineItem {
    let mut parts = entry.split(':');
    let catalog_id = parts.next().unwrap_or_default().trim().to_string();
    let quantity = parts
        .next()
        .and_then(|qty| Quantity::parse(qty.trim()))
        .unwrap_or_else(Quantity::one);

    LineItem {
        catalog_id,
        quantity,
    }
}
