use std::collections::HashMap;

use super::order::{DiscountScope, DiscountSpec};

/// Coupon code to percentage-off lookup, fixed at start-up.
#[derive(Debug, Clone)]
pub struct DiscountTable {
    rates: HashMap<String, String>,
}

impl DiscountTable {
    /// Build a table from `(code, percentage)` pairs. Codes are stored
    /// trimmed and uppercased so lookups are case-insensitive.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let rates = entries
            .into_iter()
            .map(|(code, pct)| (normalize(code.as_ref()), pct.into()))
            .collect();
        Self { rates }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Resolve an optional coupon into an order-wide discount.
    ///
    /// Blank and unknown codes yield `None`; checkout proceeds without a
    /// discount in both cases.
    pub fn resolve(&self, coupon: Option<&str>) -> Option<DiscountSpec> {
        let code = normalize(coupon?);
        if code.is_empty() {
            return None;
        }
        match self.rates.get(&code) {
            Some(percentage) => Some(DiscountSpec {
                label: code,
                percentage: percentage.clone(),
                scope: DiscountScope::Order,
            }),
            None => {
                log::debug!("Ignoring unknown coupon code '{}'", code);
                None
            }
        }
    }
}

impl Default for DiscountTable {
    fn default() -> Self {
        Self::new([("GLOW15", "15"), ("WELCOME10", "10")])
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}
