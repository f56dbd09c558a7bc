use std::collections::HashMap;
use std::fmt;

use url::form_urlencoded;

/// Campaign-tracking parameters forwarded to the landing page, in the order
/// they are appended.
pub const TRACKING_PARAMS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
];

/// Post-payment landing page with the allow-listed tracking parameters of the
/// incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingUrl {
    base: String,
    params: Vec<(&'static str, String)>,
}

impl LandingUrl {
    pub fn from_query(base: impl Into<String>, query: &HashMap<String, String>) -> Self {
        let params = TRACKING_PARAMS
            .iter()
            .filter_map(|&name| {
                query
                    .get(name)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (name, value.clone()))
            })
            .collect();

        Self {
            base: base.into(),
            params,
        }
    }
}

impl fmt::Display for LandingUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        let mut separator = if self.base.contains('?') { '&' } else { '?' };
        for (name, value) in &self.params {
            write!(f, "{}{}={}", separator, encode(name), encode(value))?;
            separator = '&';
        }
        Ok(())
    }
}

fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
