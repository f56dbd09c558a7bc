use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::credentials::Credentials;
use crate::domain::discount::DiscountTable;
use crate::domain::errors::DomainError;
use crate::domain::landing::LandingUrl;
use crate::domain::order::{parse_line_items, OrderRequest};
use crate::domain::ports::{CheckoutProvider, PaymentLinkRequest};

/// Turns a marketing-link query into a hosted checkout URL.
///
/// Shared read-only by every worker; holds no per-request state.
pub struct CheckoutService {
    provider: Arc<dyn CheckoutProvider>,
    credentials: Option<Credentials>,
    discounts: DiscountTable,
    landing_base: String,
}

impl CheckoutService {
    pub fn new(
        provider: Arc<dyn CheckoutProvider>,
        credentials: Option<Credentials>,
        discounts: DiscountTable,
        landing_base: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            credentials,
            discounts,
            landing_base: landing_base.into(),
        }
    }

    /// Create a payment link for `products` and return the URL to redirect to.
    ///
    /// `params` is the full incoming query; only tracking parameters are
    /// forwarded to the landing page. Exactly one provider call is made when
    /// credentials are configured and at least one line item parses.
    pub async fn start_checkout(
        &self,
        products: &str,
        coupon: Option<&str>,
        params: &HashMap<String, String>,
    ) -> Result<String, DomainError> {
        let Some(credentials) = self.credentials.as_ref() else {
            log::error!("Square credentials are not configured; refusing checkout");
            return Err(DomainError::MissingCredentials);
        };

        let items = parse_line_items(products);
        let discount = self.discounts.resolve(coupon);
        let order = OrderRequest::new(credentials.location_id.clone(), items, discount)?;
        let landing = LandingUrl::from_query(self.landing_base.as_str(), params);

        let request = PaymentLinkRequest {
            idempotency_key: Uuid::new_v4(),
            order,
            redirect_url: landing.to_string(),
        };

        let link = self
            .provider
            .create_payment_link(credentials, &request)
            .await
            .map_err(|e| {
                log::warn!(
                    "Payment link creation failed (idempotency_key={}): {}",
                    request.idempotency_key,
                    e
                );
                e
            })?;

        match link.url.filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                log::info!(
                    "Created payment link {} with {} item(s), discount={} (idempotency_key={})",
                    link.id.as_deref().unwrap_or("-"),
                    request.order.items().len(),
                    request
                        .order
                        .discount()
                        .map(|d| d.label.as_str())
                        .unwrap_or("none"),
                    request.idempotency_key
                );
                Ok(url)
            }
            None => {
                log::warn!(
                    "Provider reported success without a checkout URL (idempotency_key={})",
                    request.idempotency_key
                );
                Err(DomainError::MissingCheckoutUrl)
            }
        }
    }
}
