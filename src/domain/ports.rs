use async_trait::async_trait;
use uuid::Uuid;

use super::credentials::Credentials;
use super::errors::ProviderError;
use super::order::OrderRequest;

#[derive(Debug, Clone)]
pub struct PaymentLinkRequest {
    pub idempotency_key: Uuid,
    pub order: OrderRequest,
    pub redirect_url: String,
}

/// What the provider handed back. `url` is whatever the provider sent and
/// may be missing or blank.
#[derive(Debug, Clone, Default)]
pub struct PaymentLink {
    pub id: Option<String>,
    pub url: Option<String>,
}

#[async_trait]
pub trait CheckoutProvider: Send + Sync + 'static {
    async fn create_payment_link(
        &self,
        credentials: &Credentials,
        request: &PaymentLinkRequest,
    ) -> Result<PaymentLink, ProviderError>;
}
