use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::credentials::Credentials;
use crate::domain::errors::ProviderError;
use crate::domain::ports::{CheckoutProvider, PaymentLink, PaymentLinkRequest};

use super::models::{CreatePaymentLinkBody, CreatePaymentLinkResponse};

/// Square API version pinned for every request.
pub const SQUARE_VERSION: &str = "2024-07-17";

const PAYMENT_LINKS_PATH: &str = "/v2/online-checkout/payment-links";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareEnvironment {
    Sandbox,
    Production,
}

impl SquareEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            SquareEnvironment::Sandbox => "https://connect.squareupsandbox.com",
            SquareEnvironment::Production => "https://connect.squareup.com",
        }
    }
}

impl FromStr for SquareEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(SquareEnvironment::Sandbox),
            "production" | "live" => Ok(SquareEnvironment::Production),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for SquareEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareEnvironment::Sandbox => f.write_str("sandbox"),
            SquareEnvironment::Production => f.write_str("production"),
        }
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Square Checkout API client. Credentials are supplied per call so one
/// client can be shared by every worker.
pub struct SquareClient {
    http: reqwest::Client,
    base_url: String,
}

impl SquareClient {
    pub fn new(environment: SquareEnvironment, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: environment.base_url().to_string(),
        })
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CheckoutProvider for SquareClient {
    async fn create_payment_link(
        &self,
        credentials: &Credentials,
        request: &PaymentLinkRequest,
    ) -> Result<PaymentLink, ProviderError> {
        let url = format!("{}{}", self.base_url, PAYMENT_LINKS_PATH);
        let body = CreatePaymentLinkBody::from(request);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&credentials.access_token)
            .header("Square-Version", SQUARE_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Transport(format!("request timed out: {}", e))
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<CreatePaymentLinkResponse>().await {
                Ok(parsed) if !parsed.errors.is_empty() => parsed.error_summary(),
                _ => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: CreatePaymentLinkResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if !parsed.errors.is_empty() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                detail: parsed.error_summary(),
            });
        }

        Ok(parsed
            .payment_link
            .map(|link| PaymentLink {
                id: link.id,
                url: link.url,
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::order::{parse_line_items, OrderRequest};
    use crate::test_support::credentials;

    fn request() -> PaymentLinkRequest {
        PaymentLinkRequest {
            idempotency_key: Uuid::new_v4(),
            order: OrderRequest::new("LOC-1", parse_line_items("VAR-A:2"), None).expect("order"),
            redirect_url: "https://shop.test/thank-you".to_string(),
        }
    }

    fn client_for(server: &MockServer) -> SquareClient {
        SquareClient::new(SquareEnvironment::Sandbox, Duration::from_secs(5))
            .expect("client")
            .with_base_url(server.uri())
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("Sandbox".parse::<SquareEnvironment>(), Ok(SquareEnvironment::Sandbox));
        assert_eq!("PRODUCTION".parse::<SquareEnvironment>(), Ok(SquareEnvironment::Production));
        assert_eq!("live".parse::<SquareEnvironment>(), Ok(SquareEnvironment::Production));
        assert!("staging".parse::<SquareEnvironment>().is_err());
    }

    #[test]
    fn environments_use_distinct_hosts() {
        assert_ne!(
            SquareEnvironment::Sandbox.base_url(),
            SquareEnvironment::Production.base_url()
        );
    }

    #[tokio::test]
    async fn posts_order_and_returns_link() {
        let server = MockServer::start().await;
        let req = request();
        Mock::given(method("POST"))
            .and(path(PAYMENT_LINKS_PATH))
            .and(header("authorization", "Bearer test-token"))
            .and(header("square-version", SQUARE_VERSION))
            .and(body_partial_json(json!({
                "idempotency_key": req.idempotency_key.to_string(),
                "order": {"location_id": "LOC-1"},
                "checkout_options": {"redirect_url": "https://shop.test/thank-you"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payment_link": {"id": "PL1", "url": "https://square.link/u/abc"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let link = client_for(&server)
            .create_payment_link(&credentials(), &req)
            .await
            .expect("link");

        assert_eq!(link.id.as_deref(), Some("PL1"));
        assert_eq!(link.url.as_deref(), Some("https://square.link/u/abc"));
    }

    #[tokio::test]
    async fn missing_payment_link_yields_empty_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let link = client_for(&server)
            .create_payment_link(&credentials(), &request())
            .await
            .expect("link");

        assert!(link.url.is_none());
    }

    #[tokio::test]
    async fn api_errors_are_reported_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{"category": "INVALID_REQUEST_ERROR", "code": "NOT_FOUND", "detail": "Item not found"}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_payment_link(&credentials(), &request())
            .await
            .unwrap_err();

        match err {
            ProviderError::Api { status, detail } => {
                assert_eq!(status, 400);
                assert!(detail.contains("NOT_FOUND"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_payment_link(&credentials(), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn slow_provider_times_out_as_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"payment_link": {"url": "https://square.link/u/late"}}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = SquareClient::new(SquareEnvironment::Sandbox, Duration::from_millis(200))
            .expect("client")
            .with_base_url(server.uri());

        let err = client
            .create_payment_link(&credentials(), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let client = SquareClient::new(SquareEnvironment::Sandbox, Duration::from_secs(2))
            .expect("client")
            .with_base_url("http://127.0.0.1:9");

        let err = client
            .create_payment_link(&credentials(), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
