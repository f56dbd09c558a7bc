use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::credentials::Credentials;
use crate::domain::errors::ProviderError;
use crate::domain::ports::{CheckoutProvider, PaymentLink, PaymentLinkRequest};

pub fn credentials() -> Credentials {
    Credentials::from_parts(Some("test-token".to_string()), Some("LOC-1".to_string()))
        .expect("valid credentials")
}

/// In-memory provider that counts calls and keeps every request it saw.
pub struct RecordingProvider {
    calls: AtomicUsize,
    requests: Mutex<Vec<PaymentLinkRequest>>,
    outcome: Result<PaymentLink, ProviderError>,
}

impl RecordingProvider {
    fn with_outcome(outcome: Result<PaymentLink, ProviderError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            outcome,
        }
    }

    pub fn returning_url(url: &str) -> Self {
        Self::with_outcome(Ok(PaymentLink {
            id: Some("PL-1".to_string()),
            url: Some(url.to_string()),
        }))
    }

    pub fn without_url() -> Self {
        Self::with_outcome(Ok(PaymentLink::default()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Err(error))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PaymentLinkRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl CheckoutProvider for RecordingProvider {
    async fn create_payment_link(
        &self,
        _credentials: &Credentials,
        request: &PaymentLinkRequest,
    ) -> Result<PaymentLink, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.outcome.clone()
    }
}
