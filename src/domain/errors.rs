use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing Square credentials")]
    MissingCredentials,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Provider returned no checkout URL")]
    MissingCheckoutUrl,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failure reported by the payment provider adapter.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Provider rejected request ({status}): {detail}")]
    Api { status: u16, detail: String },
    #[error("Malformed provider response: {0}")]
    Decode(String),
}
