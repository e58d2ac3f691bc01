use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider response missing field: {0}")]
    MissingField(&'static str),

    #[error("provider API key is not a valid header value")]
    InvalidApiKey,
}

pub type Result<T> = std::result::Result<T, ProviderError>;
