// ChatPDF-compatible client (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::error::{ProviderError, Result};
use crate::retry::{with_retry, Attempt, DEFAULT_MAX_ATTEMPTS};
use crate::traits::ProviderClient;
use crate::types::{AddFileResponse, ChatReply, ChatRequest, OutboundMessage};

pub const CHATPDF_API_BASE: &str = "https://api.chatpdf.com/v1";

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the hosted PDF Q&A API.
///
/// The API key travels as an `x-api-key` default header on every
/// request.
pub struct ChatPdfClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: usize,
}

impl ChatPdfClient {
    /// Create a client against the public ChatPDF endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, CHATPDF_API_BASE)
    }

    /// Create a client against a custom base URL (tests, self-hosted
    /// gateways).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let mut key = HeaderValue::from_str(&api_key.into())
            .map_err(|_| ProviderError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Override the retry budget for the chat endpoint (default 3).
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Maps a send outcome onto the retry policy: network failures and
/// bare 500s are retryable, any other non-success status is terminal.
async fn classify(result: std::result::Result<reqwest::Response, reqwest::Error>) -> Attempt<reqwest::Response> {
    match result {
        Err(err) => Attempt::Retry(ProviderError::Http(err)),
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                return Attempt::Done(response);
            }
            let body = response.text().await.unwrap_or_default();
            let err = ProviderError::Status {
                status: status.as_u16(),
                body,
            };
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                Attempt::Retry(err)
            } else {
                Attempt::Fatal(err)
            }
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl ProviderClient for ChatPdfClient {
    async fn register_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String> {
        let url = format!("{}/sources/add-file", self.base_url);

        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        // Registration is a single attempt; only the chat endpoint
        // carries the retry policy.
        let response = self.http.post(&url).multipart(form).send().await?;
        let response = check_status(response).await?;

        let parsed: AddFileResponse = response.json().await?;
        if parsed.source_id.is_empty() {
            return Err(ProviderError::MissingField("sourceId"));
        }

        tracing::info!(source_id = %parsed.source_id, file = file_name, "file registered with provider");
        Ok(parsed.source_id)
    }

    async fn send_message(&self, source_id: &str, message: &str) -> Result<String> {
        let url = format!("{}/chats/message", self.base_url);
        let payload = ChatRequest {
            source_id: source_id.to_string(),
            messages: vec![OutboundMessage::user(message)],
        };

        let response = with_retry(self.max_attempts, || {
            let request = self.http.post(&url).json(&payload);
            async move { classify(request.send().await).await }
        })
        .await?;

        let parsed: ChatReply = response.json().await?;
        reply_content(parsed)
    }
}

/// A 2xx reply whose `content` is absent or empty carries no answer;
/// treat it as a malformed response rather than handing back "".
fn reply_content(reply: ChatReply) -> Result<String> {
    if reply.content.is_empty() {
        return Err(ProviderError::MissingField("content"));
    }
    Ok(reply.content)
}
