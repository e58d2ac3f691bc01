use async_trait::async_trait;

use crate::error::Result;

/// Seam between the session service and the hosted provider.
///
/// Implementations must treat `register_file` as a single-shot call
/// and route `send_message` through the bounded-retry transport.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Registers a binary file and returns the provider-issued source
    /// identifier.
    async fn register_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String>;

    /// Sends a single user message against a registered source and
    /// returns the generated reply text.
    async fn send_message(&self, source_id: &str, message: &str) -> Result<String>;
}
