use std::sync::Arc;

use docrelay_persist::{ChatTurn, DocumentSession, SessionStore};
use docrelay_provider::ProviderClient;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};

/// Result of a successful upload registration.
#[derive(Debug, Clone)]
pub struct RegisteredUpload {
    pub source_id: String,
    pub file_name: String,
}

/// Orchestrates upload registration, chat relay, listing and deletion
/// against the session store and the provider client.
///
/// Validation happens before any store or provider call; store
/// failures are terminal for the request (only the provider transport
/// retries, and only for the chat endpoint).
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    provider: Arc<dyn ProviderClient>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionStore>, provider: Arc<dyn ProviderClient>) -> Self {
        Self { sessions, provider }
    }

    /// Registers the uploaded file with the provider, then persists a
    /// session for it. On provider failure nothing is persisted.
    pub async fn register_upload(
        &self,
        user: &CurrentUser,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<RegisteredUpload> {
        if bytes.is_empty() {
            return Err(ApiError::InvalidInput("No file uploaded".to_string()));
        }

        let source_id = self
            .provider
            .register_file(bytes, file_name)
            .await
            .map_err(ApiError::UpstreamRegistration)?;

        self.sessions
            .create_session(&user.id, &source_id, file_name)
            .await?;

        tracing::info!(source_id = %source_id, user = %user.id, file = file_name, "upload registered");

        Ok(RegisteredUpload {
            source_id,
            file_name: file_name.to_string(),
        })
    }

    /// Relays one message to the provider and appends the exchange to
    /// the session history.
    ///
    /// The provider keeps its own conversational context keyed by
    /// `source_id`, so only the current message goes out. On provider
    /// failure the history is left untouched: no partial turns.
    pub async fn relay_message(
        &self,
        user: &CurrentUser,
        source_id: &str,
        message: &str,
    ) -> ApiResult<String> {
        if message.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Message content cannot be empty.".to_string(),
            ));
        }

        let session = self
            .sessions
            .find_by_source(&user.id, source_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("PDF not found".to_string()))?;

        let reply = self
            .provider
            .send_message(source_id, message)
            .await
            .map_err(ApiError::UpstreamChat)?;

        let turns = vec![ChatTurn::user(message), ChatTurn::assistant(reply.clone())];
        let appended = self
            .sessions
            .append_turns(&user.id, &session.source_id, turns)
            .await?;
        if !appended {
            // Session deleted between lookup and append; the reply is
            // still valid, there is just no history left to extend.
            tracing::warn!(source_id, "session vanished before turns could be appended");
        }

        Ok(reply)
    }

    /// All sessions owned by `user`; never anyone else's.
    pub async fn list_sessions(&self, user: &CurrentUser) -> ApiResult<Vec<DocumentSession>> {
        Ok(self.sessions.list_sessions(&user.id).await?)
    }

    /// Deletes the session record. The provider-side source
    /// registration is not revoked.
    pub async fn delete_session(&self, user: &CurrentUser, session_id: &str) -> ApiResult<()> {
        let deleted = self.sessions.delete_session(&user.id, session_id).await?;
        if !deleted {
            return Err(ApiError::NotFound(
                "PDF not found or you do not have permission to delete it.".to_string(),
            ));
        }
        tracing::info!(session_id, user = %user.id, "session deleted");
        Ok(())
    }
}
